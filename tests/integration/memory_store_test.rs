//! Memory Store Integration Tests
//!
//! Collection creation, seeding, reuse across connections and queries on a
//! persisted store.

use project_memory::services::memory::SEED_RECORD_ID;
use project_memory::{CollectionStatus, MemorySettings, MemoryStore};

use crate::common::{memory, open_store, project_with};

#[test]
fn test_collection_is_created_once_and_reused() {
    let project = project_with(&[("package.json", "{}"), ("Cargo.toml", "[package]")]);

    let mut first = MemoryStore::connect(MemorySettings::for_project(project.path())).unwrap();
    assert_eq!(
        first.create_or_get_collection().unwrap(),
        CollectionStatus::Created { seeded: true }
    );

    let mut second = MemoryStore::connect(MemorySettings::for_project(project.path())).unwrap();
    assert_eq!(
        second.create_or_get_collection().unwrap(),
        CollectionStatus::Existing { count: 1 }
    );

    let records = second.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, SEED_RECORD_ID);
    assert!(records[0].document.contains("Node.js project initialized"));
    assert!(project.path().join(".chroma").is_dir());
}

#[test]
fn test_records_listed_in_insertion_order() {
    let project = project_with(&[]);
    let store = open_store(project.path());

    store.add(memory("zeta", "last letter", "note")).unwrap();
    store.add(memory("alpha", "first letter", "note")).unwrap();

    let ids: Vec<String> = store.list_all().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![SEED_RECORD_ID, "zeta", "alpha"]);
}

#[test]
fn test_duplicate_add_leaves_original() {
    let project = project_with(&[]);
    let store = open_store(project.path());

    store.add(memory("m1", "original text", "note")).unwrap();
    let err = store.add(memory("m1", "other text", "note")).unwrap_err();
    assert_eq!(err.kind(), "duplicate_id");

    let record = store
        .list_all()
        .unwrap()
        .into_iter()
        .find(|r| r.id == "m1")
        .unwrap();
    assert_eq!(record.document, "original text");
}

#[test]
fn test_query_returns_most_similar_first() {
    let project = project_with(&[]);
    let store = open_store(project.path());

    store
        .add(memory("auth", "Authenticate users with OAuth tokens", "decision"))
        .unwrap();
    store
        .add(memory("cache", "Cache rendered pages in Redis", "decision"))
        .unwrap();
    store
        .add(memory("deploy", "Deploy nightly from the main branch", "note"))
        .unwrap();

    let results = store.query("how do users authenticate", Some(2)).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].record.id, "auth");
    assert_eq!(results[0].record.metadata.memory_type, "decision");
    assert!(results[0].distance < results[1].distance);
}

#[test]
fn test_query_default_top_k() {
    let project = project_with(&[]);
    let store = open_store(project.path());
    for i in 0..8 {
        store
            .add(memory(&format!("n{}", i), &format!("note number {}", i), "note"))
            .unwrap();
    }

    let results = store.query("note", None).unwrap();
    assert_eq!(results.len(), 5);
}

#[test]
fn test_separate_collections_do_not_share_records() {
    let project = project_with(&[]);
    let store = open_store(project.path());
    store.add(memory("only-here", "text", "note")).unwrap();

    let settings = MemorySettings::for_project(project.path()).with_collection("other_notes");
    let mut other = MemoryStore::connect(settings).unwrap();
    other.create_or_get_collection().unwrap();
    assert_eq!(other.count().unwrap(), 1);
    assert_eq!(store.count().unwrap(), 2);
}
