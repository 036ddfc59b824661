//! Export and Path Safety Integration Tests

use project_memory::services::vector_store::Metadata;
use project_memory::{MemoryStore, VectorClient};
use serde_json::json;

use crate::common::{memory, open_store, project_with};

#[test]
fn test_export_round_trip() {
    let project = project_with(&[]);
    let store = open_store(project.path());
    store.add(memory("a", "Use trunk-based development", "decision")).unwrap();
    store.add(memory("b", "CI runs on every push", "note")).unwrap();

    let summary = store.export(Some("exports/memories.json")).unwrap();
    assert_eq!(summary.count, 3);
    assert!(summary.path.starts_with(project.path().canonicalize().unwrap()));

    let export = MemoryStore::read_export(&summary.path).unwrap();
    assert_eq!(export.project, store.project_name());
    assert_eq!(export.collection, "project_memory");
    let ids: Vec<&str> = export.memories.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["project-init", "a", "b"]);
    assert_eq!(export.memories[1].document, "Use trunk-based development");
    assert_eq!(export.memories[2].metadata["type"], "note");
}

#[test]
fn test_export_preserves_foreign_metadata() {
    let project = project_with(&[]);
    let store = open_store(project.path());

    let metadata: Metadata = json!({"source": "legacy", "reviewed": true, "score": 0.5})
        .as_object()
        .cloned()
        .unwrap();
    let client = VectorClient::persistent(&store.settings().data_dir).unwrap();
    client
        .get_collection("project_memory")
        .unwrap()
        .add("untyped", "Imported from an older store", &metadata)
        .unwrap();

    let summary = store.export(None).unwrap();
    let raw = std::fs::read_to_string(&summary.path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let untyped = &value["memories"][1];
    assert_eq!(untyped["id"], "untyped");
    assert_eq!(untyped["metadata"], json!({"source": "legacy", "reviewed": true, "score": 0.5}));
    assert!(untyped["metadata"].get("type").is_none());
}

#[test]
fn test_export_file_layout() {
    let project = project_with(&[]);
    let store = open_store(project.path());

    let summary = store.export(None).unwrap();
    let raw = std::fs::read_to_string(&summary.path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert!(value["exported_at"].is_string());
    let first = &value["memories"][0];
    assert_eq!(first["id"], "project-init");
    assert_eq!(first["metadata"]["type"], "decision");
    assert_eq!(first["metadata"]["tags"], "setup,init");
    assert!(first["metadata"]["timestamp"].is_string());
}

#[test]
fn test_suspicious_export_paths_rejected() {
    let project = project_with(&[]);
    let store = open_store(project.path());

    for path in ["../out.json", "~/out.json", "$HOME/out.json", "`id`.json"] {
        let err = store.export(Some(path)).unwrap_err();
        assert!(err.is_path_rejection(), "{} should be rejected", path);
    }
}

#[test]
fn test_absolute_export_path_outside_rejected() {
    let project = project_with(&[]);
    let outside = project_with(&[]);
    let store = open_store(project.path());

    let target = outside.path().join("out.json");
    let err = store.export(Some(target.to_str().unwrap())).unwrap_err();
    assert_eq!(err.kind(), "path_rejected");
    assert!(!target.exists());
}

#[cfg(unix)]
#[test]
fn test_export_through_dangling_symlink_rejected() {
    let project = project_with(&[]);
    let outside = project_with(&[]);
    let store = open_store(project.path());

    let target = outside.path().join("leaked.json");
    std::os::unix::fs::symlink(&target, project.path().join("out.json")).unwrap();

    let err = store.export(Some("out.json")).unwrap_err();
    assert_eq!(err.kind(), "path_rejected");
    assert!(!target.exists());
}
