//! Stats Integration Tests

use project_memory::commands::stats::report_for;
use project_memory::storage::config::EnvOverrides;
use project_memory::{MemorySettings, MemoryStore, StatsReporter, StatsStatus};

use crate::common::{memory, project_with};

#[test]
fn test_fresh_project_is_new_collection() {
    let project = project_with(&[]);
    let report = StatsReporter::new(MemorySettings::for_project(project.path())).run();

    let json = serde_json::to_string(&report).unwrap();
    assert_eq!(
        json,
        r#"{"collection":"project_memory","total":0,"by_type":{},"status":"new_collection"}"#
    );
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_counts_by_type() {
    let project = project_with(&[]);
    let settings = MemorySettings::for_project(project.path()).with_collection("typed_counts");

    {
        let mut store = MemoryStore::connect(settings.clone()).unwrap();
        store.create_or_get_collection().unwrap();
        // The seed record is a decision; add two more plus two notes
        store.add(memory("d1", "first decision", "decision")).unwrap();
        store.add(memory("d2", "second decision", "decision")).unwrap();
        store.add(memory("n1", "first note", "note")).unwrap();
        store.add(memory("n2", "second note", "note")).unwrap();
    }

    let report = StatsReporter::new(settings).run();
    assert_eq!(report.status, StatsStatus::Success);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["total"], 5);
    assert_eq!(value["by_type"], serde_json::json!({"decision": 3, "note": 2}));
    assert_eq!(value["status"], "success");
    assert!(value.get("error").is_none());
}

#[test]
fn test_env_data_dir_is_used() {
    let project = project_with(&[]);
    let store_dir = project.path().join("elsewhere");
    let settings = MemorySettings::for_project(project.path()).with_data_dir(&store_dir);
    {
        let mut store = MemoryStore::connect(settings).unwrap();
        store.create_or_get_collection().unwrap();
    }

    let env = EnvOverrides {
        data_dir: Some(store_dir),
        ..Default::default()
    };
    let report = report_for(project.path(), &env);
    assert_eq!(report.status, StatsStatus::Success);
    assert_eq!(report.total, 1);

    let default_report = report_for(project.path(), &EnvOverrides::default());
    assert_eq!(default_report.status, StatsStatus::NewCollection);
}
