//! Test helpers shared by the integration tests

use std::fs;
use std::path::Path;

use project_memory::{MemorySettings, MemoryStore, NewMemory};
use tempfile::TempDir;

/// A scratch project directory with the given files
pub fn project_with(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp project");
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

/// Open the project's on-disk store with its collection ready
pub fn open_store(project: &Path) -> MemoryStore {
    let mut store = MemoryStore::connect(MemorySettings::for_project(project))
        .expect("Failed to connect to store");
    store
        .create_or_get_collection()
        .expect("Failed to open collection");
    store
}

pub fn memory(id: &str, document: &str, memory_type: &str) -> NewMemory {
    NewMemory {
        id: id.to_string(),
        document: document.to_string(),
        memory_type: memory_type.to_string(),
        tags: "test".to_string(),
        source: "integration".to_string(),
    }
}
