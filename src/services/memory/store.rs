//! Project Memory Store
//!
//! Facade over the vector store for one project: opens the project's
//! collection (seeding it on first use) and exposes add, query, listing and
//! export of memory records.

use std::path::{Path, PathBuf};

use chrono::Local;
use project_memory_core::{BoundedFileReader, PathValidator};
use project_memory_detector::{detect_project_type, ProjectType};
use serde_json::Value;

use crate::models::export::{ExportSummary, ExportedMemory, MemoryExport};
use crate::models::record::{
    CollectionStatus, MemoryMetadata, MemoryRecord, NewMemory, QueryMatch, DECISION_TYPE,
    UNKNOWN_TYPE,
};
use crate::models::settings::MemorySettings;
use crate::services::vector_store::{Collection, Metadata, StoredRecord, VectorClient};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{ensure_dir, project_name};
use crate::utils::time::format_iso;

/// Id of the record written when a collection is created
pub const SEED_RECORD_ID: &str = "project-init";

/// Memory store for one project
#[derive(Debug)]
pub struct MemoryStore {
    settings: MemorySettings,
    project_root: PathBuf,
    project_name: String,
    client: VectorClient,
    collection: Option<Collection>,
}

impl MemoryStore {
    /// Connect to the persistent store described by `settings`.
    ///
    /// The project root must exist; the store directory is created on demand.
    pub fn connect(settings: MemorySettings) -> AppResult<Self> {
        let project_root = canonical_root(&settings)?;
        let client = VectorClient::persistent(&settings.data_dir)?;
        Ok(Self::build(settings, project_root, client))
    }

    /// Build a store around an already opened client
    pub fn with_client(settings: MemorySettings, client: VectorClient) -> AppResult<Self> {
        let project_root = canonical_root(&settings)?;
        Ok(Self::build(settings, project_root, client))
    }

    fn build(settings: MemorySettings, project_root: PathBuf, client: VectorClient) -> Self {
        let project_name = project_name(&project_root);

        tracing::debug!(
            project = %project_name,
            data_dir = %settings.data_dir.display(),
            "connected to memory store"
        );

        Self {
            settings,
            project_root,
            project_name,
            client,
            collection: None,
        }
    }

    /// Open the configured collection, creating and seeding it if missing.
    ///
    /// Calling this again on an existing collection never adds records.
    pub fn create_or_get_collection(&mut self) -> AppResult<CollectionStatus> {
        let name = self.settings.collection_name.clone();

        match self.client.get_collection(&name) {
            Ok(collection) => {
                let count = collection.count()?;
                tracing::debug!(collection = %name, count, "using existing collection");
                self.collection = Some(collection);
                Ok(CollectionStatus::Existing { count })
            }
            Err(AppError::NotFound(_)) => {
                let mut metadata = Metadata::new();
                metadata.insert("project".into(), Value::String(self.project_name.clone()));
                let collection = self.client.create_collection(&name, metadata)?;

                let seeded = match self.seed(&collection) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(collection = %name, error = %e, "failed to seed collection");
                        false
                    }
                };
                self.collection = Some(collection);
                Ok(CollectionStatus::Created { seeded })
            }
            Err(e) => Err(e),
        }
    }

    /// Write the initial record describing the project
    fn seed(&self, collection: &Collection) -> AppResult<()> {
        let project_type = match detect_project_type(&self.project_root) {
            Ok(result) => result.project_type,
            Err(e) => {
                tracing::debug!(error = %e, "project type detection failed");
                ProjectType::General
            }
        };

        let memory = NewMemory {
            id: SEED_RECORD_ID.to_string(),
            document: format!(
                "{}: {} project initialized with persistent memory",
                self.project_name,
                project_type.display_name()
            ),
            memory_type: DECISION_TYPE.to_string(),
            tags: "setup,init".to_string(),
            source: "init".to_string(),
        };
        insert(collection, memory)?;
        Ok(())
    }

    /// Add one memory, stamped with the current local time
    pub fn add(&self, memory: NewMemory) -> AppResult<MemoryRecord> {
        insert(self.collection()?, memory)
    }

    /// The `top_k` memories closest to `text`, closest first.
    ///
    /// `None` uses the configured default.
    pub fn query(&self, text: &str, top_k: Option<usize>) -> AppResult<Vec<QueryMatch>> {
        let top_k = top_k.unwrap_or(self.settings.default_top_k);
        if top_k == 0 {
            return Err(AppError::validation("top_k must be at least 1"));
        }

        let matches = self
            .collection()?
            .query(text, top_k)?
            .into_iter()
            .map(|scored| QueryMatch {
                record: to_memory_record(scored.record),
                distance: scored.distance,
            })
            .collect();
        Ok(matches)
    }

    /// Every memory in insertion order
    pub fn list_all(&self) -> AppResult<Vec<MemoryRecord>> {
        let records = self.collection()?.get(None)?;
        Ok(records.into_iter().map(to_memory_record).collect())
    }

    pub fn count(&self) -> AppResult<usize> {
        self.collection()?.count()
    }

    /// Export all memories as pretty JSON to `relative_path` inside the
    /// project root, or to the configured export file.
    ///
    /// The path is validated before anything is fetched or written. Record
    /// metadata is written as stored.
    pub fn export(&self, relative_path: Option<&str>) -> AppResult<ExportSummary> {
        let relative = relative_path.unwrap_or(&self.settings.export_file);
        let validator = PathValidator::new(&self.project_root)?;
        let path = validator.validate(relative)?;

        let memories = self
            .collection()?
            .get(None)?
            .into_iter()
            .map(|stored| ExportedMemory {
                id: stored.id,
                document: stored.document,
                metadata: stored.metadata,
            })
            .collect();
        let export = MemoryExport {
            project: self.project_name.clone(),
            exported_at: format_iso(&Local::now()),
            collection: self.settings.collection_name.clone(),
            memories,
        };

        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(&export)?;
        std::fs::write(&path, json)?;

        tracing::info!(path = %path.display(), count = export.memories.len(), "exported memories");
        Ok(ExportSummary {
            path,
            count: export.memories.len(),
        })
    }

    /// Parse a file written by [`MemoryStore::export`]
    pub fn read_export(path: &Path) -> AppResult<MemoryExport> {
        let content = BoundedFileReader::default().read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Canonical project root
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn settings(&self) -> &MemorySettings {
        &self.settings
    }

    pub fn collection_name(&self) -> &str {
        &self.settings.collection_name
    }

    fn collection(&self) -> AppResult<&Collection> {
        self.collection.as_ref().ok_or(AppError::CollectionNotReady)
    }
}

fn canonical_root(settings: &MemorySettings) -> AppResult<PathBuf> {
    settings.project_root.canonicalize().map_err(|e| {
        AppError::connection(format!(
            "Project path '{}' is not accessible: {}",
            settings.project_root.display(),
            e
        ))
    })
}

fn insert(collection: &Collection, memory: NewMemory) -> AppResult<MemoryRecord> {
    let record = MemoryRecord {
        id: memory.id,
        document: memory.document,
        metadata: MemoryMetadata {
            memory_type: memory.memory_type,
            tags: memory.tags,
            source: memory.source,
            timestamp: Some(format_iso(&Local::now())),
        },
    };

    let metadata = match serde_json::to_value(&record.metadata)? {
        Value::Object(map) => map,
        _ => return Err(AppError::internal("record metadata is not a JSON object")),
    };
    collection.add(&record.id, &record.document, &metadata)?;
    Ok(record)
}

/// Convert a stored record, reading missing or non-string fields leniently
fn to_memory_record(stored: StoredRecord) -> MemoryRecord {
    let text = |key: &str| {
        stored
            .metadata
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    MemoryRecord {
        metadata: MemoryMetadata {
            memory_type: text("type").unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
            tags: text("tags").unwrap_or_default(),
            source: text("source").unwrap_or_default(),
            timestamp: text("timestamp"),
        },
        id: stored.id,
        document: stored.document,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_in(dir: &Path) -> MemoryStore {
        let settings = MemorySettings::for_project(dir);
        MemoryStore::with_client(settings, VectorClient::in_memory().unwrap()).unwrap()
    }

    fn note(id: &str, document: &str) -> NewMemory {
        NewMemory {
            id: id.into(),
            document: document.into(),
            memory_type: "note".into(),
            tags: "test".into(),
            source: "unit".into(),
        }
    }

    #[test]
    fn test_operations_require_open_collection() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        assert!(matches!(store.count(), Err(AppError::CollectionNotReady)));
        assert!(matches!(
            store.add(note("a", "doc")),
            Err(AppError::CollectionNotReady)
        ));
    }

    #[test]
    fn test_new_collection_is_seeded_with_project_type() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("Cargo.toml"), "[package]").unwrap();
        let mut store = store_in(temp.path());

        let status = store.create_or_get_collection().unwrap();
        assert_eq!(status, CollectionStatus::Created { seeded: true });

        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 1);
        let seed = &records[0];
        assert_eq!(seed.id, SEED_RECORD_ID);
        assert_eq!(seed.metadata.memory_type, "decision");
        assert_eq!(seed.metadata.tags, "setup,init");
        assert_eq!(seed.metadata.source, "init");
        assert_eq!(
            seed.document,
            format!(
                "{}: Rust project initialized with persistent memory",
                store.project_name()
            )
        );
    }

    #[test]
    fn test_second_open_reuses_collection() {
        let temp = tempfile::tempdir().unwrap();
        let client = VectorClient::in_memory().unwrap();
        let settings = MemorySettings::for_project(temp.path());

        let mut first = MemoryStore::with_client(settings.clone(), client.clone()).unwrap();
        first.create_or_get_collection().unwrap();

        let mut second = MemoryStore::with_client(settings, client).unwrap();
        let status = second.create_or_get_collection().unwrap();
        assert_eq!(status, CollectionStatus::Existing { count: 1 });
        assert_eq!(second.count().unwrap(), 1);
    }

    #[test]
    fn test_add_stamps_timestamp() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(temp.path());
        store.create_or_get_collection().unwrap();

        let record = store.add(note("n1", "remember this")).unwrap();
        assert!(record.metadata.timestamp.is_some());
        assert_eq!(store.count().unwrap(), 2);

        let err = store.add(note("n1", "again")).unwrap_err();
        assert_eq!(err.kind(), "duplicate_id");
    }

    #[test]
    fn test_query_respects_top_k() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(temp.path());
        store.create_or_get_collection().unwrap();
        store.add(note("db", "Use SQLite for local storage")).unwrap();
        store.add(note("ui", "Prefer a terminal interface")).unwrap();

        let results = store.query("sqlite storage", Some(1)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.id, "db");

        assert!(store.query("sqlite", Some(0)).is_err());
    }

    #[test]
    fn test_export_rejects_unsafe_path_without_writing() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(temp.path());
        store.create_or_get_collection().unwrap();

        let err = store.export(Some("../escape.json")).unwrap_err();
        assert!(err.is_path_rejection());
        assert!(!temp.path().parent().unwrap().join("escape.json").exists());
    }

    #[test]
    fn test_export_default_file() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = store_in(temp.path());
        store.create_or_get_collection().unwrap();

        let summary = store.export(None).unwrap();
        assert_eq!(summary.count, 1);
        assert!(summary.path.ends_with("memories_export.json"));

        let export = MemoryStore::read_export(&summary.path).unwrap();
        assert_eq!(export.collection, "project_memory");
        assert_eq!(export.memories[0].id, SEED_RECORD_ID);
    }

    #[test]
    fn test_export_keeps_stored_metadata_verbatim() {
        let temp = tempfile::tempdir().unwrap();
        let client = VectorClient::in_memory().unwrap();
        let mut store =
            MemoryStore::with_client(MemorySettings::for_project(temp.path()), client.clone())
                .unwrap();
        store.create_or_get_collection().unwrap();

        let mut legacy = Metadata::new();
        legacy.insert("tags".into(), Value::from("old"));
        legacy.insert("priority".into(), Value::from(3));
        client
            .get_collection("project_memory")
            .unwrap()
            .add("legacy", "written by another tool", &legacy)
            .unwrap();

        let summary = store.export(Some("out.json")).unwrap();
        let export = MemoryStore::read_export(&summary.path).unwrap();
        let exported = &export.memories[1];
        assert_eq!(exported.id, "legacy");
        assert_eq!(exported.metadata, legacy);
        assert!(!exported.metadata.contains_key("type"));

        // listing still reads the record leniently
        assert_eq!(store.list_all().unwrap()[1].metadata.memory_type, "unknown");
    }

    #[test]
    fn test_lenient_record_conversion() {
        let mut metadata = Metadata::new();
        metadata.insert("type".into(), Value::from(7));
        let record = to_memory_record(StoredRecord {
            id: "x".into(),
            document: "doc".into(),
            metadata,
        });
        assert_eq!(record.metadata.memory_type, "unknown");
        assert_eq!(record.metadata.tags, "");
        assert!(record.metadata.timestamp.is_none());
    }
}
