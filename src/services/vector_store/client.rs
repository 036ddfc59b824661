//! Vector Store Client
//!
//! Entry point to a store directory: opens the database and hands out
//! collection handles.

use std::path::Path;

use rusqlite::{params, OptionalExtension};

use super::collection::{Collection, Metadata};
use crate::models::settings::validate_collection_name;
use crate::storage::database::Database;
use crate::utils::error::{AppError, AppResult};

/// Client for one store
#[derive(Debug, Clone)]
pub struct VectorClient {
    db: Database,
}

impl VectorClient {
    /// Open the persistent store in `data_dir`, creating it if needed
    pub fn persistent(data_dir: &Path) -> AppResult<Self> {
        let db = Database::open(data_dir).map_err(|e| {
            AppError::connection(format!(
                "Failed to open store at {}: {}",
                data_dir.display(),
                e
            ))
        })?;
        Ok(Self { db })
    }

    /// Open a throwaway in-memory store
    pub fn in_memory() -> AppResult<Self> {
        let db = Database::new_in_memory()
            .map_err(|e| AppError::connection(format!("Failed to open in-memory store: {}", e)))?;
        Ok(Self { db })
    }

    /// Look up an existing collection
    pub fn get_collection(&self, name: &str) -> AppResult<Collection> {
        let conn = self.db.get_connection()?;
        let id = conn
            .query_row(
                "SELECT id FROM collections WHERE name = ?1",
                params![name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .ok_or_else(|| AppError::not_found(format!("Collection '{}' does not exist", name)))?;

        Ok(Collection::new(self.db.clone(), id, name.to_string()))
    }

    /// Create a new collection.
    ///
    /// Fails with `Validation` for a malformed name and `Database` if the
    /// name is taken.
    pub fn create_collection(&self, name: &str, metadata: Metadata) -> AppResult<Collection> {
        validate_collection_name(name).map_err(AppError::validation)?;

        let conn = self.db.get_connection()?;
        let metadata_json = serde_json::to_string(&metadata)?;
        conn.execute(
            "INSERT INTO collections (name, metadata) VALUES (?1, ?2)",
            params![name, metadata_json],
        )
        .map_err(|e| AppError::database(format!("Failed to create collection '{}': {}", name, e)))?;
        let id = conn.last_insert_rowid();

        tracing::info!(collection = name, "created collection");
        Ok(Collection::new(self.db.clone(), id, name.to_string()))
    }
}
