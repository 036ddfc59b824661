//! Collections
//!
//! A named set of records inside the vector store. Records are immutable
//! once added and are always returned in insertion order.

use std::cmp::Ordering;

use rusqlite::ffi::{SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE};
use rusqlite::params;
use serde_json::{Map, Value};

use super::embedding::{cosine_similarity, Vocabulary};
use crate::storage::database::Database;
use crate::utils::error::{AppError, AppResult};

/// Metadata object attached to a record or collection
pub type Metadata = Map<String, Value>;

/// A record as held by the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: String,
    pub document: String,
    pub metadata: Metadata,
}

/// A record returned by a similarity query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: StoredRecord,
    /// `1 - cosine similarity` between the query and the document
    pub distance: f32,
}

/// Handle to one collection
#[derive(Debug, Clone)]
pub struct Collection {
    db: Database,
    id: i64,
    name: String,
}

impl Collection {
    pub(crate) fn new(db: Database, id: i64, name: String) -> Self {
        Self { db, id, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of records in the collection
    pub fn count(&self) -> AppResult<usize> {
        let conn = self.db.get_connection()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM records WHERE collection_id = ?1",
            params![self.id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Add one record.
    ///
    /// Fails with `DuplicateId` if the id is already present; the stored
    /// record is left untouched. Other constraint failures surface as
    /// database errors.
    pub fn add(&self, id: &str, document: &str, metadata: &Metadata) -> AppResult<()> {
        let conn = self.db.get_connection()?;
        let metadata_json = serde_json::to_string(metadata)?;

        let result = conn.execute(
            "INSERT INTO records (collection_id, id, document, metadata) VALUES (?1, ?2, ?3, ?4)",
            params![self.id, id, document, metadata_json],
        );

        match result {
            Ok(_) => {
                tracing::debug!(collection = %self.name, id, "added record");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == SQLITE_CONSTRAINT_UNIQUE
                    || err.extended_code == SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                Err(AppError::DuplicateId(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Records in insertion order, at most `limit` of them
    pub fn get(&self, limit: Option<usize>) -> AppResult<Vec<StoredRecord>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, document, metadata FROM records
             WHERE collection_id = ?1 ORDER BY seq LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![self.id, sql_limit(limit)], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, document, metadata) = row?;
            records.push(StoredRecord {
                metadata: parse_metadata(&id, &metadata),
                id,
                document,
            });
        }
        Ok(records)
    }

    /// Metadata of the records in insertion order, at most `limit` entries
    pub fn metadatas(&self, limit: Option<usize>) -> AppResult<Vec<Metadata>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, metadata FROM records
             WHERE collection_id = ?1 ORDER BY seq LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![self.id, sql_limit(limit)], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut metadatas = Vec::new();
        for row in rows {
            let (id, metadata) = row?;
            metadatas.push(parse_metadata(&id, &metadata));
        }
        Ok(metadatas)
    }

    /// The `n_results` records most similar to `text`, closest first.
    ///
    /// Embeddings are computed against a vocabulary built from the current
    /// documents. Equal distances keep insertion order.
    pub fn query(&self, text: &str, n_results: usize) -> AppResult<Vec<ScoredRecord>> {
        if n_results == 0 {
            return Ok(Vec::new());
        }

        let records = self.get(None)?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let vocab = Vocabulary::build(
            &records
                .iter()
                .map(|r| r.document.as_str())
                .collect::<Vec<_>>(),
        );
        let query_vector = vocab.embed(text);

        let mut scored: Vec<ScoredRecord> = records
            .into_iter()
            .map(|record| {
                let similarity = cosine_similarity(&query_vector, &vocab.embed(&record.document));
                ScoredRecord {
                    record,
                    distance: 1.0 - similarity,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(n_results);

        tracing::debug!(
            collection = %self.name,
            results = scored.len(),
            dimension = vocab.dimension(),
            "similarity query"
        );
        Ok(scored)
    }
}

/// SQLite treats a negative LIMIT as unbounded
fn sql_limit(limit: Option<usize>) -> i64 {
    limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX))
}

fn parse_metadata(id: &str, raw: &str) -> Metadata {
    match serde_json::from_str::<Metadata>(raw) {
        Ok(map) => map,
        Err(e) => {
            tracing::debug!(id, error = %e, "unreadable record metadata");
            Metadata::new()
        }
    }
}
