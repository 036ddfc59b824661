//! Export Models
//!
//! JSON document written by `--export` and read back for verification.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level export structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryExport {
    /// Project directory name
    pub project: String,
    /// ISO 8601 export timestamp
    pub exported_at: String,
    /// Collection the records came from
    pub collection: String,
    /// Every record, in insertion order
    pub memories: Vec<ExportedMemory>,
}

/// One record exactly as stored.
///
/// Metadata is carried as the stored JSON object, so records without a
/// `type` key or with extra keys export unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedMemory {
    pub id: String,
    pub document: String,
    pub metadata: Map<String, Value>,
}

/// What an export wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub count: usize,
}
