//! Memory Record Models

use serde::{Deserialize, Serialize};

/// Record type used by the importer and the collection seed
pub const DECISION_TYPE: &str = "decision";

/// Type reported for records stored without one
pub const UNKNOWN_TYPE: &str = "unknown";

fn unknown_type() -> String {
    UNKNOWN_TYPE.to_string()
}

/// Metadata attached to every memory record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMetadata {
    #[serde(rename = "type", default = "unknown_type")]
    pub memory_type: String,
    /// Comma-separated tags
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A stored memory: one document plus metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    pub document: String,
    pub metadata: MemoryMetadata,
}

/// Input for adding a memory; the timestamp is assigned on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemory {
    pub id: String,
    pub document: String,
    pub memory_type: String,
    pub tags: String,
    pub source: String,
}

/// One similarity search hit
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMatch {
    pub record: MemoryRecord,
    /// `1 - cosine similarity`; lower is closer
    pub distance: f32,
}

/// Outcome of opening the project collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// The collection already existed and was reused
    Existing { count: usize },
    /// The collection was created; `seeded` is false if the initial record failed
    Created { seeded: bool },
}
