//! Stats Models
//!
//! The single JSON object printed by `memory-stats`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of a stats run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsStatus {
    /// The collection does not exist yet
    NewCollection,
    Success,
    Error,
}

/// Record counts for one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub collection: String,
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub status: StatsStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatsReport {
    /// Report for a collection that has not been created yet
    pub fn new_collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            total: 0,
            by_type: BTreeMap::new(),
            status: StatsStatus::NewCollection,
            error: None,
        }
    }

    /// Report built from per-type counts
    pub fn success(collection: impl Into<String>, by_type: BTreeMap<String, usize>) -> Self {
        Self {
            collection: collection.into(),
            total: by_type.values().sum(),
            by_type,
            status: StatsStatus::Success,
            error: None,
        }
    }

    /// Report for a failed run
    pub fn error(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            total: 0,
            by_type: BTreeMap::new(),
            status: StatsStatus::Error,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == StatsStatus::Error
    }

    /// Process exit code for this report: 1 on error, 0 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.is_error() {
            1
        } else {
            0
        }
    }
}
