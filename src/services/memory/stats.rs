//! Memory Statistics
//!
//! Counts the records of a collection by their `type` metadata. Runs
//! independently of `MemoryStore`: it never creates or seeds a collection.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::record::UNKNOWN_TYPE;
use crate::models::settings::MemorySettings;
use crate::models::stats::StatsReport;
use crate::services::vector_store::{Metadata, VectorClient};
use crate::utils::error::{AppError, AppResult};

/// Produces a [`StatsReport`] for the configured collection
#[derive(Debug, Clone)]
pub struct StatsReporter {
    settings: MemorySettings,
}

impl StatsReporter {
    pub fn new(settings: MemorySettings) -> Self {
        Self { settings }
    }

    /// Connect, count and report. Failures become an `error` report.
    pub fn run(&self) -> StatsReport {
        let name = &self.settings.collection_name;
        tracing::debug!(data_dir = %self.settings.data_dir.display(), "stats: connecting");

        let result = VectorClient::persistent(&self.settings.data_dir)
            .and_then(|client| self.report_with(&client));

        match result {
            Ok(report) => report,
            Err(e) => {
                tracing::debug!(error = %e, "stats: failed");
                StatsReport::error(name.as_str(), e.to_string())
            }
        }
    }

    /// Report against an already opened client
    pub fn report_with(&self, client: &VectorClient) -> AppResult<StatsReport> {
        let name = &self.settings.collection_name;

        tracing::debug!(collection = %name, "stats: looking up collection");
        let collection = match client.get_collection(name) {
            Ok(collection) => collection,
            Err(AppError::NotFound(_)) => {
                tracing::debug!(collection = %name, "stats: collection not created yet");
                return Ok(StatsReport::new_collection(name.as_str()));
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(limit = self.settings.stats_fetch_limit, "stats: fetching metadata");
        let metadatas = collection.metadatas(Some(self.settings.stats_fetch_limit))?;

        let by_type = tally_by_type(&metadatas);
        tracing::debug!(types = by_type.len(), "stats: tallied");
        Ok(StatsReport::success(name.as_str(), by_type))
    }
}

/// Count entries per `type` value; missing or non-string types count as
/// `unknown`.
pub fn tally_by_type(metadatas: &[Metadata]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for metadata in metadatas {
        let memory_type = metadata
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_TYPE);
        *counts.entry(memory_type.to_string()).or_insert(0) += 1;
    }
    counts
}
