//! Settings Models
//!
//! Configuration values for the memory tools. `MemoryConfig` is the file
//! form (`.project-memory.json`); `MemorySettings` is the fully resolved set
//! of values handed to each component at construction.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use project_memory_core::DEFAULT_MAX_FILE_BYTES;

/// Default collection name
pub const DEFAULT_COLLECTION_NAME: &str = "project_memory";

/// Default number of query results
pub const DEFAULT_TOP_K: usize = 5;

/// Upper bound on metadata entries fetched for statistics
pub const STATS_FETCH_LIMIT: usize = 100_000;

/// Default export file name, relative to the project root
pub const DEFAULT_EXPORT_FILE: &str = "memories_export.json";

/// Per-project configuration stored in `.project-memory.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Collection holding the project's memories
    pub collection_name: String,
    /// Store directory; relative paths are resolved against the project root
    pub data_dir: Option<PathBuf>,
    /// Ceiling for files read by the decision importer
    pub max_import_bytes: u64,
    /// Cap on metadata entries fetched by the stats reporter
    pub stats_fetch_limit: usize,
    /// Number of query results when none is requested
    pub default_top_k: usize,
    /// Export file, relative to the project root
    pub export_file: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            data_dir: None,
            max_import_bytes: DEFAULT_MAX_FILE_BYTES,
            stats_fetch_limit: STATS_FETCH_LIMIT,
            default_top_k: DEFAULT_TOP_K,
            export_file: DEFAULT_EXPORT_FILE.to_string(),
        }
    }
}

impl MemoryConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        validate_collection_name(&self.collection_name)?;

        if self.max_import_bytes == 0 {
            return Err("max_import_bytes must be greater than 0".to_string());
        }

        if self.stats_fetch_limit == 0 || self.stats_fetch_limit > STATS_FETCH_LIMIT {
            return Err(format!(
                "stats_fetch_limit must be between 1 and {}",
                STATS_FETCH_LIMIT
            ));
        }

        if self.default_top_k == 0 {
            return Err("default_top_k must be at least 1".to_string());
        }

        if self.export_file.trim().is_empty() {
            return Err("export_file cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Check a collection name: 3-63 characters of `[A-Za-z0-9._-]`, starting
/// and ending with an alphanumeric character.
pub fn validate_collection_name(name: &str) -> Result<(), String> {
    let len = name.chars().count();
    if !(3..=63).contains(&len) {
        return Err(format!(
            "Invalid collection name '{}': must be 3-63 characters",
            name
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(format!(
            "Invalid collection name '{}': only letters, digits, '.', '_' and '-' are allowed",
            name
        ));
    }
    let edges_ok = name.chars().next().map_or(false, |c| c.is_ascii_alphanumeric())
        && name.chars().last().map_or(false, |c| c.is_ascii_alphanumeric());
    if !edges_ok {
        return Err(format!(
            "Invalid collection name '{}': must start and end with a letter or digit",
            name
        ));
    }
    Ok(())
}

/// Fully resolved settings passed to the store, importer and reporter
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySettings {
    pub project_root: PathBuf,
    pub data_dir: PathBuf,
    pub collection_name: String,
    pub max_import_bytes: u64,
    pub stats_fetch_limit: usize,
    pub default_top_k: usize,
    pub export_file: String,
}

impl MemorySettings {
    /// Defaults for a project: `<root>/.chroma`, collection `project_memory`
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let config = MemoryConfig::default();
        Self {
            data_dir: crate::utils::paths::default_data_dir(&project_root),
            project_root,
            collection_name: config.collection_name,
            max_import_bytes: config.max_import_bytes,
            stats_fetch_limit: config.stats_fetch_limit,
            default_top_k: config.default_top_k,
            export_file: config.export_file,
        }
    }

    /// Replace the collection name
    pub fn with_collection(mut self, name: impl Into<String>) -> Self {
        self.collection_name = name.into();
        self
    }

    /// Replace the store directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

/// Output options for the CLI console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOptions {
    pub color: bool,
}
