//! Path Utilities
//!
//! Well-known locations inside a project: the store directory, the database
//! file inside it, and the optional project config file.

use std::path::{Path, PathBuf};

use crate::utils::error::AppResult;

/// Store directory created under the project root
pub const DATA_DIR_NAME: &str = ".chroma";

/// SQLite file inside the store directory
pub const DATABASE_FILE_NAME: &str = "memory.sqlite3";

/// Optional per-project configuration file
pub const CONFIG_FILE_NAME: &str = ".project-memory.json";

/// Get the default store directory (`<project>/.chroma`)
pub fn default_data_dir(project_root: &Path) -> PathBuf {
    project_root.join(DATA_DIR_NAME)
}

/// Get the database file path inside a store directory
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE_NAME)
}

/// Get the project config file path (`<project>/.project-memory.json`)
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Project name as shown to users: the last component of the root
pub fn project_name(project_root: &Path) -> String {
    project_root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
