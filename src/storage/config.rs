//! Configuration Management
//!
//! Loads the optional per-project config file and layers environment and
//! command-line overrides on top of it. The result is a `MemorySettings`
//! value that components receive explicitly; nothing downstream reads the
//! environment.
//!
//! Precedence: defaults < `.project-memory.json` < environment < CLI flags.
//! A relative store directory, from either the file or the environment, is
//! taken relative to the project root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{
    validate_collection_name, ConsoleOptions, MemoryConfig, MemorySettings,
};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, default_data_dir};

/// Environment variable overriding the collection name
pub const ENV_COLLECTION: &str = "CHROMA_COLLECTION";

/// Environment variable overriding the store directory
pub const ENV_DATA_DIR: &str = "CHROMA_DATA_DIR";

/// Conventional switch for disabling colour output
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Environment values captured once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub collection: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub no_color: bool,
}

impl EnvOverrides {
    /// Capture overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Capture overrides through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            collection: non_empty(ENV_COLLECTION),
            data_dir: non_empty(ENV_DATA_DIR).map(PathBuf::from),
            no_color: non_empty(ENV_NO_COLOR).is_some(),
        }
    }
}

/// Configuration service for one project
#[derive(Debug)]
pub struct ConfigService {
    config: MemoryConfig,
}

impl ConfigService {
    /// Load `<project>/.project-memory.json`, or defaults if it is absent
    pub fn load(project_root: &Path) -> AppResult<Self> {
        let path = config_path(project_root);
        let config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            MemoryConfig::default()
        };

        Ok(Self { config })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<MemoryConfig> {
        let content = fs::read_to_string(path)?;
        let config: MemoryConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| AppError::config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Resolve the final settings for `project_root`
    pub fn resolve(
        &self,
        project_root: &Path,
        env: &EnvOverrides,
        collection_flag: Option<&str>,
    ) -> AppResult<MemorySettings> {
        resolve_settings(project_root, &self.config, env, collection_flag)
    }
}

/// Combine file configuration, environment and CLI flag into settings
pub fn resolve_settings(
    project_root: &Path,
    config: &MemoryConfig,
    env: &EnvOverrides,
    collection_flag: Option<&str>,
) -> AppResult<MemorySettings> {
    let collection_name = collection_flag
        .map(str::to_string)
        .or_else(|| env.collection.clone())
        .unwrap_or_else(|| config.collection_name.clone());
    validate_collection_name(&collection_name).map_err(AppError::validation)?;

    let data_dir = match env.data_dir.as_ref().or(config.data_dir.as_ref()) {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => project_root.join(dir),
        None => default_data_dir(project_root),
    };

    let mut settings = MemorySettings::for_project(project_root)
        .with_collection(collection_name)
        .with_data_dir(data_dir);
    settings.max_import_bytes = config.max_import_bytes;
    settings.stats_fetch_limit = config.stats_fetch_limit;
    settings.default_top_k = config.default_top_k;
    settings.export_file = config.export_file.clone();
    Ok(settings)
}

/// Decide console colour from the flag, the environment and the terminal
pub fn console_options(no_color_flag: bool, env: &EnvOverrides, is_terminal: bool) -> ConsoleOptions {
    ConsoleOptions {
        color: !no_color_flag && !env.no_color && is_terminal,
    }
}
