//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.

use project_memory_core::CoreError;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The store could not be opened
    #[error("Connection error: {0}")]
    Connection(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(String),

    /// SQLite errors (auto-converted from rusqlite::Error)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Path-safety, size-limit and file decoding errors from the core crate
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record with this id already exists in the collection
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// A collection operation was attempted before the collection was opened
    #[error("Collection not ready: call create_or_get_collection first")]
    CollectionNotReady,

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable category name, for callers that branch on the kind of failure
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Connection(_) => "connection",
            AppError::Database(_) | AppError::Sqlite(_) => "database",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Serialization(_) => "serialization",
            AppError::Core(CoreError::PathRejected { .. }) => "path_rejected",
            AppError::Core(CoreError::FileTooLarge { .. }) => "file_too_large",
            AppError::Core(CoreError::NotFound(_)) => "not_found",
            AppError::Core(CoreError::Io(_)) => "io",
            AppError::Core(_) => "validation",
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::DuplicateId(_) => "duplicate_id",
            AppError::CollectionNotReady => "collection_not_ready",
            AppError::Internal(_) => "internal",
        }
    }

    /// True when the failure came from path-safety validation
    pub fn is_path_rejection(&self) -> bool {
        matches!(self, AppError::Core(e) if e.is_path_rejection())
    }
}
