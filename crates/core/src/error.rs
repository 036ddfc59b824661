//! Core Error Types
//!
//! Defines the foundational error types used across the Project Memory
//! workspace. Kept to thiserror + std so the core crate stays lightweight.
//!
//! The main crate wraps these in `AppError::Core` and adds the store,
//! database, and serialization variants.

use std::fmt;

use thiserror::Error;

/// Why a candidate path was refused by the path validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRejection {
    /// The candidate contains a denylisted sequence (`..`, `~`, `$`, backtick)
    SuspiciousSequence(&'static str),
    /// The resolved path is not inside the base directory
    OutsideBase,
    /// The path (or the base) could not be resolved
    Unresolvable(String),
}

impl fmt::Display for PathRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRejection::SuspiciousSequence(seq) => {
                write!(f, "contains suspicious sequence '{}'", seq)
            }
            PathRejection::OutsideBase => write!(f, "is outside project directory"),
            PathRejection::Unresolvable(reason) => write!(f, "cannot be resolved: {}", reason),
        }
    }
}

/// Core error type for the Project Memory workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Path-safety violations
    #[error("Path '{path}' {reason}")]
    PathRejected { path: String, reason: PathRejection },

    /// File exceeds the ingestion size ceiling
    #[error("File too large: {path} is {size} bytes (max: {max})")]
    FileTooLarge { path: String, size: u64, max: u64 },

    /// File content is not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a path rejection error
    pub fn path_rejected(path: impl Into<String>, reason: PathRejection) -> Self {
        Self::PathRejected {
            path: path.into(),
            reason,
        }
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// True for path-safety violations
    pub fn is_path_rejection(&self) -> bool {
        matches!(self, CoreError::PathRejected { .. })
    }
}
