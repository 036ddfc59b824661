//! Project Memory Core
//!
//! Foundational building blocks for the Project Memory workspace. This crate
//! has no dependency on the store, configuration, or CLI code.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`, `PathRejection`)
//! - `path_guard` - Path-safety validation against a base directory (`PathValidator`)
//! - `bounded_read` - Size-capped UTF-8 file reading (`BoundedFileReader`)

pub mod bounded_read;
pub mod error;
pub mod path_guard;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult, PathRejection};

// ── Filesystem Guards ──────────────────────────────────────────────────
pub use bounded_read::{BoundedFileReader, DEFAULT_MAX_FILE_BYTES};
pub use path_guard::{PathValidator, SUSPICIOUS_SEQUENCES};
