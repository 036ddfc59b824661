//! Project Memory
//!
//! Persistent "project memory" collections for a development tool:
//! - `project-memory` opens or seeds the project's collection and adds,
//!   lists, queries, exports or imports memory records
//! - `memory-stats` reports record counts by type as JSON
//!
//! Records live in a local vector store (`<project>/.chroma`), a SQLite file
//! with TF-IDF similarity search.

pub mod commands;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::record::{CollectionStatus, MemoryRecord, NewMemory, QueryMatch};
pub use models::settings::{MemoryConfig, MemorySettings};
pub use models::stats::{StatsReport, StatsStatus};
pub use services::memory::{DecisionImporter, ImportSummary, MemoryStore, StatsReporter};
pub use services::vector_store::VectorClient;
pub use utils::error::{AppError, AppResult};
