//! Project Memory
//!
//! Persistent memory for one project directory.
//!
//! ## Module Structure
//!
//! - `store` - `MemoryStore` facade: open the collection, add, query, list, export
//! - `importer` - Decision headings imported from existing documentation
//! - `stats` - Record counts by type for `memory-stats`

pub mod importer;
pub mod stats;
pub mod store;

pub use importer::{DecisionImporter, ImportSummary, DECISION_CANDIDATES};
pub use stats::{tally_by_type, StatsReporter};
pub use store::{MemoryStore, SEED_RECORD_ID};
