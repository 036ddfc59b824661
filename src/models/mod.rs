//! Data Models
//!
//! Contains the data structures shared by the store, the commands, and the
//! binaries.

pub mod export;
pub mod record;
pub mod settings;
pub mod stats;

pub use export::*;
pub use record::*;
pub use settings::*;
pub use stats::*;
