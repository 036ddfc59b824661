//! Command Layer
//!
//! Entry points for the two binaries. Commands resolve settings, call the
//! services and turn their results into console output and exit codes.

pub mod memory;
pub mod stats;

pub use memory::{MemoryArgs, Operation};
