//! Utility Functions
//!
//! Errors, well-known paths, timestamps, console output and logging setup.

pub mod console;
pub mod error;
pub mod logging;
pub mod paths;
pub mod time;

pub use error::*;
pub use paths::*;
