//! Storage Layer
//!
//! Handles persistence: the SQLite database behind the vector store and the
//! JSON project configuration.

pub mod config;
pub mod database;

pub use config::*;
pub use database::*;
