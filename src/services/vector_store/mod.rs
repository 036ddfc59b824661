//! Vector Store
//!
//! Persistent collections of text records with similarity search, kept in
//! a single SQLite file per store directory.

pub mod client;
pub mod collection;
pub mod embedding;

pub use client::VectorClient;
pub use collection::{Collection, Metadata, ScoredRecord, StoredRecord};
