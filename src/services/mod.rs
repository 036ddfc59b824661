//! Services Layer
//!
//! The vector store and the project memory services built on it.

pub mod memory;
pub mod vector_store;
