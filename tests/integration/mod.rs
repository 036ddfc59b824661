//! Integration Tests Module
//!
//! End-to-end tests against real on-disk stores in temporary project
//! directories: collection lifecycle, decision import, stats reporting,
//! export round-trips and path safety.

// Shared helpers
mod common;

// Collection lifecycle and similarity queries
mod memory_store_test;

// Decision import from documentation files
mod importer_test;

// memory-stats reporting
mod stats_test;

// Export and path-safety checks
mod export_test;
