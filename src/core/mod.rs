//! Core walk functionality
//!
//! Discovery, filtering, actions, reporting, and the pipeline that runs
//! them in order.

// Internal modules - not part of public API
pub(crate) mod action;
pub(crate) mod batch;
pub(crate) mod config;
pub(crate) mod filter;
pub(crate) mod report;
pub(crate) mod stats;
pub(crate) mod walk;

// Test modules
#[cfg(test)]
mod stats_tests;

// Public API - curated exports only
pub mod api;

// Re-export key items at module level for convenience
pub use api::*;
