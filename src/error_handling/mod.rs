//! Error handling and failure statistics.
//!
//! This module provides:
//! - The closed set of failure kinds a validation can end in
//! - Initialization error types
//! - Per-kind failure counters

mod stats;
mod types;

// Re-export public API
pub use stats::FailureStats;
pub use types::{FailureKind, InitializationError, ValidationFailure};
