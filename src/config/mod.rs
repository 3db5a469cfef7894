//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, allow/deny lists)
//! - The runtime `ValidatorConfig`
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, ValidatorConfig};
