//! Public result and option types.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::DEFAULT_MAX_CONCURRENT;
use crate::error_handling::ValidationFailure;

/// Options for a validation call.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Validations in flight at once for batch calls. 0 is treated as 1.
    pub max_concurrent: usize,
    /// Serve fresh cached results. When false the full pipeline always runs
    /// (an accessible result still refreshes the cache).
    pub use_cache: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            use_cache: true,
        }
    }
}

/// Merged outcome of one website validation.
///
/// This is what callers receive and what the cache stores. Fields belonging to
/// stages that never ran (because an earlier stage failed) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub is_accessible: bool,
    pub original_url: String,
    pub normalized_url: Option<String>,
    pub dns_resolvable: Option<bool>,
    pub status_code: Option<u16>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub is_valid_content_type: Option<bool>,
    pub redirect_count: u32,
    pub below_min_response_size: bool,
    pub error: Option<ValidationFailure>,
    pub validation_time_ms: u64,
    pub validated_at: DateTime<Utc>,
    pub from_cache: bool,
}

impl ValidationResult {
    /// A result with nothing but the original URL filled in.
    pub(crate) fn new(original_url: &str) -> Self {
        Self {
            is_valid: false,
            is_accessible: false,
            original_url: original_url.to_string(),
            normalized_url: None,
            dns_resolvable: None,
            status_code: None,
            content_type: None,
            content_length: None,
            is_valid_content_type: None,
            redirect_count: 0,
            below_min_response_size: false,
            error: None,
            validation_time_ms: 0,
            validated_at: Utc::now(),
            from_cache: false,
        }
    }

    /// Human-readable reason for a failed validation.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}

/// Snapshot of the result cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub total_cached: usize,
    pub active_cached: usize,
    pub expired_cached: usize,
}

/// Cache statistics plus its configuration, as reported by
/// [`WebsiteValidator::validation_statistics`](crate::WebsiteValidator::validation_statistics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStatistics {
    pub total_cached: usize,
    pub active_cached: usize,
    pub expired_cached: usize,
    pub cache_size: usize,
    #[serde(with = "duration_millis")]
    pub cache_duration: Duration,
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
