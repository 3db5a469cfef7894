//! Configuration constants.
//!
//! This module defines the compiled-in parameters of the validation pipeline:
//! timeouts, redirect and size limits, cache lifetimes and the allow/deny lists.

use std::time::Duration;

/// Timeout for a single HTTP `HEAD` hop.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Maximum number of redirect hops to follow.
///
/// Reaching a further redirect once this many hops have been taken is a
/// terminal failure.
pub const MAX_REDIRECTS: u32 = 5;

/// How long a successful validation stays fresh in the result cache.
pub const CACHE_DURATION: Duration = Duration::from_secs(30 * 60);

/// Interval of the background sweep that drops stale cache entries.
pub const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Responses advertising fewer bytes than this are flagged (not rejected).
pub const MIN_RESPONSE_SIZE: u64 = 100;

// Network operation timeouts
/// DNS query timeout in seconds
/// Bounds the lookup separately from the HTTP budget so a slow resolver
/// cannot stretch a validation indefinitely.
pub const DNS_TIMEOUT_SECS: u64 = 5;

/// Maximum URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Default number of validations in flight for batch calls.
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Content types considered a valid website response (substring match).
pub const ALLOWED_CONTENT_TYPES: &[&str] = &["text/html", "text/plain", "application/xhtml+xml"];

/// Hosts that are never validated.
///
/// A host is blocked when it equals an entry or starts with it, so `10.`
/// covers the whole `10.0.0.0/8` range and `example.com` also covers
/// `example.com.au`.
pub const BLOCKED_DOMAINS: &[&str] = &[
    "localhost",
    "127.0.0.1",
    "0.0.0.0",
    "192.168.",
    "10.",
    "172.16.",
    "example.com",
    "test.com",
    "invalid.com",
];

/// Default User-Agent string for HTTP requests.
///
/// Mimics a current Chrome on Windows; some sites answer `HEAD` requests from
/// unknown agents with 403.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
