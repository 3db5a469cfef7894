//! URL normalization and allow/deny checks.
//!
//! Turns a raw, user-supplied URL into a canonical `http(s)://` form and
//! rejects anything the validator must never touch: other schemes, empty hosts,
//! loopback/private hosts and sentinel domains. Pure string work, no I/O.

use log::debug;
use url::{Host, Url};

use crate::config::{BLOCKED_DOMAINS, MAX_URL_LENGTH};
use crate::error_handling::ValidationFailure;

/// Outcome of [`normalize_url`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedUrl {
    pub is_valid: bool,
    /// Cleaned string form (trimmed, lower-cased, trailing slashes removed,
    /// scheme added). Present whenever the input got far enough to be cleaned.
    pub normalized: Option<String>,
    pub parsed_url: Option<Url>,
    pub error: Option<ValidationFailure>,
}

impl NormalizedUrl {
    fn invalid(normalized: Option<String>, error: ValidationFailure) -> Self {
        Self {
            is_valid: false,
            normalized,
            parsed_url: None,
            error: Some(error),
        }
    }

    /// Hostname to resolve: the domain, or the bare IP address (IPv6
    /// without brackets).
    pub fn hostname(&self) -> Option<String> {
        self.parsed_url.as_ref()?.host().map(|host| match host {
            Host::Domain(domain) => domain.to_string(),
            Host::Ipv4(ip) => ip.to_string(),
            Host::Ipv6(ip) => ip.to_string(),
        })
    }
}

/// Normalizes and checks a raw URL.
///
/// Steps, in order: trim and lower-case, strip trailing slashes, prepend
/// `https://` when no scheme is present, parse, then reject non-http(s)
/// schemes, empty hosts and blocked hosts.
///
/// # Examples
///
/// ```
/// use website_validator::normalize_url;
///
/// let n = normalize_url("Example.org/Page/");
/// assert!(n.is_valid);
/// assert_eq!(n.normalized.as_deref(), Some("https://example.org/page"));
///
/// assert!(!normalize_url("http://localhost:3000").is_valid);
/// ```
pub fn normalize_url(raw: &str) -> NormalizedUrl {
    let cleaned = raw.trim().to_lowercase();

    if cleaned.is_empty() {
        return NormalizedUrl::invalid(None, ValidationFailure::format("URL is empty"));
    }

    if cleaned.len() > MAX_URL_LENGTH {
        return NormalizedUrl::invalid(
            None,
            ValidationFailure::format(format!(
                "URL exceeds maximum length ({} > {})",
                cleaned.len(),
                MAX_URL_LENGTH
            )),
        );
    }

    let stripped = cleaned.trim_end_matches('/');
    let normalized = if stripped.contains("://") {
        stripped.to_string()
    } else {
        format!("https://{stripped}")
    };

    let parsed = match Url::parse(&normalized) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Failed to parse URL {normalized}: {e}");
            return NormalizedUrl::invalid(
                Some(normalized),
                ValidationFailure::format("Invalid URL format"),
            );
        }
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return NormalizedUrl::invalid(
            Some(normalized),
            ValidationFailure::format("Only HTTP and HTTPS protocols are allowed"),
        );
    }

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => {
            return NormalizedUrl::invalid(
                Some(normalized),
                ValidationFailure::format("URL has no host"),
            );
        }
    };

    if is_blocked_host(&host) {
        return NormalizedUrl::invalid(
            Some(normalized),
            ValidationFailure::format(format!("Domain '{host}' is not allowed")),
        );
    }

    NormalizedUrl {
        is_valid: true,
        normalized: Some(normalized),
        parsed_url: Some(parsed),
        error: None,
    }
}

/// Returns true when `host` equals or starts with a blocked entry.
pub(crate) fn is_blocked_host(host: &str) -> bool {
    BLOCKED_DOMAINS
        .iter()
        .any(|blocked| host == *blocked || host.starts_with(blocked))
}
