//! HTTP reachability probe.
//!
//! Sends `HEAD` requests and follows redirects by hand, up to a hard bound, so
//! the number of hops is known and a loop can never run away.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use reqwest::Url;

use crate::config::ValidatorConfig;
use crate::error_handling::{FailureKind, ValidationFailure};
use crate::fetch::request::RequestHeaders;

/// Outcome of probing a URL (after following redirects).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpOutcome {
    pub is_accessible: bool,
    pub status_code: Option<u16>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub is_valid_content_type: bool,
    /// Redirect hops taken before the final answer.
    pub redirect_count: u32,
    /// Set when a successful response advertises fewer bytes than the
    /// configured minimum. Informational only.
    pub below_min_response_size: bool,
    pub error: Option<ValidationFailure>,
}

impl HttpOutcome {
    pub fn failed(error: ValidationFailure, status_code: Option<u16>, redirect_count: u32) -> Self {
        Self {
            status_code,
            redirect_count,
            error: Some(error),
            ..Default::default()
        }
    }
}

/// HTTP stage of the pipeline.
///
/// Implementations never fail: every error path is folded into the returned
/// [`HttpOutcome`].
#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn probe(&self, url: &str) -> HttpOutcome;
}

/// [`HttpProbe`] over `reqwest`.
///
/// The client must have automatic redirects disabled (see
/// [`init_probe_client`](crate::initialization::init_probe_client)); this
/// type follows them itself.
pub struct ReqwestProber {
    client: Arc<reqwest::Client>,
    timeout: Duration,
    max_redirects: u32,
    min_response_size: u64,
    allowed_content_types: Vec<String>,
}

impl ReqwestProber {
    pub fn new(client: Arc<reqwest::Client>, config: &ValidatorConfig) -> Self {
        Self {
            client,
            timeout: config.http_timeout,
            max_redirects: config.max_redirects,
            min_response_size: config.min_response_size,
            allowed_content_types: config.allowed_content_types.clone(),
        }
    }

    async fn head(&self, url: &Url) -> Result<reqwest::Response, ValidationFailure> {
        let request = RequestHeaders::apply_to_request_builder(self.client.head(url.clone()));
        // Dropping the send future on expiry aborts the in-flight request.
        match tokio::time::timeout(self.timeout, request.send()).await {
            Err(_) => Err(ValidationFailure::timeout()),
            Ok(Err(e)) if e.is_timeout() => Err(ValidationFailure::timeout()),
            Ok(Err(e)) => Err(ValidationFailure::transport(describe_error(&e))),
            Ok(Ok(response)) => Ok(response),
        }
    }
}

#[async_trait]
impl HttpProbe for ReqwestProber {
    async fn probe(&self, url: &str) -> HttpOutcome {
        let mut current = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                return HttpOutcome::failed(
                    ValidationFailure::format(format!("Invalid URL format: {e}")),
                    None,
                    0,
                )
            }
        };
        let mut redirect_count = 0u32;

        loop {
            let response = match self.head(&current).await {
                Ok(response) => response,
                Err(failure) => {
                    debug!("Probe of {current} failed: {failure}");
                    return HttpOutcome::failed(failure, None, redirect_count);
                }
            };

            let status = response.status();
            let code = status.as_u16();

            if status.is_redirection() {
                if let Some(location) = response.headers().get(LOCATION) {
                    if redirect_count >= self.max_redirects {
                        debug!("Giving up on {url} after {redirect_count} redirects");
                        return HttpOutcome::failed(
                            ValidationFailure::too_many_redirects(),
                            Some(code),
                            redirect_count,
                        );
                    }
                    let next = location
                        .to_str()
                        .ok()
                        .and_then(|loc| current.join(loc).ok());
                    match next {
                        Some(next) => {
                            debug!("Redirect {code} from {current} to {next}");
                            current = next;
                            redirect_count += 1;
                            continue;
                        }
                        None => {
                            return HttpOutcome::failed(
                                ValidationFailure::new(
                                    FailureKind::ProtocolError,
                                    "Invalid redirect location",
                                ),
                                Some(code),
                                redirect_count,
                            );
                        }
                    }
                }
            }

            if status.is_success() {
                return success_outcome(
                    code,
                    response.headers(),
                    redirect_count,
                    &self.allowed_content_types,
                    self.min_response_size,
                );
            }

            return HttpOutcome::failed(
                ValidationFailure::http_status(code),
                Some(code),
                redirect_count,
            );
        }
    }
}

/// Builds the outcome for a 2xx response from its headers.
///
/// The content type is checked against `allowed_content_types` by substring;
/// a mismatch is recorded but does not make the site inaccessible.
fn success_outcome(
    code: u16,
    headers: &HeaderMap,
    redirect_count: u32,
    allowed_content_types: &[String],
    min_response_size: u64,
) -> HttpOutcome {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let content_length = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    let is_valid_content_type = content_type.as_deref().is_some_and(|ct| {
        let ct = ct.to_lowercase();
        allowed_content_types
            .iter()
            .any(|allowed| ct.contains(allowed.as_str()))
    });

    let below_min_response_size = content_length.is_some_and(|len| len < min_response_size);
    if below_min_response_size {
        debug!("Response advertises {content_length:?} bytes, below minimum of {min_response_size}");
    }

    HttpOutcome {
        is_accessible: true,
        status_code: Some(code),
        content_type,
        content_length,
        is_valid_content_type,
        redirect_count,
        below_min_response_size,
        error: None,
    }
}

/// Flattens a reqwest error and its sources into one message.
///
/// The top-level message alone ("error sending request for url") hides the
/// socket-level cause.
fn describe_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn allowed() -> Vec<String> {
        ValidatorConfig::default().allowed_content_types
    }

    #[test]
    fn test_success_outcome_html() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("5120"));

        let outcome = success_outcome(200, &headers, 2, &allowed(), 100);

        assert!(outcome.is_accessible);
        assert!(outcome.is_valid_content_type);
        assert_eq!(outcome.status_code, Some(200));
        assert_eq!(outcome.content_length, Some(5120));
        assert_eq!(outcome.redirect_count, 2);
        assert!(!outcome.below_min_response_size);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_success_outcome_disallowed_content_type_is_still_accessible() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let outcome = success_outcome(200, &headers, 0, &allowed(), 100);

        assert!(outcome.is_accessible);
        assert!(!outcome.is_valid_content_type);
        assert_eq!(outcome.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_success_outcome_missing_headers() {
        let outcome = success_outcome(204, &HeaderMap::new(), 0, &allowed(), 100);
        assert!(outcome.is_accessible);
        assert!(!outcome.is_valid_content_type);
        assert_eq!(outcome.content_type, None);
        assert_eq!(outcome.content_length, None);
        assert!(!outcome.below_min_response_size);
    }

    #[test]
    fn test_success_outcome_flags_small_response() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("TEXT/PLAIN"));
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("12"));

        let outcome = success_outcome(200, &headers, 0, &allowed(), 100);

        assert!(outcome.is_accessible);
        assert!(outcome.is_valid_content_type);
        assert!(outcome.below_min_response_size);
    }

    #[test]
    fn test_failed_outcome() {
        let outcome = HttpOutcome::failed(ValidationFailure::http_status(503), Some(503), 1);
        assert!(!outcome.is_accessible);
        assert_eq!(outcome.status_code, Some(503));
        assert_eq!(outcome.redirect_count, 1);
        assert_eq!(outcome.error.map(|e| e.message).as_deref(), Some("HTTP 503"));
    }
}
