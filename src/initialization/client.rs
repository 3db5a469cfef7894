//! HTTP client initialization.
//!
//! This module provides the HTTP client used by the probe stage.

use std::sync::Arc;

use crate::config::ValidatorConfig;
use reqwest::ClientBuilder;

/// Initializes the HTTP client used for probing.
///
/// Creates a `reqwest::Client` with redirects disabled so the prober can
/// count hops and enforce its own limit. The per-request timeout mirrors the
/// probe budget so reqwest gives up at the same moment.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_probe_client(config: &ValidatorConfig) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.http_timeout)
        .connect_timeout(config.http_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
