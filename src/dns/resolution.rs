//! Hostname resolution.
//!
//! [`check_dns_resolution`] performs one forward lookup through a
//! [`DnsResolve`] implementation and folds every failure into a [`DnsOutcome`].

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use trust_dns_resolver::TokioAsyncResolver;

use crate::error_handling::ValidationFailure;

/// Result of a forward lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct DnsOutcome {
    pub is_resolvable: bool,
    pub addresses: Vec<IpAddr>,
    pub error: Option<ValidationFailure>,
}

impl DnsOutcome {
    pub fn resolved(addresses: Vec<IpAddr>) -> Self {
        Self {
            is_resolvable: true,
            addresses,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            is_resolvable: false,
            addresses: Vec::new(),
            error: Some(ValidationFailure::resolution(message)),
        }
    }
}

/// Forward DNS lookup.
///
/// Implementations return the resolved addresses or the resolver's error
/// message; they do not retry.
#[async_trait]
pub trait DnsResolve: Send + Sync {
    async fn lookup(&self, hostname: &str) -> Result<Vec<IpAddr>, String>;
}

/// [`DnsResolve`] over a `trust-dns` async resolver.
///
/// Which name servers are queried is decided when the resolver is built (see
/// [`init_resolver`](crate::initialization::init_resolver)).
pub struct SystemResolver {
    resolver: Arc<TokioAsyncResolver>,
}

impl SystemResolver {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsResolve for SystemResolver {
    async fn lookup(&self, hostname: &str) -> Result<Vec<IpAddr>, String> {
        match self.resolver.lookup_ip(hostname).await {
            Ok(response) => Ok(response.iter().collect()),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Caps the whole lookup of another [`DnsResolve`].
///
/// The resolver has its own per-query timeout, but it retries across name
/// servers; this bounds the total.
pub struct TimeoutResolver<R> {
    inner: R,
    timeout: Duration,
}

impl<R: DnsResolve> TimeoutResolver<R> {
    pub fn new(inner: R, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<R: DnsResolve> DnsResolve for TimeoutResolver<R> {
    async fn lookup(&self, hostname: &str) -> Result<Vec<IpAddr>, String> {
        match tokio::time::timeout(self.timeout, self.inner.lookup(hostname)).await {
            Ok(result) => result,
            Err(_) => Err("DNS lookup timed out".to_string()),
        }
    }
}

/// Checks that `hostname` resolves to at least one address.
///
/// Never fails: resolver errors, timeouts and empty answers all come back as
/// `is_resolvable == false` with the underlying message preserved.
pub async fn check_dns_resolution(hostname: &str, resolver: &dyn DnsResolve) -> DnsOutcome {
    match resolver.lookup(hostname).await {
        Ok(addresses) if addresses.is_empty() => {
            log::debug!("DNS lookup for {hostname} returned no addresses");
            DnsOutcome::failed("No addresses found")
        }
        Ok(addresses) => {
            log::debug!("Resolved {hostname} to {} address(es)", addresses.len());
            DnsOutcome::resolved(addresses)
        }
        Err(message) => {
            log::debug!("DNS lookup for {hostname} failed: {message}");
            DnsOutcome::failed(message)
        }
    }
}
