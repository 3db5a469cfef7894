//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use log::warn;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::system_conf::read_system_conf;
use trust_dns_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver for hostname lookups.
///
/// Uses the host's resolver configuration (`/etc/resolv.conf` on Unix), falling
/// back to the library default name servers when it cannot be read. Queries get
/// a bounded timeout and few attempts, so an unresponsive name server fails the
/// lookup instead of stalling the whole validation.
///
/// # Arguments
///
/// * `timeout` - Per-query timeout handed to the resolver
pub fn init_resolver(timeout: Duration) -> Arc<TokioAsyncResolver> {
    let (config, mut opts) = match read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            warn!("Failed to read system DNS configuration, using defaults: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };
    opts.timeout = timeout;
    opts.attempts = 2; // Reduce retry attempts to fail faster
    // Hostnames from URLs are already fully qualified; skip search-domain expansion
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(config, opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_resolver_answers_ip_literal() {
        let resolver = init_resolver(Duration::from_secs(5));
        let response = resolver.lookup_ip("127.0.0.1").await.expect("ip literal");
        assert_eq!(
            response.iter().collect::<Vec<_>>(),
            vec![std::net::IpAddr::from([127, 0, 0, 1])]
        );
    }
}
