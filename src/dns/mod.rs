//! DNS resolution.
//!
//! This module provides the forward-lookup stage of the pipeline using
//! `trust-dns-resolver`, behind the [`DnsResolve`] trait so the orchestrator
//! can be exercised without a network.

mod resolution;

// Re-export public API
pub use resolution::{
    check_dns_resolution, DnsOutcome, DnsResolve, SystemResolver, TimeoutResolver,
};
