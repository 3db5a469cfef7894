//! Website validation pipeline.
//!
//! [`WebsiteValidator`] runs a URL through cache → normalization → DNS →
//! HTTP, stopping at the first stage that fails, and caches accessible
//! results. Batch validation lives in [`batch`].

mod batch;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::FutureExt;
use log::{debug, error, info};

use crate::cache::ResultCache;
use crate::config::ValidatorConfig;
use crate::dns::{check_dns_resolution, DnsResolve, SystemResolver, TimeoutResolver};
use crate::error_handling::{FailureKind, FailureStats, InitializationError, ValidationFailure};
use crate::fetch::{HttpProbe, ReqwestProber};
use crate::initialization::{init_probe_client, init_resolver};
use crate::models::{ValidationOptions, ValidationResult, ValidationStatistics};
use crate::normalize::normalize_url;

/// Validates websites and memoizes the ones that are reachable.
///
/// Construct with [`WebsiteValidator::new`] for real network access or
/// [`WebsiteValidator::with_components`] to plug in other resolver/prober
/// implementations. Call [`init`](Self::init) to start the cache sweeper and
/// [`shutdown`](Self::shutdown) to stop it.
///
/// # Example
///
/// ```no_run
/// use website_validator::{ValidationOptions, ValidatorConfig, WebsiteValidator};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let validator = WebsiteValidator::new(ValidatorConfig::default())?;
/// validator.init();
///
/// let result = validator
///     .validate_website("rust-lang.org", &ValidationOptions::default())
///     .await;
/// println!("{} accessible: {}", result.original_url, result.is_accessible);
///
/// validator.shutdown();
/// # Ok(())
/// # }
/// ```
pub struct WebsiteValidator {
    resolver: Arc<dyn DnsResolve>,
    prober: Arc<dyn HttpProbe>,
    cache: ResultCache,
    failure_stats: Arc<FailureStats>,
}

impl WebsiteValidator {
    /// Builds a validator backed by the system DNS resolver and a `reqwest`
    /// prober.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the HTTP client
    /// cannot be built.
    pub fn new(config: ValidatorConfig) -> Result<Self, InitializationError> {
        let client = init_probe_client(&config)?;
        let resolver = TimeoutResolver::new(
            SystemResolver::new(init_resolver(config.dns_timeout)),
            config.dns_timeout,
        );
        let prober = ReqwestProber::new(client, &config);
        Ok(Self::with_components(
            Arc::new(resolver),
            Arc::new(prober),
            &config,
        ))
    }

    /// Builds a validator from any resolver and prober, e.g. for tests or
    /// custom transports.
    pub fn with_components(
        resolver: Arc<dyn DnsResolve>,
        prober: Arc<dyn HttpProbe>,
        config: &ValidatorConfig,
    ) -> Self {
        Self {
            resolver,
            prober,
            cache: ResultCache::new(config.cache_duration, config.sweep_interval),
            failure_stats: Arc::new(FailureStats::new()),
        }
    }

    /// Starts the background cache sweep.
    pub fn init(&self) {
        if self.cache.is_sweeper_running() {
            debug!("Website validator already initialized");
            return;
        }
        self.cache.start_sweeper();
        info!(
            "Website validator ready (cache duration: {}s)",
            self.cache.duration().as_secs()
        );
    }

    /// Stops the background cache sweep. Fresh entries are kept; stale ones
    /// are dropped.
    pub fn shutdown(&self) {
        self.cache.shutdown();
        let removed = self.cache.sweep();
        debug!(
            "Website validator stopped ({} cached, {} stale removed)",
            self.cache.len(),
            removed
        );
    }

    /// Validates a single URL.
    ///
    /// Never fails: every problem, including a panic inside a stage, is
    /// reported through the returned result's `error`.
    pub async fn validate_website(&self, url: &str, options: &ValidationOptions) -> ValidationResult {
        let started = Instant::now();
        match AssertUnwindSafe(self.run_pipeline(url, options, started))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                error!(
                    "Validation of {url} failed unexpectedly: {}",
                    panic_message(panic.as_ref())
                );
                let mut result = ValidationResult::new(url);
                result.error = Some(ValidationFailure::internal("Validation failed"));
                self.finish(result, started)
            }
        }
    }

    /// Whether `url` is reachable. Any failure, expected or not, is `false`.
    pub async fn is_website_accessible(&self, url: &str) -> bool {
        self.validate_website(url, &ValidationOptions::default())
            .await
            .is_accessible
    }

    async fn run_pipeline(
        &self,
        url: &str,
        options: &ValidationOptions,
        started: Instant,
    ) -> ValidationResult {
        if options.use_cache {
            if let Some(mut cached) = self.cache.lookup(url) {
                debug!("Cache hit for {url}");
                cached.from_cache = true;
                return cached;
            }
        }

        let mut result = ValidationResult::new(url);

        let normalized = normalize_url(url);
        result.normalized_url = normalized.normalized.clone();
        if !normalized.is_valid {
            result.error = normalized.error;
            return self.finish(result, started);
        }
        result.is_valid = true;

        let (Some(hostname), Some(target)) = (normalized.hostname(), normalized.normalized) else {
            result.error = Some(ValidationFailure::internal("Normalized URL has no host"));
            return self.finish(result, started);
        };

        let dns = check_dns_resolution(&hostname, self.resolver.as_ref()).await;
        result.dns_resolvable = Some(dns.is_resolvable);
        if !dns.is_resolvable {
            result.error = dns.error;
            return self.finish(result, started);
        }

        let http = self.prober.probe(&target).await;
        result.is_accessible = http.is_accessible;
        result.status_code = http.status_code;
        result.content_type = http.content_type;
        result.content_length = http.content_length;
        result.is_valid_content_type = Some(http.is_valid_content_type);
        result.redirect_count = http.redirect_count;
        result.below_min_response_size = http.below_min_response_size;
        result.error = http.error;

        let result = self.finish(result, started);
        if result.is_accessible {
            self.cache.store(url, &result);
        }
        result
    }

    /// Stamps timing and records the failure kind, if any.
    fn finish(&self, mut result: ValidationResult, started: Instant) -> ValidationResult {
        result.validation_time_ms = started.elapsed().as_millis() as u64;
        result.validated_at = Utc::now();
        match &result.error {
            Some(failure) => {
                self.failure_stats.increment(failure.kind);
                debug!(
                    "{} failed validation ({}): {}",
                    result.original_url, failure.kind, failure.message
                );
            }
            None => debug!(
                "{} validated in {}ms",
                result.original_url, result.validation_time_ms
            ),
        }
        result
    }

    /// Cache counts (fresh and stale) plus the configured freshness window.
    pub fn validation_statistics(&self) -> ValidationStatistics {
        let stats = self.cache.stats();
        ValidationStatistics {
            total_cached: stats.total_cached,
            active_cached: stats.active_cached,
            expired_cached: stats.expired_cached,
            cache_size: self.cache.len(),
            cache_duration: self.cache.duration(),
        }
    }

    /// Drops the cached result for `url`, or the whole cache when `None`.
    pub fn clear_validation_cache(&self, url: Option<&str>) -> bool {
        self.cache.clear(url)
    }

    /// Failure counts by kind since this validator was created.
    pub fn failure_stats(&self) -> &FailureStats {
        &self.failure_stats
    }

    /// Number of failures of `kind` seen so far.
    pub fn failure_count(&self, kind: FailureKind) -> usize {
        self.failure_stats.get_count(kind)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
