//! website_validator library: checks that websites exist and are reachable
//!
//! Each URL goes through a short-circuiting pipeline: normalization and
//! allow/deny checks, DNS resolution, then an HTTP `HEAD` probe with a bounded
//! redirect chain. Reachable results are cached for thirty minutes, and batches
//! run with a caller-chosen concurrency bound while preserving input order.
//!
//! # Example
//!
//! ```no_run
//! use website_validator::{ValidationOptions, ValidatorConfig, WebsiteValidator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = WebsiteValidator::new(ValidatorConfig::default())?;
//! validator.init();
//!
//! let results = validator
//!     .validate_multiple_websites(&["rust-lang.org", "crates.io"], &ValidationOptions::default())
//!     .await;
//! for result in &results {
//!     println!("{}: {}", result.original_url, result.is_accessible);
//! }
//!
//! validator.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod cache;
pub mod config;
mod dns;
mod error_handling;
mod fetch;
pub mod initialization;
mod models;
mod normalize;
mod validator;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, ValidatorConfig};
pub use dns::{check_dns_resolution, DnsOutcome, DnsResolve, SystemResolver, TimeoutResolver};
pub use error_handling::{FailureKind, FailureStats, InitializationError, ValidationFailure};
pub use fetch::{HttpOutcome, HttpProbe, ReqwestProber};
pub use models::{CacheStats, ValidationOptions, ValidationResult, ValidationStatistics};
pub use normalize::{normalize_url, NormalizedUrl};
pub use run::{read_urls, run_validation, ValidationReport};
pub use validator::WebsiteValidator;

// Batch runner behind the CLI
mod run {
    use std::path::Path;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::info;
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

    use crate::config::{Config, ValidatorConfig};
    use crate::error_handling::FailureKind;
    use crate::models::{ValidationOptions, ValidationResult};
    use crate::validator::WebsiteValidator;

    /// Results of a validation run.
    #[derive(Debug, Clone)]
    pub struct ValidationReport {
        /// Per-URL results, in input order
        pub results: Vec<ValidationResult>,
        /// Number of URLs validated
        pub total: usize,
        /// Number of reachable websites
        pub accessible: usize,
        /// Number of well-formed URLs that were not reachable
        pub inaccessible: usize,
        /// Number of URLs rejected by normalization
        pub invalid: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Failure counts by kind, omitting kinds that never occurred
        pub failures_by_kind: Vec<(FailureKind, usize)>,
    }

    /// Reads URLs from `path`, or from stdin when `path` is `-`.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub async fn read_urls(path: &Path) -> Result<Vec<String>> {
        if path.as_os_str() == "-" {
            info!("Reading URLs from stdin");
            collect_lines(BufReader::new(tokio::io::stdin())).await
        } else {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            collect_lines(BufReader::new(file)).await
        }
    }

    async fn collect_lines<R: AsyncBufRead + Unpin>(reader: R) -> Result<Vec<String>> {
        let mut lines = reader.lines();
        let mut urls = Vec::new();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                urls.push(trimmed.to_string());
            }
        }
        Ok(urls)
    }

    /// Validates every URL in `config.file`.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input cannot be read
    /// - The HTTP client cannot be initialized
    ///
    /// # Example
    ///
    /// ```no_run
    /// use website_validator::{run_validation, Config};
    /// use std::path::PathBuf;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config {
    ///     file: PathBuf::from("urls.txt"),
    ///     ..Default::default()
    /// };
    /// let report = run_validation(config).await?;
    /// println!("{} of {} reachable", report.accessible, report.total);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_validation(config: Config) -> Result<ValidationReport> {
        let urls = read_urls(&config.file).await?;
        info!("Total URLs to validate: {}", urls.len());

        let validator = WebsiteValidator::new(ValidatorConfig::from(&config))
            .context("Failed to initialize validator")?;
        validator.init();

        let options = ValidationOptions {
            max_concurrent: config.max_concurrent,
            ..Default::default()
        };
        let report = validate_all(&validator, &urls, &options).await;

        validator.shutdown();
        Ok(report)
    }

    async fn validate_all(
        validator: &WebsiteValidator,
        urls: &[String],
        options: &ValidationOptions,
    ) -> ValidationReport {
        let start = Instant::now();
        let results = validator.validate_multiple_websites(urls, options).await;

        let accessible = results.iter().filter(|r| r.is_accessible).count();
        let invalid = results.iter().filter(|r| !r.is_valid).count();
        ValidationReport {
            total: results.len(),
            accessible,
            inaccessible: results.len() - accessible - invalid,
            invalid,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            failures_by_kind: validator.failure_stats().snapshot(),
            results,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[tokio::test]
        async fn test_read_urls_skips_blanks_and_comments() {
            let mut file = NamedTempFile::new().expect("create temp file");
            writeln!(file, "# header").expect("write");
            writeln!(file, "rust-lang.org").expect("write");
            writeln!(file).expect("write");
            writeln!(file, "   crates.io   ").expect("write");
            writeln!(file, "  # indented comment").expect("write");

            let urls = read_urls(file.path()).await.expect("read urls");
            assert_eq!(urls, vec!["rust-lang.org", "crates.io"]);
        }

        #[tokio::test]
        async fn test_read_urls_missing_file() {
            let err = read_urls(Path::new("/nonexistent/urls.txt"))
                .await
                .expect_err("missing file should fail");
            assert!(format!("{err:#}").contains("Failed to open input file"));
        }

        #[tokio::test]
        async fn test_run_validation_counts_invalid_urls() {
            let mut file = NamedTempFile::new().expect("create temp file");
            writeln!(file, "localhost").expect("write");
            writeln!(file, "ftp://rust-lang.org").expect("write");
            writeln!(file, "http://192.168.1.20/admin").expect("write");

            let config = Config {
                file: file.path().to_path_buf(),
                ..Default::default()
            };
            let report = run_validation(config).await.expect("run");

            assert_eq!(report.total, 3);
            assert_eq!(report.invalid, 3);
            assert_eq!(report.accessible, 0);
            assert_eq!(report.inaccessible, 0);
            assert_eq!(report.failures_by_kind, vec![(FailureKind::FormatError, 3)]);
            assert_eq!(report.results[1].original_url, "ftp://rust-lang.org");
        }
    }
}
