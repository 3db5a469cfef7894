//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and the runtime configuration of the validator.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    ALLOWED_CONTENT_TYPES, CACHE_DURATION, CACHE_SWEEP_INTERVAL,
    DEFAULT_MAX_CONCURRENT, DEFAULT_USER_AGENT, DNS_TIMEOUT_SECS, HTTP_TIMEOUT, MAX_REDIRECTS,
    MIN_RESPONSE_SIZE,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Command-line options for the `website_validator` binary.
///
/// # Examples
///
/// ```bash
/// # Validate every URL in a file
/// website_validator urls.txt
///
/// # Read from stdin, 20 at a time, JSON lines out
/// cat urls.txt | website_validator - --max-concurrent 20 --json
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "website_validator",
    about = "Checks that websites are well formed, resolvable and reachable."
)]
pub struct Config {
    /// File with one URL per line (`-` reads stdin)
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Maximum validations in flight at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: usize,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT.as_secs())]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Print one JSON object per result instead of plain lines
    #[arg(long)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("urls.txt"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_seconds: HTTP_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            json: false,
        }
    }
}

/// Runtime parameters of a [`WebsiteValidator`](crate::WebsiteValidator).
///
/// `Default` yields the compiled-in values; only tests and the CLI change them.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    pub http_timeout: Duration,
    pub dns_timeout: Duration,
    pub max_redirects: u32,
    pub cache_duration: Duration,
    pub sweep_interval: Duration,
    pub min_response_size: u64,
    pub user_agent: String,
    pub allowed_content_types: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            http_timeout: HTTP_TIMEOUT,
            dns_timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
            max_redirects: MAX_REDIRECTS,
            cache_duration: CACHE_DURATION,
            sweep_interval: CACHE_SWEEP_INTERVAL,
            min_response_size: MIN_RESPONSE_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allowed_content_types: ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl From<&Config> for ValidatorConfig {
    fn from(config: &Config) -> Self {
        Self {
            http_timeout: Duration::from_secs(config.timeout_seconds),
            user_agent: config.user_agent.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_concurrent, 5);
        assert_eq!(config.timeout_seconds, 15);
        assert!(!config.json);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_config_parses_cli_args() {
        let config = Config::parse_from([
            "website_validator",
            "urls.txt",
            "--max-concurrent",
            "12",
            "--timeout-seconds",
            "3",
            "--log-format",
            "json",
            "--json",
        ]);
        assert_eq!(config.file, PathBuf::from("urls.txt"));
        assert_eq!(config.max_concurrent, 12);
        assert_eq!(config.timeout_seconds, 3);
        assert!(matches!(config.log_format, LogFormat::Json));
        assert!(config.json);
    }

    #[test]
    fn test_validator_config_from_cli_config() {
        let config = Config {
            timeout_seconds: 7,
            user_agent: "probe/1.0".to_string(),
            ..Default::default()
        };
        let validator_config = ValidatorConfig::from(&config);
        assert_eq!(validator_config.http_timeout, Duration::from_secs(7));
        assert_eq!(validator_config.user_agent, "probe/1.0");
        assert_eq!(validator_config.max_redirects, MAX_REDIRECTS);
        assert_eq!(validator_config.cache_duration, CACHE_DURATION);
    }

    #[test]
    fn test_validator_config_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.http_timeout, Duration::from_secs(15));
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.cache_duration, Duration::from_secs(1800));
        assert_eq!(config.sweep_interval, Duration::from_secs(600));
        assert_eq!(config.min_response_size, 100);
        assert_eq!(config.allowed_content_types.len(), 3);
    }
}
