//! Tests for CLI argument parsing

use clap::Parser;
use website_validator::{Config, LogFormat, ValidatorConfig};

#[test]
fn test_minimal_arguments() {
    let config = Config::try_parse_from(["website_validator", "urls.txt"]).expect("parse");
    assert_eq!(config.file.to_str(), Some("urls.txt"));
    assert_eq!(config.max_concurrent, 5);
    assert_eq!(config.timeout_seconds, 15);
    assert!(!config.json);
}

#[test]
fn test_stdin_and_options() {
    let config = Config::try_parse_from([
        "website_validator",
        "-",
        "--max-concurrent",
        "25",
        "--log-format",
        "json",
        "--json",
    ])
    .expect("parse");
    assert_eq!(config.file.to_str(), Some("-"));
    assert_eq!(config.max_concurrent, 25);
    assert!(matches!(config.log_format, LogFormat::Json));
    assert!(config.json);
}

#[test]
fn test_missing_file_argument_is_an_error() {
    assert!(Config::try_parse_from(["website_validator"]).is_err());
}

#[test]
fn test_invalid_log_level_is_an_error() {
    assert!(
        Config::try_parse_from(["website_validator", "urls.txt", "--log-level", "loud"]).is_err()
    );
}

#[test]
fn test_cli_overrides_reach_validator_config() {
    let config = Config::try_parse_from([
        "website_validator",
        "urls.txt",
        "--timeout-seconds",
        "4",
        "--user-agent",
        "probe/1.0",
    ])
    .expect("parse");
    let validator_config = ValidatorConfig::from(&config);
    assert_eq!(validator_config.http_timeout.as_secs(), 4);
    assert_eq!(validator_config.user_agent, "probe/1.0");
    assert_eq!(validator_config.max_redirects, 5);
}
