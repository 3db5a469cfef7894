//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `website_validator` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use website_validator::initialization::init_logger_with;
use website_validator::{run_validation, Config, ValidationResult};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let json = config.json;
    match run_validation(config).await {
        Ok(report) => {
            for result in &report.results {
                if json {
                    println!("{}", serde_json::to_string(result)?);
                } else {
                    println!("{}", format_result(result));
                }
            }

            eprintln!(
                "Validated {} URL{} in {:.1}s: {} accessible, {} inaccessible, {} invalid",
                report.total,
                if report.total == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.accessible,
                report.inaccessible,
                report.invalid
            );
            for (kind, count) in &report.failures_by_kind {
                eprintln!("   {kind}: {count}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("website_validator error: {:#}", e);
            process::exit(1);
        }
    }
}

fn format_result(result: &ValidationResult) -> String {
    let target = result
        .normalized_url
        .as_deref()
        .unwrap_or(&result.original_url);
    if result.is_accessible {
        let status = result
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_default();
        format!("OK    {target} ({status}, {}ms)", result.validation_time_ms)
    } else {
        format!(
            "FAIL  {target}: {}",
            result.error_message().unwrap_or("not accessible")
        )
    }
}
