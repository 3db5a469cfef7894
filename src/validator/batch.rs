//! Batch validation with bounded concurrency.

use futures::stream::{self, StreamExt};
use log::info;

use super::WebsiteValidator;
use crate::models::{ValidationOptions, ValidationResult};

impl WebsiteValidator {
    /// Validates many URLs, at most `options.max_concurrent` at a time.
    ///
    /// A new validation starts as soon as one in flight finishes (no waiting
    /// for a whole window), and results come back in input order regardless
    /// of completion order.
    pub async fn validate_multiple_websites<S: AsRef<str>>(
        &self,
        urls: &[S],
        options: &ValidationOptions,
    ) -> Vec<ValidationResult> {
        let limit = options.max_concurrent.max(1);
        info!(
            "Validating {} URL{} ({} at a time)",
            urls.len(),
            if urls.len() == 1 { "" } else { "s" },
            limit
        );

        let results: Vec<ValidationResult> = stream::iter(urls)
            .map(|url| self.validate_website(url.as_ref(), options))
            .buffered(limit)
            .collect()
            .await;

        let accessible = results.iter().filter(|r| r.is_accessible).count();
        info!(
            "Batch complete: {} accessible, {} not",
            accessible,
            results.len() - accessible
        );
        results
    }
}
