//! End-to-end tests through the public API
//!
//! A local httptest server stands in for the website and a fixed resolver
//! stands in for DNS, so the whole pipeline runs without outside network.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use async_trait::async_trait;
use httptest::{matchers::*, responders::*, Expectation, Server};

use website_validator::{
    normalize_url, DnsResolve, FailureKind, ReqwestProber, ValidationOptions, ValidatorConfig,
    WebsiteValidator,
};

struct LoopbackResolver;

#[async_trait]
impl DnsResolve for LoopbackResolver {
    async fn lookup(&self, _hostname: &str) -> Result<Vec<IpAddr>, String> {
        Ok(vec![IpAddr::V4(Ipv4Addr::LOCALHOST)])
    }
}

const SITE: &str = "website.test";

fn validator_for(server: &Server) -> WebsiteValidator {
    let config = ValidatorConfig::default();
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .resolve(SITE, server.addr())
        .build()
        .expect("client");
    let client = Arc::new(client);
    WebsiteValidator::with_components(
        Arc::new(LoopbackResolver),
        Arc::new(ReqwestProber::new(client, &config)),
        &config,
    )
}

/// The server listens on 127.0.0.1, which normalization blocks, so tests
/// reach it under a made-up name pinned to the server address.
fn public_url(server: &Server, path: &str) -> String {
    let port = server.addr().port();
    format!("http://{SITE}:{port}{path}")
}

#[tokio::test]
async fn test_accessible_site_is_validated_and_cached() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/home"))
            .times(1)
            .respond_with(
                status_code(200).insert_header("Content-Type", "text/html; charset=utf-8"),
            ),
    );
    let validator = validator_for(&server);
    let url = public_url(&server, "/home");

    let first = validator
        .validate_website(&url, &ValidationOptions::default())
        .await;
    assert!(first.is_accessible, "{:?}", first.error);
    assert_eq!(first.status_code, Some(200));
    assert_eq!(first.is_valid_content_type, Some(true));
    assert!(!first.from_cache);

    let second = validator
        .validate_website(&url, &ValidationOptions::default())
        .await;
    assert!(second.from_cache);
    assert_eq!(validator.validation_statistics().cache_size, 1);
}

#[tokio::test]
async fn test_redirect_then_not_found() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/old"))
            .respond_with(status_code(301).insert_header("Location", "/gone")),
    );
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/gone")).respond_with(status_code(404)),
    );
    let validator = validator_for(&server);

    let result = validator
        .validate_website(&public_url(&server, "/old"), &ValidationOptions::default())
        .await;

    assert!(result.is_valid);
    assert!(!result.is_accessible);
    assert_eq!(result.dns_resolvable, Some(true));
    assert_eq!(result.status_code, Some(404));
    assert_eq!(result.redirect_count, 1);
    assert_eq!(result.error_message(), Some("HTTP 404"));
    assert_eq!(validator.validation_statistics().cache_size, 0);
    assert_eq!(validator.failure_count(FailureKind::ProtocolError), 1);
}

#[tokio::test]
async fn test_batch_keeps_input_order() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method("HEAD"))
            .times(2)
            .respond_with(status_code(200).insert_header("Content-Type", "text/plain")),
    );
    let validator = validator_for(&server);
    let urls = vec![
        public_url(&server, "/a"),
        "ftp://rust-lang.org".to_string(),
        public_url(&server, "/b"),
    ];

    let results = validator
        .validate_multiple_websites(
            &urls,
            &ValidationOptions {
                max_concurrent: 2,
                ..Default::default()
            },
        )
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].original_url, urls[0]);
    assert!(results[0].is_accessible);
    assert!(!results[1].is_valid);
    assert_eq!(results[2].original_url, urls[2]);
    assert!(results[2].is_accessible);
}

#[test]
fn test_normalize_url_is_public() {
    let normalized = normalize_url("  Docs.RS/tokio/ ");
    assert!(normalized.is_valid);
    assert_eq!(normalized.normalized.as_deref(), Some("https://docs.rs/tokio"));
    assert_eq!(normalized.hostname().as_deref(), Some("docs.rs"));
}
