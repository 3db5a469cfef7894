//! Error type definitions.
//!
//! This module defines the failure taxonomy of the validation pipeline and the
//! errors that can occur while setting it up.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Kinds of failure a validation can end in.
///
/// Every stage of the pipeline reports failures as one of these kinds, so
/// callers can branch on the kind instead of parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
pub enum FailureKind {
    /// Malformed URL, disallowed scheme or blocked host.
    FormatError,
    /// The hostname did not resolve.
    ResolutionError,
    /// Connection refused/reset, TLS failure and other socket errors.
    TransportError,
    /// The HTTP request exceeded its time budget.
    Timeout,
    /// Non-2xx status or an unusable redirect.
    ProtocolError,
    /// The redirect chain was longer than allowed.
    TooManyRedirects,
    /// Anything unexpected caught at the orchestrator boundary.
    Internal,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::FormatError => "Format error",
            FailureKind::ResolutionError => "DNS resolution error",
            FailureKind::TransportError => "Transport error",
            FailureKind::Timeout => "Timeout",
            FailureKind::ProtocolError => "Protocol error",
            FailureKind::TooManyRedirects => "Too many redirects",
            FailureKind::Internal => "Internal error",
        }
    }
}

/// A failed validation: the kind plus a human-readable reason.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ValidationFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(FailureKind::FormatError, message)
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ResolutionError, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureKind::TransportError, message)
    }

    pub fn timeout() -> Self {
        Self::new(FailureKind::Timeout, "Request timeout")
    }

    /// A non-success HTTP status, reported as `HTTP <code>`.
    pub fn http_status(code: u16) -> Self {
        Self::new(FailureKind::ProtocolError, format!("HTTP {code}"))
    }

    pub fn too_many_redirects() -> Self {
        Self::new(FailureKind::TooManyRedirects, "Too many redirects")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Internal, message)
    }
}
