//! HTTP probing.
//!
//! This module provides the HTTP stage of the pipeline: a `HEAD` request with
//! browser-like headers, manual redirect following up to a bound, and
//! classification of the final response into an [`HttpOutcome`].

mod probe;
mod request;

pub use probe::{HttpOutcome, HttpProbe, ReqwestProber};
