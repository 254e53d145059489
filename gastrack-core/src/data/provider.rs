//! Transport trait and structured per-source error types.
//!
//! The Transport trait abstracts over the HTTP client so the acquisition loop
//! can be driven by scripted responses in tests.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Why a single source attempt produced no usable value.
///
/// These never reach the caller of the acquirer; they are logged and recorded
/// in the attempt report, then the next source is tried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("response missing field `{0}`")]
    MissingField(&'static str),

    #[error("unparsable numeric field: {0:?}")]
    Unparsable(String),
}

impl SourceError {
    /// Coarse category used by the TUI error history.
    pub fn category(&self) -> &'static str {
        match self {
            SourceError::Timeout(_)
            | SourceError::NetworkUnreachable(_)
            | SourceError::HttpStatus { .. } => "network",
            SourceError::MalformedBody(_)
            | SourceError::MissingField(_)
            | SourceError::Unparsable(_) => "data",
        }
    }
}

/// One request, one JSON body back. Implementations own the bounded wait.
pub trait Transport: Send + Sync {
    /// POST `body` as JSON and decode the JSON response.
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, SourceError>;

    /// GET `url` and decode the JSON response.
    fn get_json(&self, url: &str) -> Result<Value, SourceError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, SourceError> {
        (**self).post_json(url, body)
    }

    fn get_json(&self, url: &str) -> Result<Value, SourceError> {
        (**self).get_json(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, SourceError> {
        (**self).post_json(url, body)
    }

    fn get_json(&self, url: &str) -> Result<Value, SourceError> {
        (**self).get_json(url)
    }
}
