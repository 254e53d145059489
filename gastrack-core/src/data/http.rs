//! HTTP transport backed by a blocking reqwest client.
//!
//! Every request carries its own timeout, so a dead endpoint costs at most one
//! bounded wait before the acquirer moves on. Status codes outside 2xx and
//! bodies that are not JSON are reported as [`SourceError`]s, never panics.

use serde_json::Value;
use std::time::Duration;

use super::provider::{SourceError, Transport};

/// Default bounded wait per source attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct HttpTransport {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gastrack/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, timeout))
    }

    /// Wrap an already-built client (custom proxy or TLS settings).
    pub fn with_client(client: reqwest::blocking::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn decode(&self, sent: reqwest::Result<reqwest::blocking::Response>) -> Result<Value, SourceError> {
        let resp = sent.map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
            });
        }

        resp.json::<Value>().map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout)
            } else {
                SourceError::MalformedBody(e.to_string())
            }
        })
    }

    fn classify(&self, e: reqwest::Error) -> SourceError {
        if e.is_timeout() {
            SourceError::Timeout(self.timeout)
        } else {
            SourceError::NetworkUnreachable(e.to_string())
        }
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, SourceError> {
        let sent = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(body)
            .send();
        self.decode(sent)
    }

    fn get_json(&self, url: &str) -> Result<Value, SourceError> {
        let sent = self.client.get(url).timeout(self.timeout).send();
        self.decode(sent)
    }
}
