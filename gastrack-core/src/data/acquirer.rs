//! Acquirer: ordered multi-source fallback for the current gas price.
//!
//! The primaries are tried in table order, one request each. The first usable
//! value wins. When every primary fails the secondary aggregator gets one
//! request, and when that fails too a fixed default comes back. The caller
//! always receives a [`Reading`]; per-source failures are logged and kept in
//! the attempt list, never returned as errors.

use log::{debug, info, warn};
use serde::Serialize;
use std::time::Duration;

use super::http::HttpTransport;
use super::provider::{SourceError, Transport};
use super::source::{SourceDescriptor, FALLBACK_GWEI, PRIMARY_SOURCES, SECONDARY_SOURCE};
use crate::domain::{Reading, ReadingOrigin};

/// Position of a source in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRole {
    Primary,
    Secondary,
}

/// Outcome of one request to one source.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub source: &'static str,
    pub role: SourceRole,
    pub result: Result<f64, SourceError>,
}

impl Attempt {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// A reading plus every attempt made to produce it, in order.
#[derive(Debug, Clone)]
pub struct Acquisition {
    pub reading: Reading,
    pub attempts: Vec<Attempt>,
}

impl Acquisition {
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &SourceError)> + '_ {
        self.attempts
            .iter()
            .filter_map(|a| a.result.as_ref().err().map(|e| (a.source, e)))
    }
}

pub struct Acquirer<T: Transport> {
    transport: T,
    primaries: Vec<SourceDescriptor>,
    secondary: Option<SourceDescriptor>,
    fallback_value: f64,
}

impl Acquirer<HttpTransport> {
    /// The production chain: Base mainnet RPCs, then the Etherscan gas oracle.
    pub fn base_mainnet(timeout: Duration) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(timeout)?;
        Ok(Self::new(
            transport,
            PRIMARY_SOURCES.to_vec(),
            Some(SECONDARY_SOURCE),
        ))
    }
}

impl<T: Transport> Acquirer<T> {
    pub fn new(
        transport: T,
        primaries: Vec<SourceDescriptor>,
        secondary: Option<SourceDescriptor>,
    ) -> Self {
        Self {
            transport,
            primaries,
            secondary,
            fallback_value: FALLBACK_GWEI,
        }
    }

    pub fn with_fallback_value(mut self, value: f64) -> Self {
        self.fallback_value = value;
        self
    }

    pub fn primaries(&self) -> &[SourceDescriptor] {
        &self.primaries
    }

    pub fn secondary(&self) -> Option<&SourceDescriptor> {
        self.secondary.as_ref()
    }

    pub fn fallback_value(&self) -> f64 {
        self.fallback_value
    }

    /// Current gas price. Never fails.
    pub fn acquire_reading(&self) -> Reading {
        self.acquire_with_report().reading
    }

    /// Current gas price together with the per-source attempt log.
    pub fn acquire_with_report(&self) -> Acquisition {
        let chain = self
            .primaries
            .iter()
            .map(|s| (SourceRole::Primary, s))
            .chain(self.secondary.iter().map(|s| (SourceRole::Secondary, s)));

        let mut attempts = Vec::with_capacity(self.primaries.len() + 1);

        for (role, source) in chain {
            debug!("Requesting gas price from {} ({})", source.name, source.url);
            let result = source.fetch(&self.transport);
            attempts.push(Attempt {
                source: source.name,
                role,
                result: result.clone(),
            });

            match result {
                Ok(value) => {
                    info!("Gas price {value} gwei from {}", source.name);
                    let origin = match role {
                        SourceRole::Primary => ReadingOrigin::Primary {
                            source: source.name.to_string(),
                        },
                        SourceRole::Secondary => ReadingOrigin::Secondary {
                            source: source.name.to_string(),
                        },
                    };
                    return Acquisition {
                        reading: Reading::new(value, origin),
                        attempts,
                    };
                }
                Err(e) => warn!("Failed {}: {e}", source.name),
            }
        }

        warn!(
            "All {} sources failed; using fallback {} gwei",
            attempts.len(),
            self.fallback_value
        );
        Acquisition {
            reading: Reading::new(self.fallback_value, ReadingOrigin::Fallback),
            attempts,
        }
    }
}
