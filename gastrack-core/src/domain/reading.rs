//! Reading: one acquired gas-price sample.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Where a reading's value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadingOrigin {
    /// One of the ordered JSON-RPC endpoints answered.
    Primary { source: String },
    /// Every primary failed; the aggregator answered.
    Secondary { source: String },
    /// Nothing answered; the value is the hardcoded default.
    Fallback,
}

impl ReadingOrigin {
    /// Short label for status lines and CLI output.
    pub fn describe(&self) -> String {
        match self {
            ReadingOrigin::Primary { source } => format!("primary: {source}"),
            ReadingOrigin::Secondary { source } => format!("secondary: {source}"),
            ReadingOrigin::Fallback => "fallback default".to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ReadingOrigin::Fallback)
    }
}

/// Gas price sample in gwei with its capture time.
///
/// Fields are private so a reading cannot be altered after it is produced;
/// a refresh replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    value: f64,
    captured_at: DateTime<Local>,
    origin: ReadingOrigin,
}

impl Reading {
    /// Build a reading stamped with the current local time.
    pub fn new(value: f64, origin: ReadingOrigin) -> Self {
        Self::at(value, Local::now(), origin)
    }

    /// Build a reading with an explicit capture time.
    pub fn at(value: f64, captured_at: DateTime<Local>, origin: ReadingOrigin) -> Self {
        Self {
            value,
            captured_at,
            origin,
        }
    }

    /// Gas price in gwei.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }

    pub fn origin(&self) -> &ReadingOrigin {
        &self.origin
    }
}
