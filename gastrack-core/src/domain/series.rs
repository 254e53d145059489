//! HistorySeries: labeled points for the trend chart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("label/value length mismatch: {labels} labels, {values} values")]
    LengthMismatch { labels: usize, values: usize },
}

/// Ordered labels with one value per label, oldest first.
///
/// The only way to build a series is [`HistorySeries::new`], which rejects
/// mismatched lengths, so `labels().len() == values().len()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct HistorySeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl TryFrom<RawSeries> for HistorySeries {
    type Error = SeriesError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        HistorySeries::new(raw.labels, raw.values)
    }
}

impl HistorySeries {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if labels.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(label, value)` pairs in chart order.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Largest finite value, if any.
    pub fn max_value(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}
