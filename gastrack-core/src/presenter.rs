//! Presenter: tiering, derived average, and writes to display surfaces.
//!
//! `classify` is a pure total function of the gas value. `present` formats a
//! reading and pushes the strings into whatever implements
//! [`DisplaySurfaces`]; the TUI gauge, the CLI printer, and tests all use the
//! same [`GaugeView`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Reading;

/// Below this the network is cheap.
pub const LOW_THRESHOLD: f64 = 0.01;

/// At or above this, waiting is advised.
pub const HIGH_THRESHOLD: f64 = 0.05;

/// "Average" is the current value discounted by this factor. It is not a
/// rolling average.
pub const AVERAGE_DISCOUNT: f64 = 0.85;

/// Text written to the value surface when a reading cannot be shown.
pub const ERROR_TEXT: &str = "Error";

/// Qualitative fee band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn message(self) -> &'static str {
        match self {
            Tier::Low => "✅ Transact now!",
            Tier::Medium => "⚠️ Moderate fees",
            Tier::High => "🛑 Wait if possible",
        }
    }

    /// Style tag carried to the surface (`low` / `medium` / `high`).
    pub fn style_tag(self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Low => "LOW",
            Tier::Medium => "MEDIUM",
            Tier::High => "HIGH",
        }
    }

    /// Parse a style tag back into a tier.
    pub fn from_style_tag(tag: &str) -> Option<Tier> {
        match tag {
            "low" => Some(Tier::Low),
            "medium" => Some(Tier::Medium),
            "high" => Some(Tier::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub tier: Tier,
    pub message: &'static str,
    pub style: &'static str,
}

impl From<Tier> for Recommendation {
    fn from(tier: Tier) -> Self {
        Self {
            tier,
            message: tier.message(),
            style: tier.style_tag(),
        }
    }
}

/// Map a gas value to its tier. Values that compare as neither low nor
/// medium (including NaN) land in HIGH.
pub fn classify(value: f64) -> Recommendation {
    let tier = if value < LOW_THRESHOLD {
        Tier::Low
    } else if value < HIGH_THRESHOLD {
        Tier::Medium
    } else {
        Tier::High
    };
    tier.into()
}

/// Displayed "average": `value * 0.85`.
pub fn average_of(value: f64) -> f64 {
    value * AVERAGE_DISCOUNT
}

/// Value with three decimals, as shown on every surface.
pub fn format_gwei(value: f64) -> String {
    format!("{value:.3}")
}

#[derive(Debug, Error, PartialEq)]
pub enum PresentError {
    #[error("reading value {0} cannot be displayed")]
    InvalidValue(f64),
}

/// Named write targets for a presented reading.
pub trait DisplaySurfaces {
    fn set_current(&mut self, text: &str);
    fn set_average(&mut self, text: &str);
    fn set_recommendation(&mut self, text: &str, style: &str);
    fn set_last_updated(&mut self, text: &str);
}

/// Write a reading to the surfaces.
///
/// A non-finite or negative value writes [`ERROR_TEXT`] to the current-value
/// surface, leaves the rest untouched, and returns `Err`.
pub fn present<S: DisplaySurfaces + ?Sized>(
    reading: &Reading,
    surfaces: &mut S,
) -> Result<Recommendation, PresentError> {
    let value = reading.value();
    if !value.is_finite() || value < 0.0 {
        surfaces.set_current(ERROR_TEXT);
        return Err(PresentError::InvalidValue(value));
    }

    let rec = classify(value);
    surfaces.set_current(&format_gwei(value));
    surfaces.set_average(&format_gwei(average_of(value)));
    surfaces.set_recommendation(rec.message, rec.style);
    surfaces.set_last_updated(&reading.captured_at().format("%H:%M:%S").to_string());
    Ok(rec)
}

/// In-memory surface set. Starts with placeholders until the first reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GaugeView {
    pub current: String,
    pub average: String,
    pub recommendation: String,
    pub style: String,
    pub last_updated: String,
}

impl Default for GaugeView {
    fn default() -> Self {
        Self {
            current: "--".into(),
            average: "--".into(),
            recommendation: "--".into(),
            style: String::new(),
            last_updated: "--".into(),
        }
    }
}

impl GaugeView {
    /// Tier implied by the recommendation style, if one has been written.
    pub fn tier(&self) -> Option<Tier> {
        Tier::from_style_tag(&self.style)
    }

    pub fn is_error(&self) -> bool {
        self.current == ERROR_TEXT
    }
}

impl DisplaySurfaces for GaugeView {
    fn set_current(&mut self, text: &str) {
        self.current = text.to_string();
    }

    fn set_average(&mut self, text: &str) {
        self.average = text.to_string();
    }

    fn set_recommendation(&mut self, text: &str, style: &str) {
        self.recommendation = text.to_string();
        self.style = style.to_string();
    }

    fn set_last_updated(&mut self, text: &str) {
        self.last_updated = text.to_string();
    }
}
