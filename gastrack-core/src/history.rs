//! History synthesizer: stand-in series for the weekly trend chart.
//!
//! There is no historical gas feed behind this: every point is drawn uniformly
//! from a plausible Base range. The generator is a parameter so callers pick
//! between entropy and a fixed seed.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::source::round_to;
use crate::domain::HistorySeries;

/// Default number of days shown.
pub const HISTORY_DAYS: usize = 7;

/// Longest series the synthesizer produces.
pub const MAX_HISTORY_DAYS: usize = 365;

/// Lowest synthetic value, in gwei.
pub const SYNTHETIC_MIN_GWEI: f64 = 0.001;

/// Width of the synthetic range, in gwei.
pub const SYNTHETIC_SPAN_GWEI: f64 = 0.05;

/// Build `n` points ending at `today`, oldest first, labeled by weekday.
/// `n` is capped at [`MAX_HISTORY_DAYS`].
///
/// Values are rounded to three decimals and lie in
/// `[SYNTHETIC_MIN_GWEI, SYNTHETIC_MIN_GWEI + SYNTHETIC_SPAN_GWEI]`.
pub fn synthesize_history<R: Rng>(n: usize, today: NaiveDate, rng: &mut R) -> HistorySeries {
    let n = n.min(MAX_HISTORY_DAYS);
    let mut labels = Vec::with_capacity(n);
    let mut values = Vec::with_capacity(n);

    for offset in (0..n).rev() {
        let label = today
            .checked_sub_days(Days::new(offset as u64))
            .map(|date| date.format("%a").to_string())
            .unwrap_or_default();
        labels.push(label);

        let raw = rng.gen::<f64>() * SYNTHETIC_SPAN_GWEI + SYNTHETIC_MIN_GWEI;
        values.push(round_to(raw, 3));
    }

    // Both vectors grow in the same loop.
    HistorySeries::new(labels, values).unwrap_or_default()
}

/// Seeded generator when `seed` is set, entropy otherwise.
pub fn history_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}
