//! Refresh cycle: acquire, present, synthesize, chart.
//!
//! The current reading and series live in a [`RefreshContext`] that the caller
//! owns and passes in; each cycle hands back a new context. A presentation
//! error leaves the previous series and chart in place. The cycle is split in two so the network half ([`fetch_cycle`])
//! can run on a worker thread while the display half ([`apply_cycle`]) stays
//! with the surfaces.

use chrono::NaiveDate;
use log::{error, info};
use rand::Rng;

use crate::chart::ChartAdapter;
use crate::data::{Acquirer, Acquisition, Transport};
use crate::domain::{HistorySeries, Reading};
use crate::history::synthesize_history;
use crate::presenter::{present, DisplaySurfaces, Recommendation};

/// Everything a refresh produces before it touches any surface.
#[derive(Debug, Clone)]
pub struct CycleData {
    pub acquisition: Acquisition,
    pub series: HistorySeries,
}

/// State carried from one refresh to the next.
#[derive(Debug, Clone, Default)]
pub struct RefreshContext {
    pub reading: Option<Reading>,
    pub series: Option<HistorySeries>,
    pub recommendation: Option<Recommendation>,
    /// Presentation error from the latest cycle, if any.
    pub last_error: Option<String>,
    pub cycles: u64,
}

/// Network half: one acquisition and one synthesized series.
pub fn fetch_cycle<T: Transport, R: Rng>(
    acquirer: &Acquirer<T>,
    rng: &mut R,
    today: NaiveDate,
    history_days: usize,
) -> CycleData {
    let acquisition = acquirer.acquire_with_report();
    let series = synthesize_history(history_days, today, rng);
    CycleData {
        acquisition,
        series,
    }
}

/// Display half: present the reading, then replace the chart data.
///
/// A presentation error is recorded in the returned context and the chart
/// is left alone: the previous series carries over unchanged.
pub fn apply_cycle<S: DisplaySurfaces + ?Sized>(
    ctx: RefreshContext,
    data: CycleData,
    surfaces: &mut S,
    chart: &mut ChartAdapter,
) -> RefreshContext {
    let CycleData {
        acquisition,
        series,
    } = data;
    let reading = acquisition.reading;

    let (recommendation, last_error) = match present(&reading, surfaces) {
        Ok(rec) => {
            info!(
                "Refresh #{}: {:.4} gwei ({}) via {}",
                ctx.cycles + 1,
                reading.value(),
                rec.tier.label(),
                reading.origin().describe()
            );
            (Some(rec), None)
        }
        Err(e) => {
            error!("Error presenting gas data: {e}");
            (None, Some(e.to_string()))
        }
    };

    let series = if last_error.is_none() {
        chart.render_series(&series);
        Some(series)
    } else {
        ctx.series
    };

    RefreshContext {
        reading: Some(reading),
        series,
        recommendation,
        last_error,
        cycles: ctx.cycles + 1,
    }
}

/// Both halves back to back on the calling thread.
pub fn refresh<T: Transport, R: Rng, S: DisplaySurfaces + ?Sized>(
    ctx: RefreshContext,
    acquirer: &Acquirer<T>,
    rng: &mut R,
    today: NaiveDate,
    history_days: usize,
    surfaces: &mut S,
    chart: &mut ChartAdapter,
) -> RefreshContext {
    let data = fetch_cycle(acquirer, rng, today, history_days);
    apply_cycle(ctx, data, surfaces, chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartStyle;
    use crate::data::{Attempt, SourceRole};
    use crate::domain::ReadingOrigin;
    use crate::presenter::{GaugeView, Tier};

    fn cycle(value: f64) -> CycleData {
        let series = HistorySeries::new(vec!["Mon".into()], vec![0.02]).unwrap();
        CycleData {
            acquisition: Acquisition {
                reading: Reading::new(value, ReadingOrigin::Fallback),
                attempts: vec![Attempt {
                    source: "x",
                    role: SourceRole::Primary,
                    result: Ok(value),
                }],
            },
            series,
        }
    }

    #[test]
    fn apply_replaces_context_and_counts() {
        let mut view = GaugeView::default();
        let mut chart = ChartAdapter::new();
        chart.setup(ChartStyle::default());

        let ctx = apply_cycle(RefreshContext::default(), cycle(0.005), &mut view, &mut chart);
        assert_eq!(ctx.cycles, 1);
        assert_eq!(ctx.recommendation.unwrap().tier, Tier::Low);

        let ctx = apply_cycle(ctx, cycle(0.2), &mut view, &mut chart);
        assert_eq!(ctx.cycles, 2);
        assert_eq!(ctx.reading.as_ref().unwrap().value(), 0.2);
        assert_eq!(view.style, "high");
        assert_eq!(chart.values(), &[0.02]);
    }

    #[test]
    fn presentation_error_leaves_chart_alone() {
        let mut view = GaugeView::default();
        let mut chart = ChartAdapter::new();
        chart.setup(ChartStyle::default());

        let ctx = apply_cycle(RefreshContext::default(), cycle(f64::NAN), &mut view, &mut chart);
        assert!(ctx.last_error.is_some());
        assert!(ctx.recommendation.is_none());
        assert!(ctx.series.is_none());
        assert_eq!(view.current, "Error");
        assert_eq!(chart.redraw_count(), 0);
        assert!(chart.values().is_empty());
    }

    #[test]
    fn presentation_error_keeps_previous_series() {
        let mut view = GaugeView::default();
        let mut chart = ChartAdapter::new();
        chart.setup(ChartStyle::default());

        let ctx = apply_cycle(RefreshContext::default(), cycle(0.01), &mut view, &mut chart);
        let before = ctx.series.clone();

        let mut bad = cycle(-1.0);
        bad.series = HistorySeries::new(vec!["Tue".into()], vec![0.04]).unwrap();
        let ctx = apply_cycle(ctx, bad, &mut view, &mut chart);

        assert_eq!(ctx.cycles, 2);
        assert_eq!(ctx.series, before);
        assert_eq!(chart.values(), &[0.02]);
        assert_eq!(chart.labels(), &["Mon".to_string()]);
        assert_eq!(chart.redraw_count(), 1);
        assert_eq!(view.current, "Error");
    }
}
