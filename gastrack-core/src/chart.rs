//! Chart adapter: line-chart state fed from a [`HistorySeries`].
//!
//! The adapter is `Uninitialized` until `setup` runs once, then `Ready`.
//! Every `render_series` on a ready chart replaces the labels and values
//! wholesale and counts a redraw; on an uninitialized chart it does nothing.
//! The widget itself (ratatui in the TUI) only reads from here.

use serde::Serialize;

use crate::domain::HistorySeries;

/// Widget configuration applied once at setup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub dataset_label: String,
    /// Line color as RGB.
    pub line_color: (u8, u8, u8),
    /// Shade the area under the line.
    pub fill: bool,
    pub begin_at_zero: bool,
    pub show_legend: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            dataset_label: "Gas Price (gwei)".to_string(),
            line_color: (0x00, 0x52, 0xff),
            fill: true,
            begin_at_zero: true,
            show_legend: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ChartState {
    Uninitialized,
    Ready {
        style: ChartStyle,
        labels: Vec<String>,
        values: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartAdapter {
    state: ChartState,
    redraws: u64,
}

impl Default for ChartAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartAdapter {
    pub fn new() -> Self {
        Self {
            state: ChartState::Uninitialized,
            redraws: 0,
        }
    }

    /// Configure the chart. Only the first call has an effect; returns
    /// whether this call did the setup.
    pub fn setup(&mut self, style: ChartStyle) -> bool {
        if self.is_ready() {
            return false;
        }
        self.state = ChartState::Ready {
            style,
            labels: Vec::new(),
            values: Vec::new(),
        };
        true
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ChartState::Ready { .. })
    }

    /// Replace the displayed data with `series` and request a redraw.
    pub fn render_series(&mut self, series: &HistorySeries) {
        if let ChartState::Ready { labels, values, .. } = &mut self.state {
            *labels = series.labels().to_vec();
            *values = series.values().to_vec();
            self.redraws += 1;
        }
    }

    pub fn labels(&self) -> &[String] {
        match &self.state {
            ChartState::Ready { labels, .. } => labels,
            ChartState::Uninitialized => &[],
        }
    }

    pub fn values(&self) -> &[f64] {
        match &self.state {
            ChartState::Ready { values, .. } => values,
            ChartState::Uninitialized => &[],
        }
    }

    pub fn style(&self) -> Option<&ChartStyle> {
        match &self.state {
            ChartState::Ready { style, .. } => Some(style),
            ChartState::Uninitialized => None,
        }
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    pub fn has_data(&self) -> bool {
        !self.values().is_empty()
    }

    /// Y-axis bounds with 10% headroom over the largest value. Starts at
    /// zero when the style asks for it, otherwise at the smallest value.
    pub fn y_bounds(&self) -> [f64; 2] {
        let finite = || self.values().iter().copied().filter(|v| v.is_finite());
        let max = finite().fold(f64::NEG_INFINITY, f64::max);
        let min = finite().fold(f64::INFINITY, f64::min);
        if !max.is_finite() {
            return [0.0, 1.0];
        }
        let begin_at_zero = self.style().map_or(true, |s| s.begin_at_zero);
        let lower = if begin_at_zero { 0.0_f64.min(min) } else { min };
        let upper = if max > lower { max * 1.1 } else { lower + 1.0 };
        [lower, upper]
    }
}
