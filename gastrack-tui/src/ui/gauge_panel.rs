//! Gauge panel: current fee, derived average, recommendation, capture time.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let gauge = &app.gauge;
    let tier = gauge.tier();

    let value_style = if gauge.is_error() {
        theme::negative()
    } else {
        theme::tier_style(tier)
    };

    let source = app
        .refresh
        .reading
        .as_ref()
        .map(|r| r.origin().describe())
        .unwrap_or_else(|| "--".to_string());

    let trigger_style = if app.refresh_in_flight {
        theme::warning()
    } else {
        theme::accent()
    };

    let lines = vec![
        row("Current", &gauge.current, " gwei", value_style),
        row("Average", &gauge.average, " gwei", theme::text()),
        Line::from(vec![
            Span::styled(format!("  {:>14}: ", "Recommendation"), theme::muted()),
            Span::styled(gauge.recommendation.clone(), theme::tier_style(tier)),
        ]),
        row("Last updated", &gauge.last_updated, "", theme::text()),
        row("Source", &source, "", theme::neutral()),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [r] ", theme::muted()),
            Span::styled(app.trigger_label(), trigger_style),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), area);
}

fn row<'a>(label: &str, value: &str, unit: &'static str, style: ratatui::style::Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {label:>14}: "), theme::muted()),
        Span::styled(value.to_string(), style),
        Span::styled(unit, theme::muted()),
    ])
}
