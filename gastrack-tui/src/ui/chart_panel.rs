//! Weekly trend line chart fed from the chart adapter.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use gastrack_core::chart::{ChartAdapter, ChartStyle};

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, chart: &ChartAdapter) {
    match chart.style() {
        Some(style) if chart.has_data() => render_chart(f, area, chart, style),
        _ => render_empty(f, area),
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No trend data yet. Press r to refresh.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, chart: &ChartAdapter, style: &ChartStyle) {
    let line_color = theme::rgb(style.line_color);
    let data: Vec<(f64, f64)> = chart
        .values()
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let [y_min, y_max] = chart.y_bounds();
    let x_max = data.len().saturating_sub(1) as f64;

    let mut datasets = Vec::with_capacity(2);
    if style.fill {
        // Vertical bars under each point shade the area.
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(line_color).add_modifier(Modifier::DIM))
                .graph_type(GraphType::Bar)
                .data(&data),
        );
    }
    datasets.push(
        Dataset::default()
            .name(style.dataset_label.clone())
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(line_color))
            .graph_type(GraphType::Line)
            .data(&data),
    );

    let x_labels: Vec<Span> = chart
        .labels()
        .iter()
        .map(|l| Span::styled(l.clone(), theme::muted()))
        .collect();

    let mut widget = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(style.dataset_label.clone(), theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.3}"), theme::muted()),
                    Span::styled(format!("{y_max:.3}"), theme::muted()),
                ]),
        );
    if !style.show_legend {
        widget = widget.legend_position(None);
    }

    f.render_widget(widget, area);
}
