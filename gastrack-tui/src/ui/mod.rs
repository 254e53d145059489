//! Top-level UI layout: gauge over chart, status bar underneath.

pub mod chart_panel;
pub mod gauge_panel;
pub mod help_panel;
pub mod overlays;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Height of the gauge panel including borders.
const GAUGE_HEIGHT: u16 = 9;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(GAUGE_HEIGHT), Constraint::Min(5)])
        .split(main_area);

    let gauge_inner = bordered(f, panels[0], " Base Gas ");
    gauge_panel::render(f, gauge_inner, app);

    let chart_inner = bordered(f, panels[1], &chart_title(app.chart.labels().len()));
    chart_panel::render(f, chart_inner, &app.chart);

    status_bar::render(f, status_area, app);

    // Overlays on top.
    match app.overlay {
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::Help => help_panel::render(f, main_area),
        Overlay::None => {}
    }
}

/// Chart panel title sized to the series on screen.
fn chart_title(days: usize) -> String {
    match days {
        0 => " Trend ".to_string(),
        n => format!(" {n}-Day Trend "),
    }
}

/// Draw a panel border and return the inner area.
fn bordered(f: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(title.to_string())
        .title_style(theme::panel_title(true));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
