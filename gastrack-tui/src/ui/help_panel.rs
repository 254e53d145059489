//! Help overlay: keyboard shortcuts and what the numbers mean.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use gastrack_core::presenter::{HIGH_THRESHOLD, LOW_THRESHOLD};

use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Keys");
    key(&mut lines, "r / F5", "Refresh (ignored while loading)");
    key(&mut lines, "e", "Open error history");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q / Esc", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Recommendation");
    key(&mut lines, &format!("< {LOW_THRESHOLD}"), "LOW: transact now");
    key(&mut lines, &format!("< {HIGH_THRESHOLD}"), "MEDIUM: moderate fees");
    key(&mut lines, &format!(">= {HIGH_THRESHOLD}"), "HIGH: wait if possible");
    lines.push(Line::from(""));

    section(&mut lines, "Notes");
    key(&mut lines, "Average", "Current value x 0.85, not a rolling average");
    key(&mut lines, "Trend", "Synthetic series, regenerated on every refresh");
    key(&mut lines, "Fallback", "0.001 gwei when every source fails");

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>12}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
