//! Error history overlay.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(inner.height as usize)
    {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
