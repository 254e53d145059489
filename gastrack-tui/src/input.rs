//! Keyboard input dispatch: overlays first, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // Overlays consume input first.
    match app.overlay {
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')
            ) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::None => {}
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('r') | KeyCode::F(5) => {
            app.request_refresh();
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ErrorCategory;
    use crate::worker::WorkerCommand;
    use std::sync::mpsc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> (AppState, mpsc::Receiver<WorkerCommand>) {
        let (tx, rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(tx, resp_rx), rx)
    }

    #[test]
    fn r_sends_one_refresh() {
        let (mut app, rx) = app();
        handle_key(&mut app, press(KeyCode::Char('r')));
        handle_key(&mut app, press(KeyCode::Char('r')));
        assert_eq!(rx.try_recv(), Ok(WorkerCommand::Refresh));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn q_quits() {
        let (mut app, _rx) = app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn overlay_swallows_keys() {
        let (mut app, rx) = app();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::Help);

        handle_key(&mut app, press(KeyCode::Char('r')));
        assert!(rx.try_recv().is_err());
        assert!(app.running);

        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn error_overlay_scrolls_within_bounds() {
        let (mut app, _rx) = app();
        for i in 0..3 {
            app.push_error(ErrorCategory::Network, format!("e{i}"), String::new());
        }
        handle_key(&mut app, press(KeyCode::Char('e')));
        for _ in 0..10 {
            handle_key(&mut app, press(KeyCode::Char('j')));
        }
        assert_eq!(app.error_scroll, 2);
        handle_key(&mut app, press(KeyCode::Char('k')));
        assert_eq!(app.error_scroll, 1);
        handle_key(&mut app, press(KeyCode::Char('e')));
        assert_eq!(app.overlay, Overlay::None);
    }
}
