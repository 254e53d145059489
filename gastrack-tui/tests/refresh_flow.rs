//! App state and worker wired together the way `main` wires them.

use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;
use serde_json::{json, Value};

use gastrack_core::data::{Acquirer, SourceDescriptor, SourceError, Transport};
use gastrack_core::history::history_rng;
use gastrack_tui::app::{LOADING_LABEL, REFRESH_LABEL};
use gastrack_tui::worker::{spawn_worker, WorkerCommand, WorkerContext};
use gastrack_tui::{input, AppState};

/// First source always times out, second answers 1 gwei.
struct FlakyFirst;

impl Transport for FlakyFirst {
    fn post_json(&self, url: &str, _body: &Value) -> Result<Value, SourceError> {
        if url.contains("first") {
            Err(SourceError::Timeout(Duration::from_secs(5)))
        } else {
            Ok(json!({ "result": "0x3B9ACA00" }))
        }
    }

    fn get_json(&self, _url: &str) -> Result<Value, SourceError> {
        Err(SourceError::NetworkUnreachable("offline".into()))
    }
}

fn press(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

#[test]
fn refresh_key_round_trip_through_worker() {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let handle = spawn_worker(
        WorkerContext {
            acquirer: Acquirer::new(
                FlakyFirst,
                vec![
                    SourceDescriptor::json_rpc("first", "http://first.test"),
                    SourceDescriptor::json_rpc("second", "http://second.test"),
                ],
                None,
            ),
            rng: history_rng(Some(8)),
            history_days: 7,
        },
        cmd_rx,
        resp_tx,
    )
    .unwrap();

    let mut app = AppState::new(cmd_tx.clone(), resp_rx);
    input::handle_key(&mut app, press('r'));
    assert_eq!(app.trigger_label(), LOADING_LABEL);

    let resp = app.worker_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    app.handle_worker_response(resp);

    assert_eq!(app.trigger_label(), REFRESH_LABEL);
    assert_eq!(app.gauge.current, "1.000");
    assert_eq!(app.gauge.average, "0.850");
    assert_eq!(app.gauge.recommendation, "🛑 Wait if possible");
    assert_eq!(app.chart.values().len(), 7);
    // The timed-out first source is on record.
    assert_eq!(app.error_history.len(), 1);
    assert_eq!(app.error_history[0].context, "first");

    cmd_tx.send(WorkerCommand::Shutdown).unwrap();
    handle.join().unwrap();
}

proptest! {
    /// However many times `r` is pressed, at most one refresh is outstanding.
    #[test]
    fn at_most_one_refresh_in_flight(presses in 1usize..20) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let mut app = AppState::new(cmd_tx, resp_rx);

        for _ in 0..presses {
            input::handle_key(&mut app, press('r'));
        }

        prop_assert_eq!(cmd_rx.try_iter().count(), 1);
        prop_assert!(app.refresh_in_flight);
    }
}
