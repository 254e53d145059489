//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use chrono::NaiveDateTime;
use log::error;

use gastrack_core::chart::{ChartAdapter, ChartStyle};
use gastrack_core::presenter::GaugeView;
use gastrack_core::refresh::{self, CycleData, RefreshContext};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Trigger label while idle.
pub const REFRESH_LABEL: &str = "🔄 Refresh";

/// Trigger label while a refresh is in flight.
pub const LOADING_LABEL: &str = "⏳ Loading...";

const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Display,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Display => "UI",
            ErrorCategory::Other => "ERR",
        }
    }

    /// Map a `SourceError::category()` string.
    pub fn from_source(category: &str) -> Self {
        match category {
            "network" => ErrorCategory::Network,
            "data" => ErrorCategory::Data,
            _ => ErrorCategory::Other,
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    // Display surfaces
    pub gauge: GaugeView,
    pub chart: ChartAdapter,
    pub refresh: RefreshContext,
    pub refresh_in_flight: bool,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    pub worker_alive: bool,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(worker_tx: Sender<WorkerCommand>, worker_rx: Receiver<WorkerResponse>) -> Self {
        let mut chart = ChartAdapter::new();
        chart.setup(ChartStyle::default());
        Self {
            running: true,
            gauge: GaugeView::default(),
            chart,
            refresh: RefreshContext::default(),
            refresh_in_flight: false,
            worker_tx,
            worker_rx,
            worker_alive: true,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.refresh_in_flight {
            LOADING_LABEL
        } else {
            REFRESH_LABEL
        }
    }

    /// Ask the worker for a new cycle. Ignored while one is in flight;
    /// returns whether a request was sent.
    pub fn request_refresh(&mut self) -> bool {
        if self.refresh_in_flight {
            return false;
        }
        if !self.worker_alive || self.worker_tx.send(WorkerCommand::Refresh).is_err() {
            self.push_error(
                ErrorCategory::Other,
                "Worker thread is not running".into(),
                "refresh".into(),
            );
            return false;
        }
        self.refresh_in_flight = true;
        self.set_status("Fetching gas price...");
        true
    }

    /// Apply a finished cycle from the worker to the surfaces.
    pub fn apply_cycle(&mut self, data: CycleData) {
        self.refresh_in_flight = false;

        for (source, err) in data.acquisition.failures() {
            self.record_error(
                ErrorCategory::from_source(err.category()),
                err.to_string(),
                source.to_string(),
            );
        }

        let ctx = std::mem::take(&mut self.refresh);
        self.refresh = refresh::apply_cycle(ctx, data, &mut self.gauge, &mut self.chart);

        if let Some(err) = self.refresh.last_error.clone() {
            self.push_error(ErrorCategory::Display, err, "presenter".into());
            return;
        }
        let origin = self.refresh.reading.as_ref().map(|r| r.origin().clone());
        match origin {
            Some(origin) if origin.is_fallback() => {
                let msg = format!(
                    "All sources failed; showing fallback {} gwei",
                    self.gauge.current
                );
                self.set_warning(msg);
            }
            Some(origin) => self.set_status(format!("Updated from {}", origin.describe())),
            None => {}
        }
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::RefreshDone(data) => self.apply_cycle(*data),
        }
    }

    /// Apply every pending worker response without blocking.
    ///
    /// A disconnected channel means the worker thread is gone: the in-flight
    /// gate is released and the loss is reported once.
    pub fn drain_worker(&mut self) {
        loop {
            match self.worker_rx.try_recv() {
                Ok(resp) => self.handle_worker_response(resp),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.worker_alive {
                        self.worker_alive = false;
                        self.refresh_in_flight = false;
                        error!("Worker thread stopped");
                        self.push_error(
                            ErrorCategory::Other,
                            "Worker thread stopped".into(),
                            "worker".into(),
                        );
                    }
                    break;
                }
            }
        }
    }

    /// Push an error to the history and show it in the status bar.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        self.record_error(category, message.clone(), context);
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Push an error to the history only, capping at 50.
    fn record_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message,
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
