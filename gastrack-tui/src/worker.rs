//! Background worker thread: network requests and history synthesis run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! owns the acquirer and the history generator; the main thread owns every
//! display surface and applies finished cycles itself.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use chrono::Local;
use log::{debug, info};
use rand::rngs::StdRng;

use gastrack_core::data::{Acquirer, Transport};
use gastrack_core::refresh::{fetch_cycle, CycleData};

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerCommand {
    /// Run one acquisition and synthesize a fresh series.
    Refresh,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    RefreshDone(Box<CycleData>),
}

/// Everything the worker needs to produce a cycle.
pub struct WorkerContext<T: Transport> {
    pub acquirer: Acquirer<T>,
    pub rng: StdRng,
    pub history_days: usize,
}

/// Spawn the background worker thread.
pub fn spawn_worker<T: Transport + 'static>(
    ctx: WorkerContext<T>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("gastrack-worker".into())
        .spawn(move || worker_loop(ctx, rx, tx))
}

fn worker_loop<T: Transport>(
    mut ctx: WorkerContext<T>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Refresh) => {
                debug!("Worker: refresh requested");
                let today = Local::now().date_naive();
                let data = fetch_cycle(&ctx.acquirer, &mut ctx.rng, today, ctx.history_days);
                if tx.send(WorkerResponse::RefreshDone(Box::new(data))).is_err() {
                    // UI side is gone.
                    break;
                }
            }
        }
    }
    info!("Worker stopped");
}
