//! Gastrack TUI: refreshes on start and on `r`, quits on `q`.

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use gastrack_core::config::{self, GasConfig};
use gastrack_core::data::Acquirer;
use gastrack_core::history::history_rng;

use gastrack_tui::worker::{self, WorkerCommand, WorkerContext};
use gastrack_tui::{input, ui, AppState};

fn main() -> Result<()> {
    let log_path = init_logger();

    let config = GasConfig::load(None).context("loading configuration")?;
    info!(
        "Starting gastrack-tui (timeout {} ms, {} history days)",
        config.acquisition.timeout_ms, config.history.days
    );

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let acquirer = Acquirer::base_mainnet(config.request_timeout())
        .context("building HTTP client")?;

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    let worker_handle = worker::spawn_worker(
        WorkerContext {
            acquirer,
            rng: history_rng(config.history.seed),
            history_days: config.history.days,
        },
        cmd_rx,
        resp_tx,
    )
    .context("spawning worker thread")?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx);
    app.request_refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, config.tick());

    // Shutdown worker; an in-flight refresh finishes first.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(path) = log_path {
        info!("Log written to {}", path.display());
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick: Duration,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        app.drain_worker();

        // 3. Poll for input events
        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to `<config dir>/gastrack/gastrack.log` so output never lands on the
/// alternate screen. Logging is skipped if the file cannot be opened.
fn init_logger() -> Option<PathBuf> {
    let dir = config::config_dir()?;
    std::fs::create_dir_all(&dir).ok()?;
    let path = dir.join("gastrack.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Some(path)
}
