//! Gastrack TUI: terminal dashboard for Base gas prices.
//!
//! - Gauge with current fee, derived average, and recommendation
//! - Weekly trend chart
//! - Error history and help overlays
//!
//! Network work happens on a background worker; this crate's state is owned
//! by the main thread.

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
