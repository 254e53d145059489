//! Gastrack Core: gas-price acquisition, presentation, and trend data for Base.
//!
//! - Source table and ordered fallback chain (primaries, secondary, constant)
//! - Presenter with fee tiers and a derived average
//! - Synthetic weekly history and the chart adapter that displays it
//! - Refresh cycle tying the pieces together
//! - TOML configuration for timeouts, history, and UI tick

pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod history;
pub mod presenter;
pub mod refresh;
