//! Gastrack CLI: one-shot gas readings from the command line.
//!
//! Commands:
//! - `now`: acquire the current Base gas price and print the recommendation
//! - `history`: print a synthesized weekly series
//! - `sources`: list the source table in attempt order

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use gastrack_core::config::GasConfig;
use gastrack_core::data::{
    Acquirer, Acquisition, RequestShape, SourceDescriptor, SourceRole, FALLBACK_GWEI,
    PRIMARY_SOURCES, SECONDARY_SOURCE,
};
use gastrack_core::domain::{HistorySeries, Reading};
use gastrack_core::history::{
    history_rng, synthesize_history, MAX_HISTORY_DAYS, SYNTHETIC_MIN_GWEI, SYNTHETIC_SPAN_GWEI,
};
use gastrack_core::presenter::{average_of, present, GaugeView, Recommendation};

#[derive(Parser)]
#[command(name = "gastrack", about = "Base network gas price tracker", version)]
struct Cli {
    /// Config file. Defaults to <config dir>/gastrack/config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire the current gas price and print a recommendation.
    Now {
        /// Print a JSON object instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Show every source attempt and debug logging.
        #[arg(long, short, default_value_t = false)]
        verbose: bool,

        /// Per-source timeout in milliseconds. Overrides the config file.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Print a synthesized gas price series.
    History {
        /// Number of days. Overrides the config file.
        #[arg(long)]
        days: Option<usize>,

        /// Seed for a reproducible series. Overrides the config file.
        #[arg(long)]
        seed: Option<u64>,

        /// Print a JSON object instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the gas price sources in the order they are tried.
    Sources {
        /// Print a JSON object instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Now { verbose: true, .. });
    init_logger(verbose);

    let config = GasConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Now {
            json,
            verbose,
            timeout_ms,
        } => run_now(&config, json, verbose, timeout_ms),
        Commands::History { days, seed, json } => run_history(&config, days, seed, json),
        Commands::Sources { json } => run_sources(json),
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run_now(config: &GasConfig, json: bool, verbose: bool, timeout_ms: Option<u64>) -> Result<()> {
    let timeout = match timeout_ms {
        Some(0) => bail!("--timeout-ms must be positive"),
        Some(ms) => Duration::from_millis(ms),
        None => config.request_timeout(),
    };

    let acquirer = Acquirer::base_mainnet(timeout).context("building HTTP client")?;
    let acquisition = acquirer.acquire_with_report();

    let mut view = GaugeView::default();
    let presented = present(&acquisition.reading, &mut view);

    if json {
        let report = NowReport::new(&acquisition, presented.as_ref().ok());
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_gauge(&view, &acquisition.reading));
        if verbose {
            print!("{}", render_attempts(&acquisition));
        }
    }

    if let Err(e) = presented {
        bail!(e);
    }
    Ok(())
}

fn run_history(config: &GasConfig, days: Option<usize>, seed: Option<u64>, json: bool) -> Result<()> {
    let days = resolve_days(config, days)?;
    let mut rng = history_rng(seed.or(config.history.seed));
    let today = chrono::Local::now().date_naive();
    let series = synthesize_history(days, today, &mut rng);

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else {
        print!("{}", render_history(&series));
    }
    Ok(())
}

fn resolve_days(config: &GasConfig, days: Option<usize>) -> Result<usize> {
    let days = days.unwrap_or(config.history.days);
    if !(1..=MAX_HISTORY_DAYS).contains(&days) {
        bail!("--days must be between 1 and {MAX_HISTORY_DAYS}, got {days}");
    }
    Ok(days)
}

fn run_sources(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&SourcesReport::new())?);
    } else {
        print!("{}", render_sources());
    }
    Ok(())
}

// ── JSON output ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct NowReport<'a> {
    reading: &'a Reading,
    average: Option<f64>,
    recommendation: Option<&'a Recommendation>,
    attempts: Vec<AttemptReport>,
}

#[derive(Serialize)]
struct AttemptReport {
    source: &'static str,
    role: SourceRole,
    value: Option<f64>,
    error: Option<String>,
}

#[derive(Serialize)]
struct SourcesReport {
    sources: Vec<SourceEntry>,
    fallback_gwei: f64,
}

#[derive(Serialize)]
struct SourceEntry {
    role: SourceRole,
    #[serde(flatten)]
    descriptor: SourceDescriptor,
}

impl SourcesReport {
    fn new() -> Self {
        let sources = PRIMARY_SOURCES
            .iter()
            .map(|s| SourceEntry {
                role: SourceRole::Primary,
                descriptor: *s,
            })
            .chain(std::iter::once(SourceEntry {
                role: SourceRole::Secondary,
                descriptor: SECONDARY_SOURCE,
            }))
            .collect();
        Self {
            sources,
            fallback_gwei: FALLBACK_GWEI,
        }
    }
}

impl<'a> NowReport<'a> {
    fn new(acquisition: &'a Acquisition, recommendation: Option<&'a Recommendation>) -> Self {
        let attempts = acquisition
            .attempts
            .iter()
            .map(|a| AttemptReport {
                source: a.source,
                role: a.role,
                value: a.result.as_ref().ok().copied(),
                error: a.result.as_ref().err().map(|e| e.to_string()),
            })
            .collect();
        Self {
            reading: &acquisition.reading,
            average: recommendation.map(|_| average_of(acquisition.reading.value())),
            recommendation,
            attempts,
        }
    }
}

// ── Text output ──────────────────────────────────────────────────────

fn render_gauge(view: &GaugeView, reading: &Reading) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<16}{} gwei\n", "Gas price:", view.current));
    if view.is_error() {
        return out;
    }
    out.push_str(&format!("{:<16}{} gwei\n", "Average:", view.average));
    let tier = view.tier().map(|t| t.label()).unwrap_or("?");
    out.push_str(&format!("{:<16}{} ({tier})\n", "Recommendation:", view.recommendation));
    out.push_str(&format!("{:<16}{}\n", "Updated:", view.last_updated));
    out.push_str(&format!("{:<16}{}\n", "Source:", reading.origin().describe()));
    out
}

fn render_attempts(acquisition: &Acquisition) -> String {
    let mut out = String::from("\nAttempts:\n");
    for a in &acquisition.attempts {
        let role = match a.role {
            SourceRole::Primary => "primary",
            SourceRole::Secondary => "secondary",
        };
        match &a.result {
            Ok(v) => out.push_str(&format!("  [ok]   {role:<9} {:<34} {v}\n", a.source)),
            Err(e) => out.push_str(&format!("  [fail] {role:<9} {:<34} {e}\n", a.source)),
        }
    }
    if acquisition.reading.origin().is_fallback() {
        out.push_str(&format!("  [used] fallback  {FALLBACK_GWEI} gwei\n"));
    }
    out
}

fn render_history(series: &HistorySeries) -> String {
    const BAR_WIDTH: f64 = 40.0;
    let top = SYNTHETIC_MIN_GWEI + SYNTHETIC_SPAN_GWEI;
    series
        .points()
        .map(|(label, value)| {
            let len = ((value / top) * BAR_WIDTH).round().clamp(0.0, BAR_WIDTH) as usize;
            format!("{label:<4} {value:.3}  {}\n", "#".repeat(len))
        })
        .collect()
}

fn render_sources() -> String {
    let mut out = String::new();
    let table = PRIMARY_SOURCES
        .iter()
        .map(|s| ("primary", s))
        .chain(std::iter::once(("secondary", &SECONDARY_SOURCE)));
    for (i, (role, source)) in table.enumerate() {
        out.push_str(&format!(
            "{}. {role:<9} {:<34} {}  ({})\n",
            i + 1,
            source.name,
            source.url,
            describe_request(source)
        ));
    }
    out.push_str(&format!("   fallback  {FALLBACK_GWEI} gwei\n"));
    out
}

fn describe_request(source: &SourceDescriptor) -> String {
    match source.request {
        RequestShape::JsonRpcPost { method } => format!("POST {method}"),
        RequestShape::Get => "GET".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate, TimeZone};
    use gastrack_core::data::{Attempt, SourceError};
    use gastrack_core::domain::ReadingOrigin;

    fn acquisition(value: f64) -> Acquisition {
        let ts = Local.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap();
        Acquisition {
            reading: Reading::at(
                value,
                ts,
                ReadingOrigin::Primary {
                    source: "base.llamarpc.com".into(),
                },
            ),
            attempts: vec![
                Attempt {
                    source: "mainnet.base.org",
                    role: SourceRole::Primary,
                    result: Err(SourceError::HttpStatus { status: 429 }),
                },
                Attempt {
                    source: "base.llamarpc.com",
                    role: SourceRole::Primary,
                    result: Ok(value),
                },
            ],
        }
    }

    #[test]
    fn parses_now_flags() {
        let cli = Cli::try_parse_from(["gastrack", "now", "--json", "--timeout-ms", "250"]).unwrap();
        match cli.command {
            Commands::Now {
                json, timeout_ms, ..
            } => {
                assert!(json);
                assert_eq!(timeout_ms, Some(250));
            }
            _ => panic!("expected now"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["gastrack", "history", "--config", "/tmp/g.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/g.toml")));
    }

    #[test]
    fn gauge_text() {
        let acq = acquisition(0.02);
        let mut view = GaugeView::default();
        present(&acq.reading, &mut view).unwrap();

        let text = render_gauge(&view, &acq.reading);
        assert!(text.contains("0.020 gwei"));
        assert!(text.contains("0.017 gwei"));
        assert!(text.contains("Moderate fees (MEDIUM)"));
        assert!(text.contains("14:30:00"));
        assert!(text.contains("primary: base.llamarpc.com"));
    }

    #[test]
    fn attempts_text_lists_failures() {
        let text = render_attempts(&acquisition(0.03));
        assert!(text.contains("[fail] primary   mainnet.base.org"));
        assert!(text.contains("429"));
        assert!(text.contains("[ok]"));
        assert!(!text.contains("[used]"));
    }

    #[test]
    fn json_report_shape() {
        let acq = acquisition(0.005);
        let rec = gastrack_core::presenter::classify(0.005);
        let report = NowReport::new(&acq, Some(&rec));
        let v: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(v["recommendation"]["tier"], "LOW");
        assert_eq!(v["attempts"].as_array().unwrap().len(), 2);
        assert_eq!(v["attempts"][0]["value"], serde_json::Value::Null);
        assert_eq!(v["attempts"][1]["value"], 0.005);
        assert!((v["average"].as_f64().unwrap() - 0.00425).abs() < 1e-12);
    }

    #[test]
    fn sources_listed_in_order() {
        let text = render_sources();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("1. primary   mainnet.base.org"));
        assert!(lines[3].contains("etherscan-gasoracle"));
        assert!(lines[3].contains("(GET)"));
        assert!(lines[4].contains("0.001"));
    }

    #[test]
    fn sources_json_in_attempt_order() {
        let v = serde_json::to_value(SourcesReport::new()).unwrap();
        let sources = v["sources"].as_array().unwrap();
        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0]["name"], "mainnet.base.org");
        assert_eq!(sources[3]["name"], "etherscan-gasoracle");
        assert_eq!(sources[3]["url"], SECONDARY_SOURCE.url);
        assert_eq!(sources[0]["role"], "primary");
        assert_eq!(sources[3]["role"], "secondary");
        assert_eq!(sources[0]["request"]["method"], "eth_gasPrice");
        assert_eq!(sources[3]["response"], "propose_gas_price");
        assert_eq!(v["fallback_gwei"], 0.001);
    }

    #[test]
    fn parses_sources_json_flag() {
        let cli = Cli::try_parse_from(["gastrack", "sources", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Sources { json: true }));
    }

    #[test]
    fn history_days_bounded() {
        let config = GasConfig::default();
        assert_eq!(resolve_days(&config, None).unwrap(), 7);
        assert_eq!(resolve_days(&config, Some(365)).unwrap(), 365);
        assert!(resolve_days(&config, Some(0)).is_err());
        let err = resolve_days(&config, Some(100_000_000)).unwrap_err();
        assert!(err.to_string().contains("365"));
    }

    #[test]
    fn history_bars() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let series = synthesize_history(7, day, &mut history_rng(Some(4)));
        let text = render_history(&series);
        assert_eq!(text.lines().count(), 7);
        assert!(text.lines().last().unwrap().starts_with("Wed"));
    }
}
