//! TOML configuration for the ambient knobs.
//!
//! The endpoint table is compiled in and not configurable; this file only
//! covers timing, history length and seeding, and UI tick rate.
//!
//! ```toml
//! [acquisition]
//! timeout_ms = 5000
//!
//! [history]
//! days = 7
//! seed = 42
//!
//! [ui]
//! tick_ms = 250
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::history::{HISTORY_DAYS, MAX_HISTORY_DAYS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Bounded wait per source attempt.
    pub timeout_ms: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub days: usize,
    /// Fixed seed for the synthetic series; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            days: HISTORY_DAYS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_ms: 250 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasConfig {
    pub acquisition: AcquisitionConfig,
    pub history: HistoryConfig,
    pub ui: UiConfig,
}

impl GasConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GasConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Explicit path must exist. Without one, the per-user config file is
    /// used when present and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.acquisition.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "acquisition.timeout_ms must be positive".into(),
            ));
        }
        if !(1..=MAX_HISTORY_DAYS).contains(&self.history.days) {
            return Err(ConfigError::Invalid(format!(
                "history.days must be between 1 and {MAX_HISTORY_DAYS}"
            )));
        }
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::Invalid("ui.tick_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.acquisition.timeout_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.ui.tick_ms)
    }
}

/// `<config dir>/gastrack`, e.g. `~/.config/gastrack` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gastrack"))
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let c = GasConfig::from_toml_str("").unwrap();
        assert_eq!(c, GasConfig::default());
        assert_eq!(c.request_timeout(), Duration::from_secs(5));
        assert_eq!(c.history.days, 7);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let c = GasConfig::from_toml_str("[history]\nseed = 42\n").unwrap();
        assert_eq!(c.history.seed, Some(42));
        assert_eq!(c.history.days, 7);
        assert_eq!(c.acquisition.timeout_ms, 5_000);
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = GasConfig::from_toml_str("[acquisition]\ntimeout_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn history_days_bounded() {
        let err = GasConfig::from_toml_str("[history]\ndays = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GasConfig::from_toml_str("[history]\ndays = 100000000\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("365")));

        let c = GasConfig::from_toml_str("[history]\ndays = 365\n").unwrap();
        assert_eq!(c.history.days, MAX_HISTORY_DAYS);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = GasConfig::from_toml_str("[history\ndays = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = GasConfig::from_toml_str("[history]\ndays = \"seven\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
