//! Configuration Loader
//!
//! Loads and validates the scanner configuration from TOML. Every section is
//! optional; missing keys fall back to the built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::time::Duration;

use crate::adapters::notify::NotificationMode;
use crate::application::{
    ScannerError, ScannerSettings, DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS,
};
use crate::domain::{FilterThresholds, DEFAULT_HISTORY_LIMIT};

/// Default config location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/volume_hunter.toml";

/// Main configuration structure matching volume_hunter.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerSection,
    pub filters: FilterThresholds,
    pub notifications: NotificationsSection,
    pub ui: UiSection,
    pub logging: LoggingSection,
}

/// Scan cadence and history size
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerSection {
    /// Lower bound of the delay between scans (ms)
    pub min_delay_ms: u64,
    /// Upper bound (exclusive) of the delay between scans (ms)
    pub max_delay_ms: u64,
    /// Alerts kept in history
    pub history_limit: usize,
}

impl Default for ScannerSection {
    fn default() -> Self {
        Self {
            min_delay_ms: DEFAULT_MIN_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotificationsSection {
    /// "tone", "bell", "desktop" or "none"
    pub mode: NotificationMode,
}

/// Dashboard options
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// ANSI colours on the dashboard
    pub color: bool,
    /// Redraw interval for relative timestamps, in seconds
    pub refresh_secs: u64,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            color: true,
            refresh_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level used when neither RUST_LOG nor a CLI flag is set
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Expand `~` and environment variables in a config path
pub fn resolve_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let raw = path.as_ref().to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => PathBuf::from(shellexpand::tilde(&raw).into_owned()),
    }
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(resolve_path(path))?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// This file was missing, built-in defaults in use
    Defaults(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::File(path) | ConfigSource::Defaults(path) => path,
        }
    }

    pub fn is_defaults(&self) -> bool {
        matches!(self, ConfigSource::Defaults(_))
    }

    /// Report the source; call once logging is initialised
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                tracing::info!("Loaded config from {}", path.display());
            }
            ConfigSource::Defaults(path) => {
                tracing::info!("Config file {} not found, using defaults", path.display());
            }
        }
    }
}

/// Like [`load_config`], but a missing file yields the defaults
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<(Config, ConfigSource), ConfigError> {
    let resolved = resolve_path(&path);
    if !resolved.exists() {
        return Ok((Config::default(), ConfigSource::Defaults(resolved)));
    }
    let config = load_config(&resolved)?;
    Ok((config, ConfigSource::File(resolved)))
}

fn check_pct(name: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::ValidationError(format!(
            "{} must be 0-100, got {}",
            name, value
        )));
    }
    Ok(())
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate scanner section
        self.scanner_settings()
            .validate()
            .map_err(|e| match e {
                ScannerError::InvalidSettings(msg) => ConfigError::ValidationError(msg),
            })?;

        // Validate filters
        let f = &self.filters;
        if f.min_market_cap > f.max_market_cap {
            return Err(ConfigError::ValidationError(format!(
                "min_market_cap ({}) must be <= max_market_cap ({})",
                f.min_market_cap, f.max_market_cap
            )));
        }

        if f.max_age_minutes < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "max_age_minutes must be >= 0, got {}",
                f.max_age_minutes
            )));
        }

        check_pct("max_dev_wallet_pct", f.max_dev_wallet_pct)?;
        check_pct("max_bundled_supply_pct", f.max_bundled_supply_pct)?;
        check_pct("max_snipers_pct", f.max_snipers_pct)?;

        // Validate UI
        if self.ui.refresh_secs == 0 {
            return Err(ConfigError::ValidationError(
                "refresh_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn scanner_settings(&self) -> ScannerSettings {
        ScannerSettings {
            min_delay: Duration::from_millis(self.scanner.min_delay_ms),
            max_delay: Duration::from_millis(self.scanner.max_delay_ms),
            history_limit: self.scanner.history_limit,
            thresholds: self.filters.clone(),
        }
    }
}
