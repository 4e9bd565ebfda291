//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    load_config, load_or_default, resolve_path, Config, ConfigError, ConfigSource, LoggingSection,
    NotificationsSection, ScannerSection, UiSection, DEFAULT_CONFIG_PATH,
};
