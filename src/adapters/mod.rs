//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits and outer surfaces:
//! - Market Data: synthetic pre-graduation pair feed
//! - Notify: bell, desktop and silent alert notifiers
//! - Display: dashboard rendering
//! - CLI: command-line interface definitions

pub mod cli;
pub mod display;
pub mod market_data;
pub mod notify;

pub use cli::CliApp;
pub use market_data::SyntheticPairFeed;
pub use notify::{build_notifier, NotificationMode};
