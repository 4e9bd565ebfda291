//! CLI Commands
//!
//! Argument definitions for the volume hunter binary and the parser for
//! interactive commands typed while the dashboard is running.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::adapters::notify::NotificationMode;
use crate::application::ScannerCommand;
use crate::config::DEFAULT_CONFIG_PATH;

/// Volume Hunter - Pre-graduation pump.fun volume scanner (simulated feed)
#[derive(Parser, Debug)]
#[command(
    name = "volume-hunter",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Pre-graduation volume scanner for pump.fun style pairs",
    long_about = "Volume Hunter watches a simulated stream of pre-graduation pairs, \
                  rejects unsafe ones with ten eligibility filters and alerts when \
                  buy pressure and higher lows confirm rising volume."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the live scanner dashboard
    Run(RunCmd),

    /// Run a fixed number of scan cycles back-to-back and print a summary
    Simulate(SimulateCmd),
}

/// Start the live scanner
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Seed the pair generator for a reproducible session
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Override the minimum delay between scans
    #[arg(long, value_name = "MS")]
    pub min_delay_ms: Option<u64>,

    /// Override the maximum delay between scans
    #[arg(long, value_name = "MS")]
    pub max_delay_ms: Option<u64>,

    /// Disable the alert sound (same as --notify none)
    #[arg(long)]
    pub no_sound: bool,

    /// Notification backend
    #[arg(long, value_enum, value_name = "MODE")]
    pub notify: Option<NotificationMode>,
}

impl RunCmd {
    /// Notification mode after applying CLI overrides to the configured one
    pub fn notification_mode(&self, configured: NotificationMode) -> NotificationMode {
        if self.no_sound {
            return NotificationMode::None;
        }
        self.notify.unwrap_or(configured)
    }
}

/// Headless batch run
#[derive(Parser, Debug)]
pub struct SimulateCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Number of scan cycles
    #[arg(short = 'n', long, value_name = "CYCLES", default_value = "100")]
    pub cycles: u64,

    /// Seed the pair generator
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Map a line typed on stdin to a scanner command
pub fn parse_command(line: &str) -> Option<ScannerCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "p" | "pause" | "resume" | "toggle" => Some(ScannerCommand::Toggle),
        "c" | "clear" => Some(ScannerCommand::Clear),
        "q" | "quit" | "exit" => Some(ScannerCommand::Shutdown),
        _ => None,
    }
}
