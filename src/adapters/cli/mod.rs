//! CLI Adapter
//!
//! Command-line interface for the volume hunter.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{parse_command, CliApp, Command, RunCmd, SimulateCmd};
