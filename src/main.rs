//! Volume Hunter - Pre-Graduation Volume Scanner
//!
//! Live terminal dashboard over a simulated pump.fun pair feed.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use volume_hunter::adapters::cli::{parse_command, CliApp, Command, RunCmd, SimulateCmd};
use volume_hunter::adapters::display::{
    render_alert_card, render_dashboard, render_stats, DashboardOptions,
};
use volume_hunter::adapters::notify::{build_notifier, SilentNotifier};
use volume_hunter::application::{Scanner, ScannerCommand};
use volume_hunter::config::{load_or_default, Config, ConfigSource};
use volume_hunter::ports::{RandomSource, RngSource, SystemClock};

/// Alerts listed after a `simulate` run
const SIMULATE_ALERTS_SHOWN: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (RUST_LOG may live there)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();

    match app.command {
        Command::Run(cmd) => run_command(cmd, app.verbose, app.debug).await,
        Command::Simulate(cmd) => simulate_command(cmd, app.verbose, app.debug),
    }
}

/// RUST_LOG wins, then --debug / --verbose, then `[logging] level`
fn init_logging(verbose: bool, debug: bool, config_level: &str) -> Result<()> {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        config_level
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Invalid log level")?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn build_rng(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => {
            tracing::info!("Seeding pair generator with {}", seed);
            Box::new(RngSource::seeded(seed))
        }
        None => Box::new(RngSource::from_entropy()),
    }
}

fn load(path: &std::path::Path) -> Result<(Config, ConfigSource)> {
    load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

async fn run_command(cmd: RunCmd, verbose: bool, debug: bool) -> Result<()> {
    let (mut config, source) = load(&cmd.config)?;
    if let Some(ms) = cmd.min_delay_ms {
        config.scanner.min_delay_ms = ms;
    }
    if let Some(ms) = cmd.max_delay_ms {
        config.scanner.max_delay_ms = ms;
    }
    config.validate().context("Invalid scanner settings")?;

    init_logging(verbose, debug, &config.logging.level)?;
    tracing::info!("Starting Volume Hunter...");
    source.log();

    let mode = cmd.notification_mode(config.notifications.mode);
    let notifier = build_notifier(mode);
    tracing::info!("Notifications: {}", notifier.name());

    let scanner = Scanner::new(
        config.scanner_settings(),
        build_rng(cmd.seed),
        Arc::new(SystemClock),
        notifier,
    )
    .context("Failed to create scanner")?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<ScannerCommand>(32);
    let (update_tx, mut update_rx) = watch::channel(scanner.snapshot());
    let scanner_task = tokio::spawn(scanner.run(cmd_rx, update_tx));

    // Setup Ctrl+C handler
    let shutdown_tx = cmd_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
        shutdown_tx.send(ScannerCommand::Shutdown).await.ok();
    });

    // Blocking stdin reads stay off the runtime so shutdown never waits on them
    std::thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || read_commands(cmd_tx))
        .context("Failed to spawn stdin reader")?;

    let opts = DashboardOptions {
        color: config.ui.color,
        dev_wallet_limit: config.filters.max_dev_wallet_pct,
    };
    let mut refresh = tokio::time::interval(Duration::from_secs(config.ui.refresh_secs));

    loop {
        tokio::select! {
            changed = update_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = refresh.tick() => {}
        }
        let snapshot = update_rx.borrow_and_update().clone();
        draw(&render_dashboard(&snapshot, Utc::now(), &opts))?;
    }

    let final_snapshot = scanner_task.await.context("Scanner task failed")?;
    println!();
    println!("{}", render_stats(&final_snapshot.stats));
    tracing::info!("Volume Hunter stopped");
    Ok(())
}

fn read_commands(tx: mpsc::Sender<ScannerCommand>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                tracing::debug!("Unknown command: {}", line.trim());
            }
            continue;
        };
        if tx.blocking_send(command).is_err() || command == ScannerCommand::Shutdown {
            break;
        }
    }
}

fn draw(frame: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    write!(out, "\x1b[2J\x1b[H{frame}").context("Failed to write dashboard")?;
    out.flush().context("Failed to flush dashboard")?;
    Ok(())
}

fn simulate_command(cmd: SimulateCmd, verbose: bool, debug: bool) -> Result<()> {
    let (config, source) = load(&cmd.config)?;
    init_logging(verbose, debug, &config.logging.level)?;
    source.log();

    let mut scanner = Scanner::new(
        config.scanner_settings(),
        build_rng(cmd.seed),
        Arc::new(SystemClock),
        Box::new(SilentNotifier),
    )
    .context("Failed to create scanner")?;

    for _ in 0..cmd.cycles {
        scanner.scan_once();
    }
    let snapshot = scanner.snapshot();

    if cmd.json {
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to encode snapshot")?;
        println!("{json}");
        return Ok(());
    }

    println!("Simulated {} scan cycles", cmd.cycles);
    println!("{}", render_stats(&snapshot.stats));

    let opts = DashboardOptions {
        color: config.ui.color,
        dev_wallet_limit: config.filters.max_dev_wallet_pct,
    };
    let now = Utc::now();
    for alert in snapshot.alerts.iter().take(SIMULATE_ALERTS_SHOWN) {
        println!();
        println!("{}", render_alert_card(alert, now, &opts));
    }
    if snapshot.alerts.len() > SIMULATE_ALERTS_SHOWN {
        println!();
        println!(
            "... {} more alerts in history",
            snapshot.alerts.len() - SIMULATE_ALERTS_SHOWN
        );
    }

    Ok(())
}
