//! Terminal dashboard
//!
//! Renders a [`ScannerSnapshot`] into plain text. No I/O happens here; the
//! binary decides where the frame goes.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::format::{format_count, format_number, time_ago};
use crate::application::{ScannerSnapshot, ScannerStatus};
use crate::domain::{Alert, FilterThresholds, ScanStats};

const GREEN: &str = "\x1b[32m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub const EMPTY_TITLE: &str = "No alerts yet";
pub const EMPTY_SUBTITLE: &str = "Scanning for opportunities...";

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Emit ANSI colour codes
    pub color: bool,
    /// Dev wallet threshold shown next to the dev wallet check
    pub dev_wallet_limit: f64,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            color: true,
            dev_wallet_limit: FilterThresholds::default().max_dev_wallet_pct,
        }
    }
}

impl DashboardOptions {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Label and control hint for the current status
pub fn status_labels(status: ScannerStatus) -> (&'static str, &'static str) {
    match status {
        ScannerStatus::Running => ("Scanning...", "Pause"),
        ScannerStatus::Paused => ("Paused", "Resume"),
    }
}

pub fn render_status_line(status: ScannerStatus, opts: &DashboardOptions) -> String {
    let (label, control) = status_labels(status);
    let indicator = match status {
        ScannerStatus::Running => opts.paint(GREEN, "●"),
        ScannerStatus::Paused => opts.paint(GRAY, "●"),
    };
    format!("{indicator} {label}  [p] {control}  [c] Clear  [q] Quit")
}

pub fn render_stats(stats: &ScanStats) -> String {
    format!(
        "Scanned: {}  |  Alerts: {}  |  Filtered: {}  |  Success: {}",
        format_count(stats.scanned),
        format_count(stats.alerts),
        format_count(stats.filtered),
        stats.success_rate_display()
    )
}

fn check_mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

pub fn render_alert_card(alert: &Alert, now: DateTime<Utc>, opts: &DashboardOptions) -> String {
    let c = &alert.candidate;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  {}  Pre-Grad",
        opts.paint(BOLD, &c.symbol),
        opts.paint(GREEN, "ALERT"),
    );
    let _ = writeln!(out, "  {}", c.address);
    let _ = writeln!(
        out,
        "  MC ${}  |  Liq ${}  |  Age {}m  |  Vol +{}%  |  {}",
        format_number(c.market_cap),
        format_number(c.liquidity),
        c.age_minutes.floor() as u64,
        alert.volume_change_display(),
        time_ago(alert.timestamp, now)
    );
    let _ = writeln!(
        out,
        "  {} Buy pressure {:.1}%  {} Higher lows  {} Dev {:.1}% (<{}%)  {} Mint revoked  {} Freeze off",
        check_mark(c.buy_pressure > c.sell_pressure),
        c.buy_pressure,
        check_mark(c.higher_lows),
        check_mark(c.dev_wallet_pct <= opts.dev_wallet_limit),
        c.dev_wallet_pct,
        opts.dev_wallet_limit,
        check_mark(c.mint_revoked),
        check_mark(c.freeze_disabled),
    );
    let _ = writeln!(
        out,
        "  Volume ${} → ${}",
        format_number(c.volume_prev),
        format_number(c.volume_recent)
    );
    let _ = write!(out, "  {}", c.chart_url());
    out
}

/// Full frame: header, status, stats and the alert list (newest first)
pub fn render_dashboard(
    snapshot: &ScannerSnapshot,
    now: DateTime<Utc>,
    opts: &DashboardOptions,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", opts.paint(BOLD, "🎯 Pre-Graduate Volume Hunter"));
    let _ = writeln!(out, "{}", render_status_line(snapshot.status, opts));
    let _ = writeln!(out, "{}", render_stats(&snapshot.stats));
    let _ = writeln!(out);

    if snapshot.alerts.is_empty() {
        let _ = writeln!(out, "{EMPTY_TITLE}");
        let _ = writeln!(out, "{EMPTY_SUBTITLE}");
        return out;
    }

    for alert in &snapshot.alerts {
        let _ = writeln!(out, "{}", render_alert_card(alert, now, opts));
        let _ = writeln!(out);
    }
    out
}
