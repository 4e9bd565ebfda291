//! Scanner Orchestrator
//!
//! Owns the whole scan session: counters, alert history and the
//! Running/Paused state. Each cycle:
//!
//! 1. Counts the scan
//! 2. Pulls a synthetic pair from the feed
//! 3. Runs the filter pipeline (rejections count as filtered)
//! 4. Checks buy pressure + higher lows (misses also count as filtered)
//! 5. On a hit, records the alert and fires the notifier
//!
//! The async [`Scanner::run`] loop sleeps on the [`ScanSchedule`] deadline,
//! applies [`ScannerCommand`]s as they arrive and publishes a
//! [`ScannerSnapshot`] after every change.

use std::ops::ControlFlow;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::time::Duration;

use super::schedule::{wait_until, ScanSchedule};
use crate::adapters::market_data::SyntheticPairFeed;
use crate::domain::{
    Alert, AlertCheck, AlertHistory, FilterPipeline, FilterResult, FilterThresholds, ScanStats,
    DEFAULT_HISTORY_LIMIT,
};
use crate::ports::{Clock, Notifier, RandomSource};

/// Default lower bound of the delay between scans
pub const DEFAULT_MIN_DELAY_MS: u64 = 3_000;

/// Default upper bound (exclusive) of the delay between scans
pub const DEFAULT_MAX_DELAY_MS: u64 = 8_000;

#[derive(Debug, Error)]
pub enum ScannerError {
    #[error("Invalid scanner settings: {0}")]
    InvalidSettings(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ScannerStatus {
    #[default]
    Running,
    Paused,
}

impl ScannerStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, ScannerStatus::Running)
    }
}

/// Inbound user commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerCommand {
    /// Flip Running/Paused
    Toggle,
    Pause,
    Resume,
    /// Empty the alert history (counters untouched)
    Clear,
    /// Stop the run loop
    Shutdown,
}

/// Result of a single scan cycle
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// Rejected by the filter pipeline
    Filtered(FilterResult),
    /// Passed filters but price action did not confirm
    Missed(AlertCheck),
    /// New alert, already recorded in history
    Alerted(Alert),
}

impl ScanOutcome {
    pub fn is_alert(&self) -> bool {
        matches!(self, ScanOutcome::Alerted(_))
    }
}

/// Everything the display layer needs to render one frame
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScannerSnapshot {
    pub status: ScannerStatus,
    pub stats: ScanStats,
    /// Newest first
    pub alerts: Vec<Alert>,
}

/// Tunables for one scanner instance
#[derive(Debug, Clone)]
pub struct ScannerSettings {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub history_limit: usize,
    pub thresholds: FilterThresholds,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(DEFAULT_MIN_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            history_limit: DEFAULT_HISTORY_LIMIT,
            thresholds: FilterThresholds::default(),
        }
    }
}

impl ScannerSettings {
    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.min_delay.is_zero() {
            return Err(ScannerError::InvalidSettings(
                "min_delay must be > 0".to_string(),
            ));
        }
        if self.max_delay <= self.min_delay {
            return Err(ScannerError::InvalidSettings(format!(
                "max_delay ({:?}) must be > min_delay ({:?})",
                self.max_delay, self.min_delay
            )));
        }
        if self.history_limit == 0 {
            return Err(ScannerError::InvalidSettings(
                "history_limit must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Session state, owned by exactly one scanner
#[derive(Debug, Clone)]
pub struct ScannerState {
    pub status: ScannerStatus,
    pub stats: ScanStats,
    pub history: AlertHistory,
}

impl ScannerState {
    fn new(history_limit: usize) -> Self {
        Self {
            status: ScannerStatus::Running,
            stats: ScanStats::default(),
            history: AlertHistory::new(history_limit),
        }
    }
}

pub struct Scanner {
    settings: ScannerSettings,
    state: ScannerState,
    schedule: ScanSchedule,
    feed: SyntheticPairFeed,
    pipeline: FilterPipeline,
    rng: Box<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    notifier: Box<dyn Notifier>,
}

impl Scanner {
    pub fn new(
        settings: ScannerSettings,
        rng: Box<dyn RandomSource>,
        clock: Arc<dyn Clock>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, ScannerError> {
        settings.validate()?;
        let pipeline = FilterPipeline::new(settings.thresholds.clone());

        Ok(Self {
            state: ScannerState::new(settings.history_limit),
            settings,
            schedule: ScanSchedule::idle(),
            feed: SyntheticPairFeed::new(),
            pipeline,
            rng,
            clock,
            notifier,
        })
    }

    pub fn status(&self) -> ScannerStatus {
        self.state.status
    }

    pub fn stats(&self) -> ScanStats {
        self.state.stats
    }

    pub fn history(&self) -> &AlertHistory {
        &self.state.history
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    pub fn schedule(&self) -> &ScanSchedule {
        &self.schedule
    }

    pub fn settings(&self) -> &ScannerSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            status: self.state.status,
            stats: self.state.stats,
            alerts: self.state.history.to_vec(),
        }
    }

    /// Run one scan cycle immediately, independent of the schedule
    pub fn scan_once(&mut self) -> ScanOutcome {
        self.state.stats.record_scan();

        let candidate = self.feed.next_candidate(self.rng.as_mut());

        let filter_result = self.pipeline.evaluate(&candidate);
        if !filter_result.passed {
            self.state.stats.record_filtered();
            tracing::debug!(
                symbol = %candidate.symbol,
                reasons = ?filter_result.reason_messages(),
                "Pair filtered"
            );
            return ScanOutcome::Filtered(filter_result);
        }

        let check = AlertCheck::evaluate(&candidate);
        if !check.triggered() {
            self.state.stats.record_filtered();
            tracing::debug!(
                symbol = %candidate.symbol,
                buy_pressure_ok = check.buy_pressure_ok,
                higher_lows_ok = check.higher_lows_ok,
                "Pair passed filters but alert conditions not met"
            );
            return ScanOutcome::Missed(check);
        }

        self.state.stats.record_alert();
        let alert = Alert::new(self.state.stats.alerts, self.clock.now(), candidate);
        tracing::info!(
            "🚨 Alert #{}: {} mc=${:.0} liq=${:.0} volume +{}%",
            alert.id,
            alert.candidate.symbol,
            alert.candidate.market_cap,
            alert.candidate.liquidity,
            alert.volume_change_display()
        );
        self.state.history.push(alert.clone());

        if let Err(e) = self.notifier.notify(&alert) {
            tracing::warn!("Notifier '{}' failed: {}", self.notifier.name(), e);
        }

        ScanOutcome::Alerted(alert)
    }

    /// Random delay in `[min_delay, max_delay)`
    pub fn next_delay(&mut self) -> Duration {
        let min = self.settings.min_delay.as_secs_f64();
        let max = self.settings.max_delay.as_secs_f64();
        Duration::from_secs_f64(self.rng.range(min, max))
    }

    /// Arm the first scan if running and nothing is pending
    pub fn start(&mut self) {
        if !self.state.status.is_running() || self.schedule.is_armed() {
            return;
        }
        let delay = self.next_delay();
        if self.schedule.arm_if_idle(delay) {
            tracing::debug!("Next scan in {:?}", delay);
        }
    }

    /// Returns false if already paused
    pub fn pause(&mut self) -> bool {
        if !self.state.status.is_running() {
            return false;
        }
        self.state.status = ScannerStatus::Paused;
        self.schedule.disarm();
        tracing::info!("Scanner paused");
        true
    }

    /// Returns false if already running
    pub fn resume(&mut self) -> bool {
        if self.state.status.is_running() {
            return false;
        }
        self.state.status = ScannerStatus::Running;
        self.start();
        tracing::info!("Scanner resumed");
        true
    }

    pub fn toggle(&mut self) -> ScannerStatus {
        if self.state.status.is_running() {
            self.pause();
        } else {
            self.resume();
        }
        self.state.status
    }

    pub fn clear_history(&mut self) {
        self.state.history.clear();
        tracing::info!("Alert history cleared");
    }

    /// Apply one command; `Break` means the run loop should stop
    pub fn apply(&mut self, command: ScannerCommand) -> ControlFlow<()> {
        match command {
            ScannerCommand::Toggle => {
                self.toggle();
            }
            ScannerCommand::Pause => {
                self.pause();
            }
            ScannerCommand::Resume => {
                self.resume();
            }
            ScannerCommand::Clear => self.clear_history(),
            ScannerCommand::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Handle an elapsed deadline: scan, then re-arm while still running
    pub fn on_deadline(&mut self) -> Option<ScanOutcome> {
        self.schedule.disarm();
        if !self.state.status.is_running() {
            return None;
        }
        let outcome = self.scan_once();
        self.start();
        Some(outcome)
    }

    /// Drive the scanner until `Shutdown` or until every command sender is
    /// dropped. Returns the final snapshot.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<ScannerCommand>,
        updates: watch::Sender<ScannerSnapshot>,
    ) -> ScannerSnapshot {
        tracing::info!(
            "Starting scanner - cadence {:?}..{:?}, history limit {}",
            self.settings.min_delay,
            self.settings.max_delay,
            self.settings.history_limit
        );
        self.start();
        updates.send_replace(self.snapshot());

        loop {
            let deadline = self.schedule.deadline();
            tokio::select! {
                _ = wait_until(deadline) => {
                    self.on_deadline();
                }
                command = commands.recv() => {
                    match command {
                        Some(command) => {
                            if self.apply(command).is_break() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
            updates.send_replace(self.snapshot());
        }

        self.schedule.disarm();
        tracing::info!(
            "Scanner stopped - scanned {}, alerts {}, filtered {}",
            self.state.stats.scanned,
            self.state.stats.alerts,
            self.state.stats.filtered
        );
        let snapshot = self.snapshot();
        updates.send_replace(snapshot.clone());
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{FailingNotifier, ManualClock, RecordingNotifier, SequenceRandom};
    use crate::ports::notifier::MockNotifier;
    use crate::ports::{NotifyError, RngSource};
    use chrono::Utc;

    /// Draw sequence for one generated candidate that passes filters and
    /// triggers an alert (see SyntheticPairFeed draw order)
    fn alert_draws() -> Vec<f64> {
        let mut draws = vec![
            0.1, // name
            0.1, // bare symbol
            0.3, // market cap -> 9_600
            0.5, // liquidity -> 29_000
            0.2, // age -> 9 min
            0.5, // volume prev -> 3_500
            0.9, // multiplier -> 2.3
            0.1, // dev wallet -> 1.5%
            0.1, // bundled -> 3%
            0.1, // snipers -> 3%
            0.1, // mint revoked
            0.1, // freeze disabled
            0.8, // buy pressure -> 88%
            0.1, // higher lows
        ];
        draws.extend(std::iter::repeat(0.5).take(44)); // address
        draws.push(0.9); // not graduated
        draws
    }

    /// Same as `alert_draws` but sell pressure dominates
    fn miss_draws() -> Vec<f64> {
        let mut draws = alert_draws();
        draws[12] = 0.05; // buy pressure -> 43%
        draws
    }

    fn scanner_with(rng: SequenceRandom, notifier: Box<dyn Notifier>) -> Scanner {
        Scanner::new(
            ScannerSettings::default(),
            Box::new(rng),
            Arc::new(ManualClock::new(Utc::now())),
            notifier,
        )
        .unwrap()
    }

    #[test]
    fn test_settings_validation() {
        let settings = ScannerSettings {
            min_delay: Duration::from_millis(5_000),
            max_delay: Duration::from_millis(5_000),
            ..ScannerSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = ScannerSettings {
            history_limit: 0,
            ..ScannerSettings::default()
        };
        assert!(settings.validate().is_err());

        assert!(ScannerSettings::default().validate().is_ok());
    }

    #[test]
    fn test_filtered_scan_counts() {
        // All-zero draws: market cap 3_000 and shrinking volume fail filters
        let mut scanner = scanner_with(
            SequenceRandom::constant(0.0),
            Box::new(RecordingNotifier::new()),
        );
        let outcome = scanner.scan_once();

        assert!(matches!(outcome, ScanOutcome::Filtered(ref r) if !r.passed));
        assert_eq!(
            scanner.stats(),
            ScanStats {
                scanned: 1,
                alerts: 0,
                filtered: 1
            }
        );
        assert!(scanner.history().is_empty());
    }

    #[test]
    fn test_alert_scan_records_and_notifies() {
        let notifier = RecordingNotifier::new();
        let mut scanner =
            scanner_with(SequenceRandom::new(alert_draws()), Box::new(notifier.clone()));

        let outcome = scanner.scan_once();
        let alert = match outcome {
            ScanOutcome::Alerted(alert) => alert,
            other => panic!("expected alert, got {:?}", other),
        };

        assert_eq!(alert.id, 1);
        assert_eq!(alert.volume_change_display(), "130.0");
        assert_eq!(scanner.stats().alerts, 1);
        assert_eq!(scanner.stats().filtered, 0);
        assert_eq!(scanner.history().len(), 1);
        assert_eq!(notifier.get_calls(), vec![1]);
    }

    #[test]
    fn test_alert_miss_counts_as_filtered() {
        let notifier = RecordingNotifier::new();
        let mut scanner =
            scanner_with(SequenceRandom::new(miss_draws()), Box::new(notifier.clone()));

        let outcome = scanner.scan_once();
        assert!(matches!(outcome, ScanOutcome::Missed(check) if !check.buy_pressure_ok));
        assert_eq!(
            scanner.stats(),
            ScanStats {
                scanned: 1,
                alerts: 0,
                filtered: 1
            }
        );
        assert!(scanner.history().is_empty());
        assert!(notifier.get_calls().is_empty());
    }

    #[test]
    fn test_notifier_failure_is_ignored() {
        let notifier = FailingNotifier::new();
        let mut scanner =
            scanner_with(SequenceRandom::new(alert_draws()), Box::new(notifier.clone()));

        assert!(scanner.scan_once().is_alert());
        assert_eq!(notifier.attempts(), 1);
        assert_eq!(scanner.stats().alerts, 1);
        assert_eq!(scanner.history().len(), 1);
    }

    #[test]
    fn test_mock_notifier_called_once_per_alert() {
        let mut mock = MockNotifier::new();
        mock.expect_notify()
            .times(2)
            .returning(|_| Err(NotifyError::Backend("daemon gone".to_string())));
        mock.expect_name().return_const("mock");

        let mut scanner = scanner_with(SequenceRandom::new(alert_draws()), Box::new(mock));
        scanner.scan_once();
        scanner.scan_once();
        assert_eq!(scanner.stats().alerts, 2);
        assert_eq!(scanner.history().get(0).map(|a| a.id), Some(2));
    }

    #[test]
    fn test_history_bounded_at_limit() {
        let mut scanner = scanner_with(
            SequenceRandom::new(alert_draws()),
            Box::new(RecordingNotifier::new()),
        );
        for _ in 0..51 {
            assert!(scanner.scan_once().is_alert());
        }
        assert_eq!(scanner.history().len(), 50);
        assert_eq!(scanner.history().get(0).map(|a| a.id), Some(51));
        assert!(scanner.history().iter().all(|a| a.id != 1));
    }

    #[test]
    fn test_clear_keeps_counters() {
        let mut scanner = scanner_with(
            SequenceRandom::new(alert_draws()),
            Box::new(RecordingNotifier::new()),
        );
        scanner.scan_once();
        scanner.scan_once();
        let before = scanner.stats();

        scanner.apply(ScannerCommand::Clear);
        assert!(scanner.history().is_empty());
        assert_eq!(scanner.stats(), before);
    }

    #[test]
    fn test_alert_timestamp_from_clock() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        let mut scanner = Scanner::new(
            ScannerSettings::default(),
            Box::new(SequenceRandom::new(alert_draws())),
            Arc::new(clock.clone()),
            Box::new(RecordingNotifier::new()),
        )
        .unwrap();

        clock.advance(chrono::Duration::seconds(42));
        scanner.scan_once();
        assert_eq!(
            scanner.history().get(0).map(|a| a.timestamp),
            Some(start + chrono::Duration::seconds(42))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_delay_within_cadence() {
        let mut scanner = Scanner::new(
            ScannerSettings::default(),
            Box::new(RngSource::seeded(5)),
            Arc::new(ManualClock::new(Utc::now())),
            Box::new(RecordingNotifier::new()),
        )
        .unwrap();

        for _ in 0..500 {
            let delay = scanner.next_delay();
            assert!(delay >= Duration::from_millis(3_000));
            assert!(delay < Duration::from_millis(8_000));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_cycles_keep_one_deadline() {
        let mut scanner = scanner_with(
            SequenceRandom::constant(0.0),
            Box::new(RecordingNotifier::new()),
        );
        scanner.start();
        assert!(scanner.schedule().is_armed());

        for _ in 0..10 {
            assert_eq!(scanner.toggle(), ScannerStatus::Paused);
            assert!(!scanner.schedule().is_armed());
            assert_eq!(scanner.toggle(), ScannerStatus::Running);
            assert!(scanner.schedule().is_armed());
        }

        // Repeated resume/start must not stack another deadline
        let deadline = scanner.schedule().deadline();
        assert!(!scanner.resume());
        scanner.start();
        assert_eq!(scanner.schedule().deadline(), deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_while_paused_is_noop() {
        let mut scanner = scanner_with(
            SequenceRandom::constant(0.0),
            Box::new(RecordingNotifier::new()),
        );
        scanner.start();
        scanner.pause();

        assert!(scanner.on_deadline().is_none());
        assert_eq!(scanner.stats().scanned, 0);
        assert!(!scanner.schedule().is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_rearms_while_running() {
        let mut scanner = scanner_with(
            SequenceRandom::constant(0.0),
            Box::new(RecordingNotifier::new()),
        );
        scanner.start();

        assert!(scanner.on_deadline().is_some());
        assert_eq!(scanner.stats().scanned, 1);
        assert!(scanner.schedule().is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_cadence_and_shutdown() {
        // Constant 0.0 draws: every delay is exactly min_delay (3s)
        let scanner = scanner_with(
            SequenceRandom::constant(0.0),
            Box::new(RecordingNotifier::new()),
        );
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (update_tx, update_rx) = watch::channel(ScannerSnapshot::default());
        let handle = tokio::spawn(scanner.run(cmd_rx, update_tx));

        tokio::time::sleep(Duration::from_millis(9_500)).await;
        assert_eq!(update_rx.borrow().stats.scanned, 3);

        cmd_tx.send(ScannerCommand::Shutdown).await.unwrap();
        let final_snapshot = handle.await.unwrap();
        assert_eq!(final_snapshot.stats.scanned, 3);
        assert_eq!(final_snapshot.stats.filtered, 3);
    }
}
