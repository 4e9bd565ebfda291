//! Alert Conditions and History
//!
//! A candidate that clears the filter pipeline still needs confirmation from
//! price action before it becomes an alert: buy pressure must dominate and
//! the 1-minute candles must print higher lows.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::Candidate;

/// Default number of alerts kept in history
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Breakdown of the price-action confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertCheck {
    /// Buy pressure exceeds sell pressure
    pub buy_pressure_ok: bool,
    /// Higher lows on 1-minute candles
    pub higher_lows_ok: bool,
}

impl AlertCheck {
    pub fn evaluate(candidate: &Candidate) -> Self {
        Self {
            buy_pressure_ok: candidate.buy_pressure > candidate.sell_pressure,
            higher_lows_ok: candidate.higher_lows,
        }
    }

    pub fn triggered(&self) -> bool {
        self.buy_pressure_ok && self.higher_lows_ok
    }
}

/// True iff both price-action conditions hold
pub fn alert_triggered(candidate: &Candidate) -> bool {
    AlertCheck::evaluate(candidate).triggered()
}

/// A candidate that passed filters and alert conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Sequential alert id (1-based, per session)
    pub id: u64,
    /// When the alert was raised
    pub timestamp: DateTime<Utc>,
    /// The triggering pair
    pub candidate: Candidate,
    /// Volume change between windows, in percent
    pub volume_change_pct: f64,
}

impl Alert {
    pub fn new(id: u64, timestamp: DateTime<Utc>, candidate: Candidate) -> Self {
        let volume_change_pct = candidate.volume_change_pct();
        Self {
            id,
            timestamp,
            candidate,
            volume_change_pct,
        }
    }

    /// Volume change formatted with one decimal place (e.g., "50.0")
    pub fn volume_change_display(&self) -> String {
        format!("{:.1}", self.volume_change_pct)
    }
}

/// Bounded, newest-first alert history
#[derive(Debug, Clone)]
pub struct AlertHistory {
    alerts: VecDeque<Alert>,
    limit: usize,
}

impl Default for AlertHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl AlertHistory {
    /// Create a history holding at most `limit` alerts (minimum 1)
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            alerts: VecDeque::with_capacity(limit + 1),
            limit,
        }
    }

    /// Prepend an alert, evicting the oldest entries beyond the limit
    pub fn push(&mut self, alert: Alert) {
        self.alerts.push_front(alert);
        self.alerts.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Alert at `index`, where 0 is the newest
    pub fn get(&self, index: usize) -> Option<&Alert> {
        self.alerts.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    /// Newest-first copy of the history
    pub fn to_vec(&self) -> Vec<Alert> {
        self.alerts.iter().cloned().collect()
    }
}
