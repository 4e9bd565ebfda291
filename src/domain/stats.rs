//! Scan Statistics
//!
//! Session counters shown on the dashboard. Pairs that pass the filters but
//! miss the alert conditions count as filtered, so
//! `scanned == alerts + filtered` always holds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Candidates generated
    pub scanned: u64,
    /// Alerts raised
    pub alerts: u64,
    /// Candidates rejected by filters or alert conditions
    pub filtered: u64,
}

impl ScanStats {
    pub fn record_scan(&mut self) {
        self.scanned += 1;
    }

    pub fn record_alert(&mut self) {
        self.alerts += 1;
    }

    pub fn record_filtered(&mut self) {
        self.filtered += 1;
    }

    /// Alerts per scanned candidate in percent, 0.0 before the first scan
    pub fn success_rate(&self) -> f64 {
        if self.scanned == 0 {
            return 0.0;
        }
        self.alerts as f64 / self.scanned as f64 * 100.0
    }

    /// Success rate as shown on the dashboard: "0%" or one decimal ("50.0%")
    pub fn success_rate_display(&self) -> String {
        if self.scanned == 0 {
            "0%".to_string()
        } else {
            format!("{:.1}%", self.success_rate())
        }
    }
}
