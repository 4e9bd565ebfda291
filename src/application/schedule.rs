//! Scan Schedule
//!
//! Handle for the single pending scan. The scanner loop sleeps until the
//! armed deadline; pausing disarms it and resuming re-arms it only when
//! nothing is pending, so there is never more than one scheduled scan.

use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSchedule {
    deadline: Option<Instant>,
}

impl ScanSchedule {
    /// Schedule with nothing pending
    pub fn idle() -> Self {
        Self::default()
    }

    /// Arm the next scan `delay` from now, replacing any pending one
    pub fn arm(&mut self, delay: Duration) -> Instant {
        let deadline = Instant::now() + delay;
        self.deadline = Some(deadline);
        deadline
    }

    /// Arm only when idle; returns true if a new deadline was set
    pub fn arm_if_idle(&mut self, delay: Duration) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.arm(delay);
        true
    }

    /// Cancel the pending scan; returns true if one was pending
    pub fn disarm(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Resolve at `deadline`, or never when nothing is scheduled
pub(crate) async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
