//! Terminal bell notifier

use std::io::Write;
use std::sync::Mutex;
use std::time::Instant;

use super::tone::ToneEnvelope;
use crate::domain::Alert;
use crate::ports::{Notifier, NotifyError};

/// Rings the terminal bell on stderr, at most once per tone length so back
/// to back alerts do not pile up beeps
pub struct BellNotifier {
    tone: ToneEnvelope,
    last_rung: Mutex<Option<Instant>>,
}

impl Default for BellNotifier {
    fn default() -> Self {
        Self::new(ToneEnvelope::default())
    }
}

impl BellNotifier {
    pub fn new(tone: ToneEnvelope) -> Self {
        Self {
            tone,
            last_rung: Mutex::new(None),
        }
    }

    pub fn tone(&self) -> &ToneEnvelope {
        &self.tone
    }

    /// Returns true if the previous tone has finished
    fn check_cooldown(&self) -> bool {
        let mut last = match self.last_rung.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = Instant::now();
        if let Some(prev) = *last {
            if now.duration_since(prev) < self.tone.duration {
                return false;
            }
        }
        *last = Some(now);
        true
    }
}

impl Notifier for BellNotifier {
    fn name(&self) -> &'static str {
        "bell"
    }

    fn notify(&self, alert: &Alert) -> Result<(), NotifyError> {
        if !self.check_cooldown() {
            tracing::trace!("Tone still playing, skipping bell for alert #{}", alert.id);
            return Ok(());
        }
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}
