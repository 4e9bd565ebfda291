//! Desktop notification sender

use crate::adapters::display::format_number;
use crate::domain::Alert;
use crate::ports::{Notifier, NotifyError};

#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }

    fn summary(alert: &Alert) -> String {
        format!("🚀 Volume Hunter - {}", alert.candidate.symbol)
    }

    fn body(alert: &Alert) -> String {
        let c = &alert.candidate;
        let address_short = &c.address[..8.min(c.address.len())];
        format!(
            "+{}% volume | MC ${} | Liq ${} | {address_short}",
            alert.volume_change_display(),
            format_number(c.market_cap),
            format_number(c.liquidity),
        )
    }
}

impl Notifier for DesktopNotifier {
    fn name(&self) -> &'static str {
        "desktop"
    }

    /// Fire-and-forget: the popup is shown from a background thread so the
    /// scan loop never waits on the notification daemon
    fn notify(&self, alert: &Alert) -> Result<(), NotifyError> {
        let summary = Self::summary(alert);
        let body = Self::body(alert);

        std::thread::Builder::new()
            .name("desktop-notify".to_string())
            .spawn(move || {
                if let Err(e) = notify_rust::Notification::new()
                    .summary(&summary)
                    .body(&body)
                    .show()
                {
                    tracing::debug!("Desktop notification failed: {e}");
                }
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::fixtures::passing_candidate;
    use chrono::Utc;

    #[test]
    fn test_notification_text() {
        let alert = Alert::new(3, Utc::now(), passing_candidate());
        assert_eq!(DesktopNotifier::summary(&alert), "🚀 Volume Hunter - PEPE42");
        assert_eq!(
            DesktopNotifier::body(&alert),
            "+100.0% volume | MC $10.0K | Liq $15.0K | 7xKXtg2C"
        );
    }
}
