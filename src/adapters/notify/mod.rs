//! Notification Adapters
//!
//! Implementations of the `Notifier` port:
//! - `ToneNotifier`: plays the 800 Hz decaying alert tone, bell as fallback
//! - `BellNotifier`: plain terminal bell
//! - `DesktopNotifier`: desktop popup via notify-rust
//! - `SilentNotifier`: no-op for `--no-sound`

mod bell;
mod desktop;
mod speaker;
mod tone;

pub use bell::BellNotifier;
pub use desktop::DesktopNotifier;
pub use speaker::{PlayerCommand, ToneNotifier};
pub use tone::{encode_wav, ToneEnvelope, DEFAULT_SAMPLE_RATE};

use serde::Deserialize;

use crate::domain::Alert;
use crate::ports::{Notifier, NotifyError};

/// Notification backend selection (`[notifications] mode`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMode {
    #[default]
    Tone,
    Bell,
    Desktop,
    None,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn notify(&self, _alert: &Alert) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Build the notifier for a configured mode
pub fn build_notifier(mode: NotificationMode) -> Box<dyn Notifier> {
    match mode {
        NotificationMode::Tone => Box::new(ToneNotifier::default()),
        NotificationMode::Bell => Box::new(BellNotifier::default()),
        NotificationMode::Desktop => Box::new(DesktopNotifier::new()),
        NotificationMode::None => Box::new(SilentNotifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_notifier_by_mode() {
        assert_eq!(build_notifier(NotificationMode::Tone).name(), "tone");
        assert_eq!(build_notifier(NotificationMode::Bell).name(), "bell");
        assert_eq!(build_notifier(NotificationMode::Desktop).name(), "desktop");
        assert_eq!(build_notifier(NotificationMode::None).name(), "silent");
    }

    #[test]
    fn test_mode_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: NotificationMode,
        }
        let parsed: Wrapper = toml::from_str("mode = \"desktop\"").unwrap();
        assert_eq!(parsed.mode, NotificationMode::Desktop);
    }

    #[test]
    fn test_tone_is_default_mode() {
        assert_eq!(NotificationMode::default(), NotificationMode::Tone);
    }
}
