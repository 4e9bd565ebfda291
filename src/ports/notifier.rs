//! Notifier Port
//!
//! Best-effort alert side effect (sound, desktop popup). The scanner treats
//! every error from this port as non-fatal.

use thiserror::Error;

use crate::domain::Alert;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Audio output unavailable: {0}")]
    AudioUnavailable(String),

    #[error("Notification backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Announce a freshly raised alert; must not block
    fn notify(&self, alert: &Alert) -> Result<(), NotifyError>;
}
