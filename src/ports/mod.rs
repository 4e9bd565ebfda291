//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) the scanner is built against.
//! Following hexagonal architecture, these traits abstract:
//! - Random draws (synthetic market data, scan cadence)
//! - Wall-clock time (alert timestamps)
//! - Alert notifications (sound, desktop popups)

pub mod clock;
pub mod mocks;
pub mod notifier;
pub mod random;

pub use clock::{Clock, SystemClock};
pub use notifier::{Notifier, NotifyError};
pub use random::{RandomSource, RngSource};
