//! Domain Layer - Core scanning logic for the volume hunter
//!
//! Pure types and predicates with no I/O. Randomness, time and
//! notifications reach the scanner through the ports layer.

pub mod alert;
pub mod candidate;
pub mod filter;
pub mod stats;

pub use alert::{alert_triggered, Alert, AlertCheck, AlertHistory, DEFAULT_HISTORY_LIMIT};
pub use candidate::Candidate;
pub use filter::{FilterPipeline, FilterReason, FilterResult, FilterThresholds};
pub use stats::ScanStats;
