pub mod scanner;
pub mod schedule;

pub use scanner::{
    ScanOutcome, Scanner, ScannerCommand, ScannerError, ScannerSettings, ScannerSnapshot,
    ScannerState, ScannerStatus, DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS,
};
pub use schedule::ScanSchedule;
