//! Volume Hunter - Pre-Graduation Volume Scanner Library
//!
//! Scans a simulated stream of pump.fun style pairs that are still on the
//! bonding curve and alerts when safety filters pass and volume is rising.
//!
//! # Modules
//!
//! - `domain`: Core business logic (Candidate, FilterPipeline, Alert, ScanStats)
//! - `ports`: Trait abstractions (RandomSource, Clock, Notifier)
//! - `adapters`: External implementations (synthetic feed, notifiers, display, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Scanner orchestrator and scheduling

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
