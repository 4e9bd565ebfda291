//! Market Data Adapters
//!
//! Sources of candidate pairs for the scanner:
//! - `SyntheticPairFeed`: uniform-random pre-graduation pairs

mod synthetic;

pub use synthetic::{generate_address, SyntheticPairFeed, ADDRESS_LEN, BASE58_ALPHABET, TOKEN_NAMES};
