//! Synthetic Pair Feed
//!
//! Fabricates pre-graduation pairs with independent uniform draws. The ranges
//! straddle the filter thresholds on purpose so a realistic share of pairs
//! gets rejected. Fields are not correlated with each other (a fresh pair with
//! huge liquidity is as likely as an old one).

use crate::domain::Candidate;
use crate::ports::RandomSource;

/// Base58 alphabet (no 0, O, I, l)
pub const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of a generated address
pub const ADDRESS_LEN: usize = 44;

/// Name pool for generated tokens
pub const TOKEN_NAMES: [&str; 18] = [
    "MOON", "ROCKET", "PEPE", "DOGE", "SHIB", "FLOKI", "WOJAK", "BONK", "SAMO", "COPE", "ORCA",
    "RAY", "FROG", "MEME", "CHAD", "BASED", "PUMP", "GEM",
];

pub const MARKET_CAP_RANGE: (f64, f64) = (3_000.0, 25_000.0);
pub const LIQUIDITY_RANGE: (f64, f64) = (8_000.0, 50_000.0);
pub const AGE_MINUTES_RANGE: (f64, f64) = (0.0, 45.0);
pub const VOLUME_PREV_RANGE: (f64, f64) = (1_000.0, 6_000.0);
/// Recent window volume = previous window volume x multiplier
pub const VOLUME_MULTIPLIER_RANGE: (f64, f64) = (0.5, 2.5);
pub const DEV_WALLET_RANGE: (f64, f64) = (0.0, 15.0);
pub const BUNDLED_SUPPLY_RANGE: (f64, f64) = (0.0, 30.0);
pub const SNIPERS_RANGE: (f64, f64) = (0.0, 30.0);
pub const BUY_PRESSURE_RANGE: (f64, f64) = (40.0, 100.0);

/// Probability the symbol is the bare name (no numeric suffix)
pub const BARE_SYMBOL_PROBABILITY: f64 = 0.3;
pub const SYMBOL_SUFFIX_LIMIT: usize = 1000;
pub const MINT_REVOKED_PROBABILITY: f64 = 0.7;
pub const FREEZE_DISABLED_PROBABILITY: f64 = 0.7;
pub const HIGHER_LOWS_PROBABILITY: f64 = 0.6;
pub const GRADUATED_PROBABILITY: f64 = 0.2;

/// Generates one [`Candidate`] per call
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticPairFeed;

impl SyntheticPairFeed {
    pub fn new() -> Self {
        Self
    }

    pub fn next_candidate(&self, rng: &mut dyn RandomSource) -> Candidate {
        let name = TOKEN_NAMES[rng.index(TOKEN_NAMES.len())];
        let symbol = if rng.chance(BARE_SYMBOL_PROBABILITY) {
            name.to_string()
        } else {
            format!("{}{}", name, rng.index(SYMBOL_SUFFIX_LIMIT))
        };

        let market_cap = draw(rng, MARKET_CAP_RANGE);
        let liquidity = draw(rng, LIQUIDITY_RANGE);
        let age_minutes = draw(rng, AGE_MINUTES_RANGE);

        // Recent volume can land above or below the previous window
        let volume_prev = draw(rng, VOLUME_PREV_RANGE);
        let volume_recent = volume_prev * draw(rng, VOLUME_MULTIPLIER_RANGE);

        let dev_wallet_pct = draw(rng, DEV_WALLET_RANGE);
        let bundled_supply_pct = draw(rng, BUNDLED_SUPPLY_RANGE);
        let snipers_pct = draw(rng, SNIPERS_RANGE);
        let mint_revoked = rng.chance(MINT_REVOKED_PROBABILITY);
        let freeze_disabled = rng.chance(FREEZE_DISABLED_PROBABILITY);

        let buy_pressure = draw(rng, BUY_PRESSURE_RANGE);
        let sell_pressure = 100.0 - buy_pressure;
        let higher_lows = rng.chance(HIGHER_LOWS_PROBABILITY);

        let address = generate_address(rng);
        let graduated = rng.chance(GRADUATED_PROBABILITY);

        Candidate {
            name: name.to_string(),
            symbol,
            address,
            market_cap,
            liquidity,
            age_minutes,
            volume_prev,
            volume_recent,
            dev_wallet_pct,
            bundled_supply_pct,
            snipers_pct,
            mint_revoked,
            freeze_disabled,
            buy_pressure,
            sell_pressure,
            higher_lows,
            graduated,
        }
    }
}

fn draw(rng: &mut dyn RandomSource, (low, high): (f64, f64)) -> f64 {
    rng.range(low, high)
}

/// Random 44-character base58 string shaped like a Solana address
pub fn generate_address(rng: &mut dyn RandomSource) -> String {
    (0..ADDRESS_LEN)
        .map(|_| BASE58_ALPHABET[rng.index(BASE58_ALPHABET.len())] as char)
        .collect()
}
