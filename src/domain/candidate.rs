//! Scan Candidate
//!
//! A single pre-graduation pair observed by the scanner. Candidates are
//! created once per scan cycle and dropped after evaluation unless they
//! end up wrapped in an [`Alert`](super::alert::Alert).

use serde::{Deserialize, Serialize};

/// Synthetic token pair evaluated by one scan cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Token name (e.g., "PEPE")
    pub name: String,
    /// Display symbol, either the name or name + numeric suffix
    pub symbol: String,
    /// 44-character base58 address
    pub address: String,
    /// Market capitalization in USD
    pub market_cap: f64,
    /// Pool liquidity in USD
    pub liquidity: f64,
    /// Minutes since the pair was created
    pub age_minutes: f64,
    /// Volume over the previous window (10 min)
    pub volume_prev: f64,
    /// Volume over the recent window (5 min)
    pub volume_recent: f64,
    /// Supply held by the developer wallet (%)
    pub dev_wallet_pct: f64,
    /// Supply acquired in bundled launch transactions (%)
    pub bundled_supply_pct: f64,
    /// Supply held by sniper wallets (%)
    pub snipers_pct: f64,
    /// Mint authority has been revoked
    pub mint_revoked: bool,
    /// Freeze authority has been disabled
    pub freeze_disabled: bool,
    /// Share of buy-side flow (%)
    pub buy_pressure: f64,
    /// Share of sell-side flow (%), always 100 - buy_pressure
    pub sell_pressure: f64,
    /// 1-minute candles print higher lows
    pub higher_lows: bool,
    /// Token already left the bonding curve
    pub graduated: bool,
}

impl Candidate {
    /// Percentage change from the previous to the recent volume window
    ///
    /// Returns 0.0 when the previous window is empty.
    pub fn volume_change_pct(&self) -> f64 {
        if self.volume_prev <= 0.0 {
            return 0.0;
        }
        (self.volume_recent / self.volume_prev - 1.0) * 100.0
    }

    /// Whether recent volume beats the previous window
    pub fn volume_increasing(&self) -> bool {
        self.volume_recent > self.volume_prev
    }

    /// External chart link for this pair
    pub fn chart_url(&self) -> String {
        format!("https://dexscreener.com/solana/{}", self.address)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Candidate;

    /// Candidate that clears every filter and triggers an alert
    pub fn passing_candidate() -> Candidate {
        Candidate {
            name: "PEPE".to_string(),
            symbol: "PEPE42".to_string(),
            address: "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU".to_string(),
            market_cap: 10_000.0,
            liquidity: 15_000.0,
            age_minutes: 29.0,
            volume_prev: 1_000.0,
            volume_recent: 2_000.0,
            dev_wallet_pct: 5.0,
            bundled_supply_pct: 10.0,
            snipers_pct: 5.0,
            mint_revoked: true,
            freeze_disabled: true,
            buy_pressure: 70.0,
            sell_pressure: 30.0,
            higher_lows: true,
            graduated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::passing_candidate;
    use approx::assert_relative_eq;

    #[test]
    fn test_volume_change_pct() {
        let mut candidate = passing_candidate();
        candidate.volume_prev = 1_000.0;
        candidate.volume_recent = 1_500.0;
        assert_relative_eq!(candidate.volume_change_pct(), 50.0, epsilon = 1e-9);

        candidate.volume_recent = 500.0;
        assert_relative_eq!(candidate.volume_change_pct(), -50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_volume_change_zero_prev() {
        let mut candidate = passing_candidate();
        candidate.volume_prev = 0.0;
        assert_eq!(candidate.volume_change_pct(), 0.0);
    }

    #[test]
    fn test_chart_url_embeds_address() {
        let candidate = passing_candidate();
        assert_eq!(
            candidate.chart_url(),
            "https://dexscreener.com/solana/7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"
        );
    }
}
