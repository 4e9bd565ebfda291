//! Eligibility Filter Pipeline
//!
//! Ten independent threshold checks a pre-graduation pair must clear before
//! alert conditions are even considered:
//!
//! 1. Pair age <= 30 minutes
//! 2. Market cap within $5K - $20K
//! 3. Still on the bonding curve (not graduated)
//! 4. Liquidity >= $10K
//! 5. Volume increasing (last 5 min vs previous 10 min)
//! 6. Dev wallet <= 8%
//! 7. Bundled supply <= 20%
//! 8. Snipers <= 20%
//! 9. Mint authority revoked
//! 10. Freeze authority disabled
//!
//! Every check runs on every candidate; failures are collected in check order.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::candidate::Candidate;

/// Why a candidate was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterReason {
    TooOld,
    MarketCapOutOfRange,
    AlreadyGraduated,
    InsufficientLiquidity,
    VolumeNotIncreasing,
    DevWalletTooHigh,
    BundledSupplyTooHigh,
    TooManySnipers,
    MintNotRevoked,
    FreezeNotDisabled,
}

impl FilterReason {
    /// Human-readable rejection message
    pub fn message(&self) -> &'static str {
        match self {
            FilterReason::TooOld => "Pair too old",
            FilterReason::MarketCapOutOfRange => "Market cap out of range",
            FilterReason::AlreadyGraduated => "Already graduated",
            FilterReason::InsufficientLiquidity => "Insufficient liquidity",
            FilterReason::VolumeNotIncreasing => "Volume not increasing",
            FilterReason::DevWalletTooHigh => "Dev wallet too high",
            FilterReason::BundledSupplyTooHigh => "Bundled supply too high",
            FilterReason::TooManySnipers => "Too many snipers",
            FilterReason::MintNotRevoked => "Mint authority not revoked",
            FilterReason::FreezeNotDisabled => "Freeze authority not disabled",
        }
    }
}

impl fmt::Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of running the pipeline on one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    /// True iff no check failed
    pub passed: bool,
    /// Failed checks, in evaluation order
    pub reasons: Vec<FilterReason>,
}

impl FilterResult {
    fn from_reasons(reasons: Vec<FilterReason>) -> Self {
        Self {
            passed: reasons.is_empty(),
            reasons,
        }
    }

    /// Rejection messages, in evaluation order
    pub fn reason_messages(&self) -> Vec<String> {
        self.reasons.iter().map(|r| r.to_string()).collect()
    }
}

/// Threshold values for the pipeline, maps to the `[filters]` config section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterThresholds {
    /// Maximum pair age in minutes (inclusive)
    pub max_age_minutes: f64,
    /// Minimum market cap in USD (inclusive)
    pub min_market_cap: f64,
    /// Maximum market cap in USD (inclusive)
    pub max_market_cap: f64,
    /// Minimum liquidity in USD (inclusive)
    pub min_liquidity: f64,
    /// Maximum developer holding percentage (inclusive)
    pub max_dev_wallet_pct: f64,
    /// Maximum bundled supply percentage (inclusive)
    pub max_bundled_supply_pct: f64,
    /// Maximum sniper holding percentage (inclusive)
    pub max_snipers_pct: f64,
}

pub const DEFAULT_MAX_AGE_MINUTES: f64 = 30.0;
pub const DEFAULT_MIN_MARKET_CAP: f64 = 5_000.0;
pub const DEFAULT_MAX_MARKET_CAP: f64 = 20_000.0;
pub const DEFAULT_MIN_LIQUIDITY: f64 = 10_000.0;
pub const DEFAULT_MAX_DEV_WALLET_PCT: f64 = 8.0;
pub const DEFAULT_MAX_BUNDLED_SUPPLY_PCT: f64 = 20.0;
pub const DEFAULT_MAX_SNIPERS_PCT: f64 = 20.0;

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            max_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            min_market_cap: DEFAULT_MIN_MARKET_CAP,
            max_market_cap: DEFAULT_MAX_MARKET_CAP,
            min_liquidity: DEFAULT_MIN_LIQUIDITY,
            max_dev_wallet_pct: DEFAULT_MAX_DEV_WALLET_PCT,
            max_bundled_supply_pct: DEFAULT_MAX_BUNDLED_SUPPLY_PCT,
            max_snipers_pct: DEFAULT_MAX_SNIPERS_PCT,
        }
    }
}

/// Stateless eligibility pipeline
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    thresholds: FilterThresholds,
}

impl FilterPipeline {
    pub fn new(thresholds: FilterThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &FilterThresholds {
        &self.thresholds
    }

    /// Run all checks and collect every failure
    pub fn evaluate(&self, candidate: &Candidate) -> FilterResult {
        let t = &self.thresholds;
        let mut reasons = Vec::new();

        if candidate.age_minutes > t.max_age_minutes {
            reasons.push(FilterReason::TooOld);
        }

        if candidate.market_cap < t.min_market_cap || candidate.market_cap > t.max_market_cap {
            reasons.push(FilterReason::MarketCapOutOfRange);
        }

        if candidate.graduated {
            reasons.push(FilterReason::AlreadyGraduated);
        }

        if candidate.liquidity < t.min_liquidity {
            reasons.push(FilterReason::InsufficientLiquidity);
        }

        if !candidate.volume_increasing() {
            reasons.push(FilterReason::VolumeNotIncreasing);
        }

        if candidate.dev_wallet_pct > t.max_dev_wallet_pct {
            reasons.push(FilterReason::DevWalletTooHigh);
        }

        if candidate.bundled_supply_pct > t.max_bundled_supply_pct {
            reasons.push(FilterReason::BundledSupplyTooHigh);
        }

        if candidate.snipers_pct > t.max_snipers_pct {
            reasons.push(FilterReason::TooManySnipers);
        }

        if !candidate.mint_revoked {
            reasons.push(FilterReason::MintNotRevoked);
        }

        if !candidate.freeze_disabled {
            reasons.push(FilterReason::FreezeNotDisabled);
        }

        FilterResult::from_reasons(reasons)
    }
}
