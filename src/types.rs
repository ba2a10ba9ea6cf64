// Core data structures for the cross-chain arbitrage monitor

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

/// Execution venues we quote against.
///
/// Exactly two: the monitor evaluates one token pair across one
/// BSC <-> Solana round trip in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Bsc,
    Solana,
}

impl Venue {
    /// OKX DEX aggregator chain id for this venue
    pub fn chain_id(&self) -> &'static str {
        match self {
            Venue::Bsc => "56",
            Venue::Solana => "501",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Venue::Bsc => "BSC",
            Venue::Solana => "Solana",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Token configuration: one logical token with per-venue contract/mint
/// addresses and per-venue decimal precision (they commonly differ,
/// e.g. 18 decimals on BSC vs 9 on Solana).
///
/// Loaded once at startup and shared by reference across all calculations.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub symbol: String,
    pub bsc_address: String,
    pub solana_address: String,
    pub bsc_decimals: u32,
    pub solana_decimals: u32,
}

impl TokenConfig {
    pub fn address_on(&self, venue: Venue) -> &str {
        match venue {
            Venue::Bsc => &self.bsc_address,
            Venue::Solana => &self.solana_address,
        }
    }

    pub fn decimals_on(&self, venue: Venue) -> u32 {
        match venue {
            Venue::Bsc => self.bsc_decimals,
            Venue::Solana => self.solana_decimals,
        }
    }
}

/// Single quote returned by the OKX DEX aggregator.
///
/// `to_token_amount` is an integer string in the destination token's raw
/// units; it is parsed with the decimal normalizer, never as a float.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    pub from_token_symbol: String,
    pub to_token_symbol: String,
    pub to_token_amount: String,
    #[serde(default)]
    pub to_token_price_usd: String,
    #[serde(default)]
    pub estimated_gas: String,
}

/// Response envelope of the OKX quote endpoint. `code` is "0" on success;
/// an empty `data` array counts as a failed quote either way.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Vec<QuoteData>,
}

/// One single-venue swap within a two-leg path.
///
/// `amount` is the normalized decimal quantity coming out of this leg:
/// for leg 1 the base-token amount before the cross-venue re-encoding,
/// for leg 2 the final quote-token amount.
#[derive(Debug, Clone)]
pub struct LegOutcome {
    pub venue: Venue,
    pub from_symbol: String,
    pub to_symbol: String,
    pub amount: Decimal,
}

/// Result of one directional two-leg path computation.
///
/// Only constructed when both legs succeeded; a failure at either leg
/// collapses the whole direction to None for the cycle.
#[derive(Debug, Clone)]
pub struct PathOutcome {
    pub direction: crate::arbitrage::Direction,
    pub initial_amount: Decimal,
    pub final_amount: Decimal,
    /// final_amount - initial_amount, signed
    pub profit: Decimal,
    pub legs: [LegOutcome; 2],
}

impl PathOutcome {
    /// Return on investment of the round trip, in percent
    pub fn roi_percent(&self) -> Decimal {
        (self.profit / self.initial_amount) * Decimal::from(100)
    }
}

/// Per-cycle classification of the best available path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Best path profit strictly exceeds the configured threshold
    Qualifying,
    /// Best path profit is positive but does not exceed the threshold
    Marginal,
    /// No path produced a positive profit this cycle
    None,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Classification::Qualifying => write!(f, "qualifying"),
            Classification::Marginal => write!(f, "marginal"),
            Classification::None => write!(f, "none"),
        }
    }
}

/// Per-cycle output of the opportunity selector: both directional outcomes
/// (None marks a failed path), the selected best path if any, and the
/// classification. Constructed fresh each cycle, never mutated, not
/// persisted across cycles.
#[derive(Debug, Clone)]
pub struct Decision {
    pub solana_to_bsc: Option<PathOutcome>,
    pub bsc_to_solana: Option<PathOutcome>,
    pub best: Option<PathOutcome>,
    pub classification: Classification,
    pub timestamp: DateTime<Utc>,
}

impl Decision {
    pub fn best_profit(&self) -> Option<Decimal> {
        self.best.as_ref().map(|p| p.profit)
    }
}
