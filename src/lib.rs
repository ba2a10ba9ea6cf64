//! Cross-Chain Arbitrage Monitor Library
//!
//! Continuously evaluates both round-trip directions of a single token
//! pair across two venues (BSC and Solana, quoted through the OKX DEX
//! aggregator) and classifies each cycle's best path against a profit
//! threshold. Observation and decision only - no trade execution.

pub mod amount;
pub mod arbitrage;
pub mod config;
pub mod monitor;
pub mod okx;
pub mod types;

// Re-export commonly used types
pub use arbitrage::{Direction, OpportunitySelector, PathCalculator};
pub use config::{load_config, MonitorConfig, OkxConfig, RunParameters};
pub use monitor::Monitor;
pub use okx::{OkxDexClient, QuoteError, QuoteSource};
pub use types::{
    Classification, Decision, LegOutcome, PathOutcome, QuoteData, TokenConfig, Venue,
};
