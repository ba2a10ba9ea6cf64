//! Configuration management
//! Load settings from .env file

use crate::types::TokenConfig;
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

/// OKX API credentials
#[derive(Debug, Clone)]
pub struct OkxConfig {
    pub api_key: String,
    pub secret_key: String,
    pub passphrase: String,
}

/// Run parameters, immutable for the process lifetime
#[derive(Debug, Clone)]
pub struct RunParameters {
    /// Starting notional amount in USD-equivalent units
    pub initial_amount_usd: Decimal,
    /// Minimum profit for a qualifying opportunity, same units
    pub profit_threshold_usd: Decimal,
    /// Per-leg slippage tolerance, percent (forwarded to the quote API)
    pub slippage_tolerance: Decimal,
    /// Pause between consecutive quote calls (provider rate-limit courtesy)
    pub call_delay: Duration,
    /// Interval between evaluation cycles
    pub poll_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub okx: OkxConfig,
    pub params: RunParameters,
    /// The bridged asset (TOKEN_1): bought on one venue, sold on the other
    pub base_token: TokenConfig,
    /// The USD-pegged side of the pair (TOKEN_2)
    pub quote_token: TokenConfig,
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{} not set", key))
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

pub fn load_config() -> Result<MonitorConfig> {
    dotenv::dotenv().ok();

    let okx = OkxConfig {
        api_key: required_env("OKX_API_KEY")?,
        secret_key: required_env("OKX_SECRET_KEY")?,
        passphrase: required_env("OKX_PASS_PHRASE")?,
    };

    let params = RunParameters {
        initial_amount_usd: env_or("INITIAL_AMOUNT_USD", Decimal::from(500))?,
        profit_threshold_usd: env_or("PROFIT_THRESHOLD_USD", Decimal::from(30))?,
        slippage_tolerance: env_or("SLIPPAGE_TOLERANCE", Decimal::ONE)?,
        call_delay: Duration::from_millis(env_or("QUOTE_DELAY_MS", 1000u64)?),
        poll_interval: Duration::from_secs(env_or("MONITORING_INTERVAL_SECONDS", 30u64)?),
    };

    let base_token = TokenConfig {
        symbol: required_env("TOKEN_1_SYMBOL")?,
        bsc_address: required_env("BSC_TOKEN_1_ADDRESS")?,
        solana_address: required_env("SOLANA_TOKEN_1_ADDRESS")?,
        bsc_decimals: env_or("BSC_TOKEN_1_DECIMALS", 18u32)?,
        solana_decimals: env_or("SOLANA_TOKEN_1_DECIMALS", 9u32)?,
    };

    let quote_token = TokenConfig {
        symbol: required_env("TOKEN_2_SYMBOL")?,
        bsc_address: required_env("BSC_TOKEN_2_ADDRESS")?,
        solana_address: required_env("SOLANA_TOKEN_2_ADDRESS")?,
        bsc_decimals: env_or("BSC_TOKEN_2_DECIMALS", 18u32)?,
        solana_decimals: env_or("SOLANA_TOKEN_2_DECIMALS", 6u32)?,
    };

    let config = MonitorConfig {
        okx,
        params,
        base_token,
        quote_token,
    };
    config.validate()?;

    Ok(config)
}

impl MonitorConfig {
    /// Reject invalid run parameters before any cycle runs. Configuration
    /// failures are fatal at startup; the core never re-validates.
    pub fn validate(&self) -> Result<()> {
        if self.params.initial_amount_usd <= Decimal::ZERO {
            bail!("INITIAL_AMOUNT_USD must be positive");
        }
        if self.params.profit_threshold_usd < Decimal::ZERO {
            bail!("PROFIT_THRESHOLD_USD must be non-negative");
        }
        if self.params.slippage_tolerance < Decimal::ZERO {
            bail!("SLIPPAGE_TOLERANCE must be non-negative");
        }
        if self.params.poll_interval.is_zero() {
            bail!("MONITORING_INTERVAL_SECONDS must be positive");
        }
        Ok(())
    }
}
