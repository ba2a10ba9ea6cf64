//! Directional two-leg path calculation
//!
//! One parameterized implementation covers both directions so the
//! symmetric legs cannot drift apart: swap the quote token for the base
//! token on the origin venue, bridge the amount to the destination venue's
//! precision, swap back to the quote token there.
//!
//! Any failed leg (quote failure, empty payload, malformed amount)
//! collapses the whole direction to None for the current cycle; partial
//! results never surface.

use crate::amount::{self, AmountError};
use crate::config::RunParameters;
use crate::okx::{QuoteError, QuoteSource};
use crate::types::{LegOutcome, PathOutcome, TokenConfig, Venue};
use std::fmt;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Ordered choice of origin and destination venue for a two-leg path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    SolanaToBsc,
    BscToSolana,
}

impl Direction {
    pub fn origin(&self) -> Venue {
        match self {
            Direction::SolanaToBsc => Venue::Solana,
            Direction::BscToSolana => Venue::Bsc,
        }
    }

    pub fn destination(&self) -> Venue {
        match self {
            Direction::SolanaToBsc => Venue::Bsc,
            Direction::BscToSolana => Venue::Solana,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}->{}", self.origin(), self.destination())
    }
}

#[derive(Debug, Error)]
enum PathError {
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Drives the two-leg quote sequence for one direction
pub struct PathCalculator<Q> {
    quotes: Q,
    base_token: TokenConfig,
    quote_token: TokenConfig,
    params: RunParameters,
}

impl<Q: QuoteSource> PathCalculator<Q> {
    pub fn new(
        quotes: Q,
        base_token: TokenConfig,
        quote_token: TokenConfig,
        params: RunParameters,
    ) -> Self {
        Self {
            quotes,
            base_token,
            quote_token,
            params,
        }
    }

    /// Compute the round-trip outcome for one direction.
    ///
    /// Returns None when either leg fails; the failure is logged and
    /// absorbed here so the other direction can still be attempted in the
    /// same cycle.
    pub async fn compute_path(&self, direction: Direction) -> Option<PathOutcome> {
        match self.try_compute(direction).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!("{} path failed: {}", direction, e);
                None
            }
        }
    }

    async fn try_compute(&self, direction: Direction) -> Result<PathOutcome, PathError> {
        let initial = self.params.initial_amount_usd;
        let origin = direction.origin();
        let destination = direction.destination();

        // Leg 1: quote token -> base token on the origin venue
        let leg1_raw = amount::to_raw_units(initial, self.quote_token.decimals_on(origin))?;
        let leg1 = self
            .quotes
            .get_quote(
                origin,
                self.quote_token.address_on(origin),
                self.base_token.address_on(origin),
                &leg1_raw,
            )
            .await?;

        let base_received =
            amount::to_decimal(&leg1.to_token_amount, self.base_token.decimals_on(origin))?;
        debug!(
            "{} leg 1: {} {} -> {} {} ({})",
            direction, initial, self.quote_token.symbol, base_received, self.base_token.symbol,
            origin
        );

        // Cross-venue precision bridge: re-encode at the destination
        // venue's decimals, truncating so the leg-2 request never exceeds
        // what leg 1 produced
        let bridged_raw = amount::to_raw_units(base_received, self.base_token.decimals_on(destination))?;

        sleep(self.params.call_delay).await;

        // Leg 2: base token -> quote token on the destination venue
        let leg2 = self
            .quotes
            .get_quote(
                destination,
                self.base_token.address_on(destination),
                self.quote_token.address_on(destination),
                &bridged_raw,
            )
            .await?;

        let final_amount =
            amount::to_decimal(&leg2.to_token_amount, self.quote_token.decimals_on(destination))?;
        debug!(
            "{} leg 2: {} {} -> {} {} ({})",
            direction, base_received, self.base_token.symbol, final_amount,
            self.quote_token.symbol, destination
        );

        let profit = final_amount - initial;

        Ok(PathOutcome {
            direction,
            initial_amount: initial,
            final_amount,
            profit,
            legs: [
                LegOutcome {
                    venue: origin,
                    from_symbol: self.quote_token.symbol.clone(),
                    to_symbol: self.base_token.symbol.clone(),
                    amount: base_received,
                },
                LegOutcome {
                    venue: destination,
                    from_symbol: self.base_token.symbol.clone(),
                    to_symbol: self.quote_token.symbol.clone(),
                    amount: final_amount,
                },
            ],
        })
    }
}
