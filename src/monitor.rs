//! Continuous monitoring loop
//!
//! Owns the evaluation schedule and a watch-channel shutdown token. Cycles
//! are strictly sequential: a tick only fires between cycles, so a cycle
//! always runs to completion (success, partial failure, or total failure)
//! before the next one starts. `run_once` exposes a single deterministic
//! cycle for tests and the --once CLI mode.

use crate::arbitrage::{Direction, OpportunitySelector};
use crate::okx::QuoteSource;
use crate::types::{Classification, Decision};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

pub struct Monitor<Q> {
    selector: OpportunitySelector<Q>,
    poll_interval: Duration,
}

impl<Q: QuoteSource> Monitor<Q> {
    pub fn new(selector: OpportunitySelector<Q>, poll_interval: Duration) -> Self {
        Self {
            selector,
            poll_interval,
        }
    }

    /// Run one evaluation cycle and report its Decision
    pub async fn run_once(&self) -> Decision {
        let decision = self.selector.evaluate().await;
        report(&decision);
        decision
    }

    /// Run cycles on the configured interval until shutdown is signalled.
    /// The first cycle starts immediately.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        // Never burst to catch up after a long cycle; wait a full interval
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut cycle = 0u64;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    cycle += 1;
                    debug!(cycle, "starting evaluation cycle");
                    self.run_once().await;
                }
                changed = shutdown.changed() => {
                    // A send or a dropped sender both end the loop
                    if changed.is_err() || *shutdown.borrow() {
                        info!("shutdown requested - stopping monitor after {} cycles", cycle);
                        break;
                    }
                }
            }
        }
    }
}

/// Render a cycle's Decision to the log. Consumers that need more than the
/// console (alerting etc.) read the Decision value itself.
pub fn report(decision: &Decision) {
    for (direction, outcome) in [
        (Direction::SolanaToBsc, &decision.solana_to_bsc),
        (Direction::BscToSolana, &decision.bsc_to_solana),
    ] {
        match outcome {
            Some(path) => info!(
                "{}: {}{} USD",
                direction,
                if path.profit > rust_decimal::Decimal::ZERO { "+" } else { "" },
                path.profit.round_dp(2)
            ),
            None => warn!("{}: failed to calculate", direction),
        }
    }

    match (&decision.best, decision.classification) {
        (Some(best), Classification::Qualifying) => {
            info!(
                "🎯 PROFITABLE ARBITRAGE: {} | profit ${} | ROI {}%",
                best.direction,
                best.profit.round_dp(2),
                best.roi_percent().round_dp(2)
            );
        }
        (Some(best), _) => {
            info!(
                "small opportunity: {} -> ${} (below threshold)",
                best.direction,
                best.profit.round_dp(2)
            );
        }
        _ => info!("no profitable opportunities"),
    }
}
