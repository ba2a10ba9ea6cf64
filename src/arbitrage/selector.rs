//! Per-cycle opportunity selection
//!
//! Runs both directional path calculations sequentially (the inter-call
//! delay is the provider's rate-limit budget, so the two paths are never
//! computed in parallel), picks the more profitable outcome against a zero
//! baseline, and classifies the cycle against the configured threshold.

use super::path::{Direction, PathCalculator};
use crate::config::RunParameters;
use crate::okx::QuoteSource;
use crate::types::{Classification, Decision, PathOutcome};
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::time::sleep;
use tracing::debug;

pub struct OpportunitySelector<Q> {
    calculator: PathCalculator<Q>,
    params: RunParameters,
}

impl<Q: QuoteSource> OpportunitySelector<Q> {
    pub fn new(calculator: PathCalculator<Q>, params: RunParameters) -> Self {
        Self { calculator, params }
    }

    /// Evaluate both directions once and produce the cycle's Decision.
    ///
    /// Always completes: per-path failures are already absorbed by the
    /// calculator, so even a cycle where both paths fail yields a Decision
    /// (classification None, both outcomes absent).
    pub async fn evaluate(&self) -> Decision {
        let solana_to_bsc = self.calculator.compute_path(Direction::SolanaToBsc).await;

        // Keep provider call pacing across path boundaries, not just
        // between the legs inside one path
        sleep(self.params.call_delay).await;

        let bsc_to_solana = self.calculator.compute_path(Direction::BscToSolana).await;

        // Baseline of zero profit: a non-positive path is never "best",
        // and the strict comparison makes the first-evaluated direction
        // win exact ties
        let mut best: Option<PathOutcome> = None;
        let mut max_profit = Decimal::ZERO;
        for outcome in [&solana_to_bsc, &bsc_to_solana] {
            if let Some(path) = outcome {
                if path.profit > max_profit {
                    max_profit = path.profit;
                    best = Some(path.clone());
                }
            }
        }

        let classification = match &best {
            Some(path) if path.profit > self.params.profit_threshold_usd => {
                Classification::Qualifying
            }
            Some(_) => Classification::Marginal,
            None => Classification::None,
        };

        debug!(%classification, "cycle evaluated");

        Decision {
            solana_to_bsc,
            bsc_to_solana,
            best,
            classification,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrage::testutil::{base_token, quote_token, run_params, ScriptedQuotes};
    use rust_decimal_macros::dec;

    fn selector(quotes: ScriptedQuotes) -> OpportunitySelector<ScriptedQuotes> {
        let calculator = PathCalculator::new(quotes, base_token(), quote_token(), run_params());
        OpportunitySelector::new(calculator, run_params())
    }

    #[tokio::test]
    async fn test_both_paths_failing_yields_no_opportunity() {
        let sel = selector(ScriptedQuotes::new());

        let decision = sel.evaluate().await;

        assert!(decision.solana_to_bsc.is_none());
        assert!(decision.bsc_to_solana.is_none());
        assert!(decision.best.is_none());
        assert_eq!(decision.classification, Classification::None);
    }

    #[tokio::test]
    async fn test_qualifying_opportunity_selects_higher_profit() {
        // Solana->BSC nets $540 (profit 40), BSC->Solana nets $515
        // (profit 15); threshold is $30
        let quotes = ScriptedQuotes::new()
            .quote("USDT", "TKN", "1000000000") // 1.0 TKN @ 9 dec (Solana)
            .quote("TKN", "USDT", "540000000000000000000") // 540 @ 18 dec (BSC)
            .quote("USDT", "TKN", "2000000000000000000") // 2.0 TKN @ 18 dec (BSC)
            .quote("TKN", "USDT", "515000000"); // 515 @ 6 dec (Solana)
        let sel = selector(quotes);

        let decision = sel.evaluate().await;

        let best = decision.best.as_ref().unwrap();
        assert_eq!(best.direction, Direction::SolanaToBsc);
        assert_eq!(best.profit, dec!(40));
        assert_eq!(decision.classification, Classification::Qualifying);
        assert_eq!(decision.bsc_to_solana.as_ref().unwrap().profit, dec!(15));
    }

    #[tokio::test]
    async fn test_positive_profit_below_threshold_is_marginal() {
        // Single surviving path with profit 10.123456 against threshold 30
        let quotes = ScriptedQuotes::new()
            .quote("USDT", "TKN", "1000000000")
            .quote("TKN", "USDT", "510123456000000000000") // 510.123456 @ 18 dec
            .failure();
        let sel = selector(quotes);

        let decision = sel.evaluate().await;

        assert_eq!(decision.best_profit(), Some(dec!(10.123456)));
        assert_eq!(decision.classification, Classification::Marginal);
        assert!(decision.bsc_to_solana.is_none());
    }

    #[tokio::test]
    async fn test_tie_break_prefers_first_evaluated_direction() {
        // Both directions end at exactly $510 (profit 10)
        let quotes = ScriptedQuotes::new()
            .quote("USDT", "TKN", "1000000000")
            .quote("TKN", "USDT", "510000000000000000000")
            .quote("USDT", "TKN", "1000000000000000000")
            .quote("TKN", "USDT", "510000000");
        let sel = selector(quotes);

        let decision = sel.evaluate().await;

        assert_eq!(
            decision.best.as_ref().unwrap().direction,
            Direction::SolanaToBsc
        );
    }

    #[tokio::test]
    async fn test_non_positive_profit_is_never_best() {
        // Only computed outcome breaks even exactly; the other path fails
        let quotes = ScriptedQuotes::new()
            .quote("USDT", "TKN", "1000000000")
            .quote("TKN", "USDT", "500000000000000000000") // exactly $500 back
            .failure();
        let sel = selector(quotes);

        let decision = sel.evaluate().await;

        assert!(decision.solana_to_bsc.is_some());
        assert!(decision.best.is_none());
        assert_eq!(decision.classification, Classification::None);
    }

    #[tokio::test]
    async fn test_losing_outcomes_classify_as_none() {
        let quotes = ScriptedQuotes::new()
            .quote("USDT", "TKN", "1000000000")
            .quote("TKN", "USDT", "480000000000000000000") // -$20
            .quote("USDT", "TKN", "1000000000000000000")
            .quote("TKN", "USDT", "495000000"); // -$5
        let sel = selector(quotes);

        let decision = sel.evaluate().await;

        assert!(decision.best.is_none());
        assert_eq!(decision.classification, Classification::None);
    }
}
