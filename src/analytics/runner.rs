//! Per-selection tick analytics.
//!
//! ## Incremental Facts
//!
//! The feed only ever sends full snapshots. `RunnerAnalytics` keeps the
//! previous snapshot and derives, for each new one:
//!
//! - **traded**: size traded at each price since the last tick
//! - **matched**: change in the selection's total matched amount
//! - **middle**: midpoint of best back and best lay on the previous
//!   snapshot, the book those trades were made against
//!
//! ## Update Order
//!
//! Every derived value is computed from the stored (previous) snapshot and
//! the incoming one. Only after all three are computed is the incoming
//! snapshot adopted as the new baseline.
//!
//! ## Example
//!
//! ```
//! use market_middleware::analytics::RunnerAnalytics;
//! use market_middleware::types::{PriceSize, RunnerBook, RunnerPrices};
//! use rust_decimal_macros::dec;
//!
//! let mut ex = RunnerPrices::default();
//! ex.traded_volume = vec![PriceSize::new(dec!(2.0), dec!(10))];
//! let runner = RunnerBook::new(1, dec!(0)).with_total_matched(dec!(10)).with_prices(ex.clone());
//!
//! // First sighting: everything is new
//! let mut analytics = RunnerAnalytics::new(&runner);
//! assert_eq!(analytics.traded.get(&dec!(2.0)), Some(&dec!(10)));
//! assert_eq!(analytics.matched, dec!(10));
//!
//! // Same book again: nothing traded
//! analytics.update(&runner);
//! assert!(analytics.traded.is_empty());
//! assert_eq!(analytics.matched, dec!(0));
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::trace;

use crate::types::price::{best_price, size_at, Ladder, MIDDLE_UNKNOWN};
use crate::types::{PriceSize, RunnerBook};

/// Size traded per price since the previous tick, ascending by price.
///
/// Only prices whose traded size changed are present.
pub type TradedDelta = BTreeMap<Decimal, Decimal>;

/// Analytics for one `(selection_id, handicap)` within one market.
#[derive(Debug, Clone)]
pub struct RunnerAnalytics {
    /// Last processed snapshot
    runner: RunnerBook,

    /// Traded-volume ladder of the last processed snapshot
    traded_volume: Ladder,

    /// Size traded per price on the latest tick
    pub traded: TradedDelta,

    /// Change in total matched on the latest tick
    pub matched: Decimal,

    /// Best back / best lay midpoint of the previous snapshot,
    /// [`MIDDLE_UNKNOWN`] when either side is empty
    pub middle: Decimal,
}

impl RunnerAnalytics {
    /// Create analytics on first sighting of a selection.
    ///
    /// The first update runs immediately against an empty baseline (no
    /// prices, no traded volume, nothing matched), so `traded` holds the
    /// full current ladder, `matched` the full current total and `middle`
    /// is [`MIDDLE_UNKNOWN`].
    pub fn new(runner: &RunnerBook) -> Self {
        let mut analytics = Self {
            runner: RunnerBook::new(runner.selection_id, runner.handicap),
            traded_volume: Ladder::new(),
            traded: TradedDelta::new(),
            matched: Decimal::ZERO,
            middle: MIDDLE_UNKNOWN,
        };
        analytics.update(runner);
        analytics
    }

    /// Process the next snapshot of this selection.
    pub fn update(&mut self, runner: &RunnerBook) {
        let traded = self.calculate_traded(runner);
        let middle = Self::calculate_middle(&self.runner);
        let matched = self.calculate_matched(runner);

        trace!(
            selection_id = runner.selection_id,
            handicap = %runner.handicap,
            traded_levels = traded.len(),
            matched = %matched,
            middle = %middle,
            "Runner analytics updated"
        );

        self.traded = traded;
        self.middle = middle;
        self.matched = matched;
        self.traded_volume = runner.ex.traded_volume.clone();
        self.runner = runner.clone();
    }

    /// Last processed snapshot
    #[inline]
    pub fn runner(&self) -> &RunnerBook {
        &self.runner
    }

    /// Traded-volume ladder used as the baseline for the next update
    #[inline]
    pub fn traded_volume(&self) -> &[PriceSize] {
        &self.traded_volume
    }

    // ========================================================================
    // Calculations
    // ========================================================================

    fn calculate_traded(&self, runner: &RunnerBook) -> TradedDelta {
        runner
            .ex
            .traded_volume
            .iter()
            .filter_map(|level| {
                let delta = level.size - size_at(&self.traded_volume, level.price);
                (!delta.is_zero()).then_some((level.price, delta))
            })
            .collect()
    }

    fn calculate_middle(runner: &RunnerBook) -> Decimal {
        match (
            best_price(&runner.ex.available_to_back),
            best_price(&runner.ex.available_to_lay),
        ) {
            (Some(back), Some(lay)) => (back + lay) / Decimal::TWO,
            _ => MIDDLE_UNKNOWN,
        }
    }

    fn calculate_matched(&self, runner: &RunnerBook) -> Decimal {
        // total_matched resets to zero when a selection is removed
        if runner.total_matched.is_zero() {
            return Decimal::ZERO;
        }
        runner.total_matched - self.runner.total_matched
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
