//! Market snapshot delivered by the market-data feed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::runner::{RunnerBook, SelectionKey};

/// Full book for one market as of a single tick.
///
/// ## Example
///
/// ```
/// use market_middleware::types::{MarketBook, RunnerBook};
/// use rust_decimal_macros::dec;
///
/// let book = MarketBook::new("1.23456789", 1703577600000)
///     .with_runners(vec![RunnerBook::new(1, dec!(0)), RunnerBook::new(2, dec!(0))]);
///
/// assert_eq!(book.active_runners().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBook {
    /// Exchange market identifier (e.g. "1.23456789")
    pub market_id: String,

    /// Unix timestamp in milliseconds at which the exchange published the update
    #[serde(default)]
    pub publish_time: u64,

    /// Whether the market is in-play
    #[serde(default)]
    pub inplay: bool,

    /// Cumulative amount matched across the market
    #[serde(default)]
    pub total_matched: Decimal,

    /// Selection books in feed order
    #[serde(default)]
    pub runners: Vec<RunnerBook>,
}

impl MarketBook {
    /// Create an empty book
    pub fn new(market_id: impl Into<String>, publish_time: u64) -> Self {
        Self {
            market_id: market_id.into(),
            publish_time,
            ..Default::default()
        }
    }

    /// Set the selection books
    pub fn with_runners(mut self, runners: Vec<RunnerBook>) -> Self {
        self.runners = runners;
        self
    }

    /// Selections that are still trading
    pub fn active_runners(&self) -> impl Iterator<Item = &RunnerBook> {
        self.runners.iter().filter(|runner| runner.status.is_active())
    }

    /// Look up a selection by key
    pub fn runner(&self, key: SelectionKey) -> Option<&RunnerBook> {
        self.runners.iter().find(|runner| runner.key() == key)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
