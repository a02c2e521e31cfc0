//! Selection (runner) snapshots delivered by the market-data feed.
//!
//! A `RunnerBook` is an immutable value for one tick. The middleware never
//! holds on to the feed's copy; analytics keep their own clone of the last
//! snapshot they processed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::price::Ladder;

// ============================================================================
// RunnerStatus
// ============================================================================

/// Status of a selection within its market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunnerStatus {
    /// Selection is trading
    #[default]
    Active,
    /// Settled as a winner
    Winner,
    /// Settled as a loser
    Loser,
    /// Settled as placed (each-way / place markets)
    Placed,
    /// Removed, vacant slot (e.g. a greyhound trap)
    RemovedVacant,
    /// Removed from the market
    Removed,
    /// Hidden by the exchange
    Hidden,
}

impl RunnerStatus {
    /// Only trading selections receive analytics.
    #[inline]
    pub fn is_active(self) -> bool {
        self == RunnerStatus::Active
    }
}

// ============================================================================
// RunnerPrices
// ============================================================================

/// Exchange ladders for a selection (`ex` in the feed).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunnerPrices {
    /// Prices a backer can take, best (highest) first
    pub available_to_back: Ladder,

    /// Prices a layer can take, best (lowest) first
    pub available_to_lay: Ladder,

    /// Cumulative traded volume per price
    pub traded_volume: Ladder,
}

// ============================================================================
// SelectionKey
// ============================================================================

/// Identifies a selection within a market: `(selection_id, handicap)`.
///
/// Handicap markets list the same selection id once per handicap line, so
/// the id alone is not unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SelectionKey {
    /// Exchange selection identifier
    pub selection_id: u64,

    /// Handicap line (zero for non-handicap markets)
    pub handicap: Decimal,
}

impl SelectionKey {
    /// Create a new key
    pub fn new(selection_id: u64, handicap: Decimal) -> Self {
        Self {
            selection_id,
            handicap,
        }
    }
}

// ============================================================================
// RunnerBook
// ============================================================================

/// One selection's book as of a single tick.
///
/// ## Example
///
/// ```
/// use market_middleware::types::{RunnerBook, RunnerStatus};
/// use rust_decimal_macros::dec;
///
/// let runner = RunnerBook::new(12345, dec!(0)).with_total_matched(dec!(250));
/// assert!(runner.status.is_active());
/// assert_eq!(runner.key().selection_id, 12345);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerBook {
    /// Exchange selection identifier
    pub selection_id: u64,

    /// Handicap line
    #[serde(default)]
    pub handicap: Decimal,

    /// Selection status
    #[serde(default)]
    pub status: RunnerStatus,

    /// Cumulative amount matched on this selection.
    /// Non-decreasing, except for a reset to zero on removal.
    #[serde(default)]
    pub total_matched: Decimal,

    /// Price of the most recent trade
    #[serde(default)]
    pub last_price_traded: Option<Decimal>,

    /// Exchange ladders
    #[serde(default)]
    pub ex: RunnerPrices,
}

impl RunnerBook {
    /// Create an active selection with empty ladders
    pub fn new(selection_id: u64, handicap: Decimal) -> Self {
        Self {
            selection_id,
            handicap,
            ..Default::default()
        }
    }

    /// Set the status
    pub fn with_status(mut self, status: RunnerStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the cumulative matched amount
    pub fn with_total_matched(mut self, total_matched: Decimal) -> Self {
        self.total_matched = total_matched;
        self
    }

    /// Set the exchange ladders
    pub fn with_prices(mut self, ex: RunnerPrices) -> Self {
        self.ex = ex;
        self
    }

    /// Key under which analytics for this selection are stored
    #[inline]
    pub fn key(&self) -> SelectionKey {
        SelectionKey::new(self.selection_id, self.handicap)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
