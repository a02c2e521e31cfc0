//! Price ladders and exchange price bounds.
//!
//! ## Overview
//!
//! The feed describes every selection's book as ladders: ordered sequences
//! of `{price, size}` pairs. Available-to-back and available-to-lay ladders
//! are ordered best-first; the traded-volume ladder is ordered by ascending
//! price.
//!
//! All values are `rust_decimal::Decimal`, so `39.0` and `39` compare equal
//! and midpoints such as `(2.00 + 2.02) / 2` are exact.
//!
//! ## Examples
//!
//! ```
//! use market_middleware::types::price::{best_price, size_at, PriceSize};
//! use rust_decimal_macros::dec;
//!
//! let ladder = vec![PriceSize::new(dec!(2.0), dec!(10)), PriceSize::new(dec!(1.99), dec!(4))];
//! assert_eq!(best_price(&ladder), Some(dec!(2.0)));
//! assert_eq!(size_at(&ladder, dec!(1.99)), dec!(4));
//! assert_eq!(size_at(&ladder, dec!(1.98)), dec!(0));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Lowest price an order may be placed at.
pub const MIN_PRICE: Decimal = dec!(1.01);

/// Highest price an order may be placed at.
pub const MAX_PRICE: Decimal = dec!(1000);

/// Middle price reported when either side of the book is unquoted.
///
/// Midpoint of the exchange price range 1..1000: fully uncertain.
pub const MIDDLE_UNKNOWN: Decimal = dec!(500.5);

// ============================================================================
// PriceSize
// ============================================================================

/// One rung of a ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PriceSize {
    /// Price of the rung
    pub price: Decimal,

    /// Size available (or traded) at `price`
    #[serde(default)]
    pub size: Decimal,
}

impl PriceSize {
    /// Create a new rung
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }
}

/// Ordered sequence of rungs as delivered by the feed.
pub type Ladder = Vec<PriceSize>;

// ============================================================================
// Ladder helpers
// ============================================================================

/// Price of the first rung, if any.
///
/// For best-first ladders this is the best available price.
#[inline]
pub fn best_price(ladder: &[PriceSize]) -> Option<Decimal> {
    ladder.first().map(|level| level.price)
}

/// Size at an exact price, `0` if the price is not on the ladder.
pub fn size_at(ladder: &[PriceSize], price: Decimal) -> Decimal {
    ladder
        .iter()
        .find(|level| level.price == price)
        .map_or(Decimal::ZERO, |level| level.size)
}

/// Check that an order price lies within the exchange bounds.
///
/// # Example
///
/// ```
/// use market_middleware::types::price::is_valid_price;
/// use rust_decimal_macros::dec;
///
/// assert!(is_valid_price(dec!(1.01)));
/// assert!(is_valid_price(dec!(1000)));
/// assert!(!is_valid_price(dec!(1.0)));
/// assert!(!is_valid_price(dec!(1000.5)));
/// ```
pub fn is_valid_price(price: Decimal) -> bool {
    (MIN_PRICE..=MAX_PRICE).contains(&price)
}

// ============================================================================
// Unit Tests
// ============================================================================
