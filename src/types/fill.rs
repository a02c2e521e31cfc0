//! Fill type recording a simulated match against traded volume.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fill is one slice of an order matched by the simulation.
///
/// ## Price Discovery
///
/// Immediate fills at placement execute at the price taken from the book.
/// Fills from traded volume execute at the order's own price: the order
/// was resting and the market traded through it.
///
/// ## Example
///
/// ```
/// use market_middleware::types::Fill;
/// use rust_decimal_macros::dec;
///
/// let fill = Fill::new(dec!(2.5), dec!(10), 1703577600000);
/// assert_eq!(fill.liability(), dec!(15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fill {
    /// Matched price
    pub price: Decimal,

    /// Matched size (stake)
    pub size: Decimal,

    /// Publish time of the market update that produced the fill (ms)
    pub publish_time: u64,
}

impl Fill {
    /// Create a new fill
    pub fn new(price: Decimal, size: Decimal, publish_time: u64) -> Self {
        Self {
            price,
            size,
            publish_time,
        }
    }

    /// Lay-side liability of this fill: `size * (price - 1)`
    pub fn liability(&self) -> Decimal {
        self.size * (self.price - Decimal::ONE)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
