//! Market container owned by the processing loop.
//!
//! A [`Market`] bundles what the middlewares see on every tick: the latest
//! [`MarketBook`], a [`MarketContext`] for cross-middleware state, and the
//! [`Blotter`] of orders placed on the market.
//!
//! ## Example
//!
//! ```
//! use market_middleware::market::Market;
//! use market_middleware::order::SimulatedLimitOrder;
//! use market_middleware::types::MarketBook;
//!
//! let mut market: Market<SimulatedLimitOrder> = Market::new(MarketBook::new("1.23", 0));
//! market.update_book(MarketBook::new("1.23", 1000));
//!
//! assert_eq!(market.market_id, "1.23");
//! assert_eq!(market.market_book.publish_time, 1000);
//! ```

pub mod blotter;
pub mod context;

use tracing::warn;

use crate::types::MarketBook;

pub use blotter::Blotter;
pub use context::MarketContext;

/// One market as seen by the middleware chain.
#[derive(Debug, Clone)]
pub struct Market<O> {
    /// Exchange market identifier
    pub market_id: String,

    /// Latest book
    pub market_book: MarketBook,

    /// State shared between middlewares and orders
    pub context: MarketContext,

    /// Orders placed on this market
    pub blotter: Blotter<O>,
}

impl<O> Market<O> {
    /// Create a market from its first book
    pub fn new(market_book: MarketBook) -> Self {
        Self {
            market_id: market_book.market_id.clone(),
            market_book,
            context: MarketContext::new(),
            blotter: Blotter::new(),
        }
    }

    /// Replace the book with the next update.
    ///
    /// Books for other markets are ignored.
    pub fn update_book(&mut self, market_book: MarketBook) {
        if market_book.market_id != self.market_id {
            warn!(
                market_id = %self.market_id,
                received = %market_book.market_id,
                "Ignoring book for a different market"
            );
            return;
        }
        self.market_book = market_book;
    }
}
