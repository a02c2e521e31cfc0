//! Market middleware: per-tick hooks run by the market processing loop.
//!
//! ## Lifecycle
//!
//! For every market the processing loop:
//!
//! 1. calls [`Middleware::add_market`] once when the market first appears,
//! 2. calls [`Middleware::call`] on every book update,
//! 3. calls [`Middleware::remove_market`] once when the market is closed.
//!
//! Middlewares run in a fixed order ([`MiddlewareChain`]); a later
//! middleware sees whatever an earlier one published in the market context.
//!
//! ## Example
//!
//! ```
//! use market_middleware::market::Market;
//! use market_middleware::middleware::{Middleware, SimulatedMiddleware};
//! use market_middleware::order::SimulatedLimitOrder;
//! use market_middleware::types::{MarketBook, RunnerBook};
//! use rust_decimal_macros::dec;
//!
//! let book = MarketBook::new("1.23", 0).with_runners(vec![RunnerBook::new(1, dec!(0))]);
//! let mut market: Market<SimulatedLimitOrder> = Market::new(book);
//! let mut middleware = SimulatedMiddleware::new();
//!
//! middleware.call(&mut market).unwrap();
//!
//! let analytics = market.context.simulated().unwrap().read().unwrap();
//! assert_eq!(analytics.len(), 1);
//! ```

pub mod chain;
pub mod simulated;

use crate::error::Result;
use crate::market::Market;
use crate::order::SimulatedOrder;

pub use chain::MiddlewareChain;
pub use simulated::SimulatedMiddleware;

/// Hooks a middleware exposes to the market processing loop.
///
/// Only [`call`](Middleware::call) is required; the lifecycle hooks default
/// to no-ops.
pub trait Middleware<O: SimulatedOrder> {
    /// Name used in log fields
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Process the market's latest book.
    fn call(&mut self, market: &mut Market<O>) -> Result<()>;

    /// The market has become known to the processing loop.
    fn add_market(&mut self, _market: &mut Market<O>) {}

    /// The market is being torn down.
    fn remove_market(&mut self, _market: &mut Market<O>) {}
}

// ============================================================================
// Unit Tests
// ============================================================================
