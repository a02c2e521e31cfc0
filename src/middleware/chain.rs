//! Ordered middleware chain driven by the market processing loop.

use tracing::{debug, error};

use crate::config::Config;
use crate::error::Result;
use crate::market::Market;
use crate::middleware::{Middleware, SimulatedMiddleware};
use crate::order::SimulatedOrder;

/// Middlewares run in insertion order for every market.
///
/// A failing middleware is logged and skipped unless the chain was built
/// with `raise_errors`, in which case the error aborts the tick.
pub struct MiddlewareChain<O: SimulatedOrder> {
    middlewares: Vec<Box<dyn Middleware<O>>>,
    raise_errors: bool,
}

impl<O: SimulatedOrder> MiddlewareChain<O> {
    /// Create an empty chain
    pub fn new(raise_errors: bool) -> Self {
        Self {
            middlewares: Vec::new(),
            raise_errors,
        }
    }

    /// Build the chain described by the configuration.
    ///
    /// With `simulated` enabled, [`SimulatedMiddleware`] is installed first
    /// so every later middleware and order sees fresh analytics.
    pub fn from_config(config: &Config) -> Self {
        let mut chain = Self::new(config.raise_errors);
        if config.simulated {
            chain.push(SimulatedMiddleware::new());
        }
        chain
    }

    /// Append a middleware to the end of the chain
    pub fn push<M: Middleware<O> + 'static>(&mut self, middleware: M) {
        debug!(middleware = middleware.name(), "Middleware added to chain");
        self.middlewares.push(Box::new(middleware));
    }

    /// Number of middlewares in the chain
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Check if the chain has no middlewares
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Names of the middlewares, in run order
    pub fn names(&self) -> Vec<&'static str> {
        self.middlewares.iter().map(|middleware| middleware.name()).collect()
    }

    /// Notify every middleware of a new market
    pub fn add_market(&mut self, market: &mut Market<O>) {
        for middleware in &mut self.middlewares {
            middleware.add_market(market);
        }
    }

    /// Notify every middleware that a market is closed
    pub fn remove_market(&mut self, market: &mut Market<O>) {
        for middleware in &mut self.middlewares {
            middleware.remove_market(market);
        }
    }

    /// Run every middleware for the market's latest book.
    ///
    /// # Errors
    ///
    /// The first middleware error, only when `raise_errors` is set.
    pub fn call(&mut self, market: &mut Market<O>) -> Result<()> {
        for middleware in &mut self.middlewares {
            if let Err(err) = middleware.call(market) {
                error!(
                    middleware = middleware.name(),
                    market_id = %market.market_id,
                    error = %err,
                    "Middleware failed"
                );
                if self.raise_errors {
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
