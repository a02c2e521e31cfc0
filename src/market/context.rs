//! Per-market context shared between middlewares and orders.

use crate::analytics::SharedAnalytics;

/// Side channel through which middlewares publish per-market state.
///
/// The simulated middleware stores its analytics handle under
/// [`MarketContext::simulated`]; the handle is the same allocation the
/// middleware updates, so readers always see the current tick.
#[derive(Debug, Clone, Default)]
pub struct MarketContext {
    simulated: Option<SharedAnalytics>,
}

impl MarketContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Analytics published by the simulated middleware, if it has run
    pub fn simulated(&self) -> Option<&SharedAnalytics> {
        self.simulated.as_ref()
    }

    /// Publish the simulated middleware's analytics handle
    pub fn set_simulated(&mut self, analytics: SharedAnalytics) {
        self.simulated = Some(analytics);
    }

    /// Drop the published analytics handle
    pub fn clear_simulated(&mut self) -> Option<SharedAnalytics> {
        self.simulated.take()
    }
}
