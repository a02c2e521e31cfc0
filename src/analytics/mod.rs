//! Per-market, per-selection order-book analytics.
//!
//! ## Ownership
//!
//! Each market gets one [`MarketAnalytics`] map, keyed by
//! [`SelectionKey`](crate::types::SelectionKey). The map is owned by the
//! [`SimulatedMiddleware`](crate::middleware::SimulatedMiddleware) and
//! published to the market's context through a [`SharedAnalytics`] handle,
//! so orders and other middlewares read the very same entries.
//!
//! Distinct markets never share a map, which is what allows markets to be
//! processed on different threads without further coordination.

pub mod runner;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::types::SelectionKey;

pub use runner::{RunnerAnalytics, TradedDelta};

/// Analytics for every selection seen in one market
pub type MarketAnalytics = HashMap<SelectionKey, RunnerAnalytics>;

/// Shared handle to one market's analytics
pub type SharedAnalytics = Arc<RwLock<MarketAnalytics>>;
