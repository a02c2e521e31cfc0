//! # Market Middleware
//!
//! Per-tick runner analytics and simulated order matching for streaming
//! betting-exchange markets.
//!
//! ## Architecture
//!
//! - **Types**: Feed snapshots (MarketBook, RunnerBook, ladders) and order vocabulary
//! - **Analytics**: RunnerAnalytics, incremental facts derived from two snapshots
//! - **Middleware**: Lifecycle contract, SimulatedMiddleware, MiddlewareChain
//! - **Market**: Market container, context side channel and blotter
//! - **Order**: SimulatedOrder capability and a reference limit order
//!
//! ## Tick Pipeline
//!
//! ```text
//! processing loop -> MiddlewareChain -> SimulatedMiddleware
//!                                          |-- update RunnerAnalytics for each active runner
//!                                          `-- offer analytics to each executable simulated order
//! ```
//!
//! ## Design Principles
//!
//! 1. **No look-ahead**: every selection is updated before any order reads analytics
//! 2. **No floating point**: prices and sizes are `rust_decimal::Decimal`
//! 3. **Synchronous**: a tick runs to completion with no suspension points

// ============================================================================
// Module declarations
// ============================================================================

/// Feed snapshots and order vocabulary
pub mod types;

/// Per-selection analytics
pub mod analytics;

/// Market container, context and blotter
pub mod market;

/// Simulated order capability
pub mod order;

/// Middleware contract and implementations
pub mod middleware;

/// Configuration
pub mod config;

/// Error types
pub mod error;

/// Logging setup
pub mod logging;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use analytics::{MarketAnalytics, RunnerAnalytics, SharedAnalytics};
pub use config::Config;
pub use error::{MiddlewareError, OrderError};
pub use market::{Blotter, Market, MarketContext};
pub use middleware::{Middleware, MiddlewareChain, SimulatedMiddleware};
pub use order::{SimulatedLimitOrder, SimulatedOrder};
pub use types::{MarketBook, OrderStatus, PriceSize, RunnerBook, SelectionKey, Side};
