//! Core data types for the market middleware
//!
//! Feed snapshots are immutable values for one tick and derive serde so
//! they can be read straight from stream JSON. All prices, sizes and
//! matched totals are `rust_decimal::Decimal`.
//!
//! ## Types
//!
//! - [`MarketBook`]: one market's book at a tick
//! - [`RunnerBook`]: one selection's book at a tick
//! - [`RunnerPrices`]: the selection's back/lay/traded ladders
//! - [`PriceSize`]: a single ladder rung
//! - [`SelectionKey`]: `(selection_id, handicap)`
//! - [`Side`], [`OrderStatus`]: order vocabulary
//! - [`Fill`]: a simulated match

mod fill;
mod market;
mod order;
mod runner;
pub mod price;

// Re-export all types at module level
pub use fill::Fill;
pub use market::MarketBook;
pub use order::{OrderId, OrderStatus, Side};
pub use price::{Ladder, PriceSize};
pub use runner::{RunnerBook, RunnerPrices, RunnerStatus, SelectionKey};
