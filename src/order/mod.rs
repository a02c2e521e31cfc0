//! Orders as seen by the simulation.
//!
//! The middleware does not own order logic. It only needs the capability
//! described by [`SimulatedOrder`]: identify the selection, report status,
//! say whether the order is simulated, and accept a tick's analytics.
//!
//! [`SimulatedLimitOrder`] is the reference implementation used for paper
//! trading: a back or lay limit order matched from traded volume with a
//! position-in-queue model.

pub mod limit;

use rust_decimal::Decimal;

use crate::analytics::RunnerAnalytics;
use crate::types::{MarketBook, OrderId, OrderStatus, SelectionKey};

pub use limit::SimulatedLimitOrder;

/// Capability an order exposes to the simulation.
///
/// The middleware borrows orders for a single tick and never keeps a
/// handle to them; each order mutates only its own state.
pub trait SimulatedOrder {
    /// Order identifier, unique within a blotter
    fn id(&self) -> OrderId;

    /// Selection the order is placed on
    fn selection_id(&self) -> u64;

    /// Handicap line the order is placed on
    fn handicap(&self) -> Decimal;

    /// Current lifecycle status
    fn status(&self) -> OrderStatus;

    /// `false` for orders mirroring a real exchange order; those are never
    /// matched by the simulation even when executable
    fn is_simulated(&self) -> bool;

    /// Apply one tick of analytics for the order's selection
    fn simulated(&mut self, market_book: &MarketBook, analytics: &RunnerAnalytics);

    /// Key of the analytics entry this order reads
    fn selection_key(&self) -> SelectionKey {
        SelectionKey::new(self.selection_id(), self.handicap())
    }
}
