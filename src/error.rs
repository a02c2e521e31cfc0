//! Error types for the market middleware.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{OrderId, OrderStatus, SelectionKey};

/// Errors raised while running middlewares for a market.
#[derive(Debug, Error)]
pub enum MiddlewareError {
    /// A previous tick panicked while holding the market's analytics
    #[error("analytics lock poisoned for market {market_id}")]
    Poisoned {
        /// Market whose analytics can no longer be trusted
        market_id: String,
    },

    /// A middleware reported a failure for this tick
    #[error("middleware {middleware} failed: {reason}")]
    Failed {
        /// Name of the failing middleware
        middleware: String,
        /// Failure description
        reason: String,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for middleware operations.
pub type Result<T> = std::result::Result<T, MiddlewareError>;

/// Errors raised by order placement, cancellation and the blotter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The operation is not allowed from the order's current status
    #[error("order {id} cannot do this while {status:?}")]
    InvalidState {
        /// Order identifier
        id: OrderId,
        /// Status at the time of the call
        status: OrderStatus,
    },

    /// Size must be strictly positive
    #[error("invalid order size: {0}")]
    InvalidSize(Decimal),

    /// Price is outside the exchange bounds
    #[error("invalid order price: {0}")]
    InvalidPrice(Decimal),

    /// The book handed to the order belongs to another selection
    #[error("order {id} is for {expected:?}, not {received:?}")]
    SelectionMismatch {
        /// Order identifier
        id: OrderId,
        /// Selection the order was created for
        expected: SelectionKey,
        /// Selection of the runner passed in
        received: SelectionKey,
    },

    /// An order with this id is already in the blotter
    #[error("duplicate order id: {0}")]
    Duplicate(OrderId),
}
