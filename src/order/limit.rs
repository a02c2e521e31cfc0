//! Simulated back/lay limit order.
//!
//! ## Matching Model
//!
//! 1. **Placement**: the order first takes whatever the book offers at its
//!    price or better (`available_to_back` for a back, `available_to_lay`
//!    for a lay), best price first. Any remainder rests at the order price.
//! 2. **Queue**: a resting order joins the back of the queue. The size
//!    already offered at that price on its own side is its position in
//!    queue (`piq`).
//! 3. **Traded volume**: each tick, volume traded at the order price or
//!    better first drains the queue ahead; the excess matches the order at
//!    the order price.
//!
//! ## Example
//!
//! ```
//! use market_middleware::analytics::RunnerAnalytics;
//! use market_middleware::order::{SimulatedLimitOrder, SimulatedOrder};
//! use market_middleware::types::{MarketBook, OrderStatus, PriceSize, RunnerBook, RunnerPrices, SelectionKey, Side};
//! use rust_decimal_macros::dec;
//!
//! let key = SelectionKey::new(1, dec!(0));
//! let mut order = SimulatedLimitOrder::new(1, key, Side::Back, dec!(3.0), dec!(10)).unwrap();
//!
//! // Nothing to take at 3.0 or better, 5 already queued at 3.0
//! let runner = RunnerBook::new(1, dec!(0)).with_prices(RunnerPrices {
//!     available_to_back: vec![PriceSize::new(dec!(2.98), dec!(20))],
//!     available_to_lay: vec![PriceSize::new(dec!(3.0), dec!(5))],
//!     traded_volume: vec![],
//! });
//! order.place(&runner, 0).unwrap();
//! assert_eq!(order.status(), OrderStatus::Executable);
//! assert_eq!(order.piq(), dec!(5));
//!
//! // 12 trades at 3.0: 5 clears the queue, 7 matches us
//! let mut next = runner.clone();
//! next.ex.traded_volume = vec![PriceSize::new(dec!(3.0), dec!(12))];
//! let analytics = RunnerAnalytics::new(&next);
//! order.simulated(&MarketBook::new("1.1", 1000), &analytics);
//! assert_eq!(order.size_matched(), dec!(7));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::analytics::RunnerAnalytics;
use crate::error::OrderError;
use crate::order::SimulatedOrder;
use crate::types::price::{is_valid_price, size_at};
use crate::types::{Fill, MarketBook, OrderId, OrderStatus, RunnerBook, SelectionKey, Side};

/// A limit order whose matching is simulated from market data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedLimitOrder {
    /// Order identifier
    id: OrderId,

    /// Selection the order is placed on
    key: SelectionKey,

    /// Back or Lay
    side: Side,

    /// Limit price
    price: Decimal,

    /// Requested size
    size: Decimal,

    /// Lifecycle status
    status: OrderStatus,

    /// `false` when mirroring a real exchange order
    simulated: bool,

    /// Size matched so far
    size_matched: Decimal,

    /// Size cancelled or lapsed
    size_cancelled: Decimal,

    /// Size queued ahead of this order at its price
    piq: Decimal,

    /// Matches in the order they happened
    fills: Vec<Fill>,
}

impl SimulatedLimitOrder {
    /// Create a new pending order
    ///
    /// # Errors
    ///
    /// * [`OrderError::InvalidSize`] - size is zero or negative
    /// * [`OrderError::InvalidPrice`] - price is outside `1.01..=1000`
    pub fn new(
        id: OrderId,
        key: SelectionKey,
        side: Side,
        price: Decimal,
        size: Decimal,
    ) -> Result<Self, OrderError> {
        if size <= Decimal::ZERO {
            return Err(OrderError::InvalidSize(size));
        }
        if !is_valid_price(price) {
            return Err(OrderError::InvalidPrice(price));
        }

        Ok(Self {
            id,
            key,
            side,
            price,
            size,
            status: OrderStatus::Pending,
            simulated: true,
            size_matched: Decimal::ZERO,
            size_cancelled: Decimal::ZERO,
            piq: Decimal::ZERO,
            fills: Vec::new(),
        })
    }

    /// Mark the order as mirroring a real exchange order.
    ///
    /// Such orders are tracked by the blotter but never matched by the
    /// simulation.
    pub fn mirrored(mut self) -> Self {
        self.simulated = false;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Back or Lay
    pub fn side(&self) -> Side {
        self.side
    }

    /// Limit price
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Requested size
    pub fn size(&self) -> Decimal {
        self.size
    }

    /// Size matched so far
    pub fn size_matched(&self) -> Decimal {
        self.size_matched
    }

    /// Size cancelled or lapsed
    pub fn size_cancelled(&self) -> Decimal {
        self.size_cancelled
    }

    /// Size still waiting to be matched
    pub fn size_remaining(&self) -> Decimal {
        self.size - self.size_matched - self.size_cancelled
    }

    /// Size queued ahead at the order price
    pub fn piq(&self) -> Decimal {
        self.piq
    }

    /// Matches so far
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Size-weighted average matched price, `None` before the first fill
    pub fn average_price_matched(&self) -> Option<Decimal> {
        if self.size_matched.is_zero() {
            return None;
        }
        let notional: Decimal = self.fills.iter().map(|fill| fill.price * fill.size).sum();
        Some(notional / self.size_matched)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Accept the order against the selection's current book.
    ///
    /// # Errors
    ///
    /// * [`OrderError::InvalidState`] - the order is not `Pending`
    /// * [`OrderError::SelectionMismatch`] - `runner` is another selection
    pub fn place(&mut self, runner: &RunnerBook, publish_time: u64) -> Result<(), OrderError> {
        if self.status != OrderStatus::Pending {
            return Err(self.invalid_state());
        }
        if runner.key() != self.key {
            return Err(OrderError::SelectionMismatch {
                id: self.id,
                expected: self.key,
                received: runner.key(),
            });
        }

        let (takeable, queue) = match self.side {
            Side::Back => (&runner.ex.available_to_back, &runner.ex.available_to_lay),
            Side::Lay => (&runner.ex.available_to_lay, &runner.ex.available_to_back),
        };

        for level in takeable {
            let remaining = self.size_remaining();
            if remaining.is_zero() || !self.crosses(level.price) {
                break;
            }
            let size = remaining.min(level.size);
            if size > Decimal::ZERO {
                self.fill(level.price, size, publish_time);
            }
        }

        self.piq = size_at(queue, self.price);
        self.status = OrderStatus::Executable;
        self.complete_if_filled();

        debug!(
            order_id = self.id,
            selection_id = self.key.selection_id,
            side = ?self.side,
            price = %self.price,
            size_matched = %self.size_matched,
            piq = %self.piq,
            "Simulated order placed"
        );
        Ok(())
    }

    /// Cancel whatever is left unmatched.
    ///
    /// # Errors
    ///
    /// [`OrderError::InvalidState`] unless the order is `Executable`.
    pub fn cancel(&mut self) -> Result<Decimal, OrderError> {
        match self.status {
            OrderStatus::Executable => {
                let cancelled = self.size_remaining();
                self.size_cancelled += cancelled;
                self.status = OrderStatus::ExecutionComplete;
                debug!(order_id = self.id, size_cancelled = %cancelled, "Simulated order cancelled");
                Ok(cancelled)
            }
            _ => Err(self.invalid_state()),
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Whether a trade or offer at `price` is at the order price or better
    fn crosses(&self, price: Decimal) -> bool {
        match self.side {
            Side::Back => price >= self.price,
            Side::Lay => price <= self.price,
        }
    }

    fn fill(&mut self, price: Decimal, size: Decimal, publish_time: u64) {
        self.size_matched += size;
        self.fills.push(Fill::new(price, size, publish_time));
    }

    fn complete_if_filled(&mut self) {
        if self.size_remaining() <= Decimal::ZERO {
            self.status = OrderStatus::ExecutionComplete;
        }
    }

    fn invalid_state(&self) -> OrderError {
        OrderError::InvalidState {
            id: self.id,
            status: self.status,
        }
    }
}

impl SimulatedOrder for SimulatedLimitOrder {
    fn id(&self) -> OrderId {
        self.id
    }

    fn selection_id(&self) -> u64 {
        self.key.selection_id
    }

    fn handicap(&self) -> Decimal {
        self.key.handicap
    }

    fn status(&self) -> OrderStatus {
        self.status
    }

    fn is_simulated(&self) -> bool {
        self.simulated
    }

    fn simulated(&mut self, market_book: &MarketBook, analytics: &RunnerAnalytics) {
        if self.status != OrderStatus::Executable {
            return;
        }

        for (&price, &traded) in &analytics.traded {
            let remaining = self.size_remaining();
            if remaining.is_zero() {
                break;
            }
            if traded <= Decimal::ZERO || !self.crosses(price) {
                continue;
            }
            if traded <= self.piq {
                self.piq -= traded;
                continue;
            }

            let size = (traded - self.piq).min(remaining);
            self.piq = Decimal::ZERO;
            self.fill(self.price, size, market_book.publish_time);
        }

        self.complete_if_filled();
        if self.status == OrderStatus::ExecutionComplete {
            debug!(
                order_id = self.id,
                market_id = %market_book.market_id,
                size_matched = %self.size_matched,
                "Simulated order fully matched"
            );
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
