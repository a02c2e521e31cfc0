//! Simulated matching middleware.
//!
//! ## Tick Processing
//!
//! On every call for a market:
//!
//! 1. Fetch (or lazily create) the market's analytics map and publish the
//!    handle in `market.context`.
//! 2. Update analytics for every active selection.
//! 3. Offer each live, executable, simulated order the analytics for its
//!    selection.
//!
//! Step 3 only starts after step 2 has finished for every selection, so no
//! order sees a mix of this tick's and last tick's analytics.
//!
//! ## Market Lifetime
//!
//! Analytics live in the middleware until
//! [`remove_market`](Middleware::remove_market) is called for the market,
//! independent of whether the market context still holds the handle.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::analytics::{MarketAnalytics, RunnerAnalytics, SharedAnalytics};
use crate::error::{MiddlewareError, Result};
use crate::market::{Blotter, Market};
use crate::middleware::Middleware;
use crate::order::SimulatedOrder;
use crate::types::{MarketBook, OrderStatus, RunnerBook};

/// Middleware that maintains runner analytics and drives simulated fills.
#[derive(Debug, Default)]
pub struct SimulatedMiddleware {
    /// Market ID to that market's analytics
    markets: HashMap<String, SharedAnalytics>,
}

impl SimulatedMiddleware {
    /// Create a middleware with no markets
    pub fn new() -> Self {
        Self::default()
    }

    /// Analytics for every market seen and not yet removed
    pub fn markets(&self) -> &HashMap<String, SharedAnalytics> {
        &self.markets
    }

    /// Analytics handle for one market
    pub fn market_analytics(&self, market_id: &str) -> Option<&SharedAnalytics> {
        self.markets.get(market_id)
    }

    fn analytics_for(&mut self, market_id: &str) -> SharedAnalytics {
        if let Some(analytics) = self.markets.get(market_id) {
            return Arc::clone(analytics);
        }

        debug!(market_id = %market_id, "Tracking analytics for new market");
        let analytics = SharedAnalytics::default();
        self.markets
            .insert(market_id.to_string(), Arc::clone(&analytics));
        analytics
    }

    fn process_runner(market_analytics: &mut MarketAnalytics, runner: &RunnerBook) {
        match market_analytics.entry(runner.key()) {
            Entry::Occupied(mut entry) => entry.get_mut().update(runner),
            Entry::Vacant(entry) => {
                trace!(
                    selection_id = runner.selection_id,
                    handicap = %runner.handicap,
                    "First sighting of selection"
                );
                entry.insert(RunnerAnalytics::new(runner));
            }
        }
    }

    fn process_simulated_orders<O: SimulatedOrder>(
        market_book: &MarketBook,
        blotter: &mut Blotter<O>,
        market_analytics: &MarketAnalytics,
    ) {
        for order in blotter.live_orders_mut() {
            if order.status() != OrderStatus::Executable || !order.is_simulated() {
                continue;
            }
            match market_analytics.get(&order.selection_key()) {
                Some(runner_analytics) => order.simulated(market_book, runner_analytics),
                None => trace!(
                    order_id = order.id(),
                    selection_id = order.selection_id(),
                    "No analytics for selection yet"
                ),
            }
        }
    }
}

impl<O: SimulatedOrder> Middleware<O> for SimulatedMiddleware {
    fn name(&self) -> &'static str {
        "SimulatedMiddleware"
    }

    fn call(&mut self, market: &mut Market<O>) -> Result<()> {
        let shared = self.analytics_for(&market.market_id);
        market.context.set_simulated(Arc::clone(&shared));

        let poisoned = || MiddlewareError::Poisoned {
            market_id: market.market_id.clone(),
        };

        {
            let mut market_analytics = shared.write().map_err(|_| poisoned())?;
            for runner in market.market_book.active_runners() {
                Self::process_runner(&mut market_analytics, runner);
            }
        }

        let market_analytics = shared.read().map_err(|_| poisoned())?;
        Self::process_simulated_orders(&market.market_book, &mut market.blotter, &market_analytics);
        Ok(())
    }

    fn remove_market(&mut self, market: &mut Market<O>) {
        if self.markets.remove(&market.market_id).is_some() {
            debug!(market_id = %market.market_id, "Dropped market analytics");
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::SimulatedLimitOrder;
    use crate::types::{OrderId, PriceSize, RunnerPrices, RunnerStatus, SelectionKey, Side};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Order double recording every `simulated` call it receives
    #[derive(Debug)]
    struct RecordingOrder {
        id: OrderId,
        key: SelectionKey,
        status: OrderStatus,
        simulated: bool,
        /// (publish_time, selection_id, total_matched) seen per call
        calls: Vec<(u64, u64, Decimal)>,
    }

    impl RecordingOrder {
        fn new(id: OrderId, selection_id: u64, status: OrderStatus, simulated: bool) -> Self {
            Self {
                id,
                key: SelectionKey::new(selection_id, dec!(0)),
                status,
                simulated,
                calls: Vec::new(),
            }
        }
    }

    impl SimulatedOrder for RecordingOrder {
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
            self.calls.push((
                market_book.publish_time,
                analytics.runner().selection_id,
                analytics.runner().total_matched,
            ));
        }
    }

    fn book(publish_time: u64, runners: Vec<RunnerBook>) -> MarketBook {
        MarketBook::new("1.23", publish_time).with_runners(runners)
    }

    #[test]
    fn test_new_has_no_markets() {
        assert!(SimulatedMiddleware::new().markets().is_empty());
    }

    #[test]
    fn test_call_publishes_shared_analytics() {
        let mut middleware = SimulatedMiddleware::new();
        let mut market: Market<RecordingOrder> =
            Market::new(book(0, vec![RunnerBook::new(1, dec!(0))]));

        middleware.call(&mut market).unwrap();

        let published = market.context.simulated().unwrap();
        let owned = middleware.market_analytics("1.23").unwrap();
        assert!(Arc::ptr_eq(published, owned));

        let analytics = published.read().unwrap();
        assert_eq!(analytics.len(), 1);
        assert!(analytics.contains_key(&SelectionKey::new(1, dec!(0))));
    }

    #[test]
    fn test_call_skips_inactive_runners() {
        let mut middleware = SimulatedMiddleware::new();
        let mut market: Market<RecordingOrder> = Market::new(book(
            0,
            vec![
                RunnerBook::new(1, dec!(0)),
                RunnerBook::new(2, dec!(0)).with_status(RunnerStatus::Removed),
                RunnerBook::new(3, dec!(0)).with_status(RunnerStatus::Winner),
            ],
        ));

        middleware.call(&mut market).unwrap();

        let analytics = market.context.simulated().unwrap().read().unwrap();
        assert_eq!(analytics.len(), 1);
        assert!(analytics.contains_key(&SelectionKey::new(1, dec!(0))));
    }

    #[test]
    fn test_remove_market() {
        let mut middleware = SimulatedMiddleware::new();
        let mut market: Market<RecordingOrder> = Market::new(book(0, vec![]));
        middleware.call(&mut market).unwrap();
        assert_eq!(middleware.markets().len(), 1);

        middleware.remove_market(&mut market);
        middleware.remove_market(&mut market);

        assert!(middleware.markets().is_empty());
    }

    #[test]
    fn test_process_runner() {
        let mut market_analytics = MarketAnalytics::new();
        let runner = RunnerBook::new(5, dec!(0)).with_total_matched(dec!(10));

        SimulatedMiddleware::process_runner(&mut market_analytics, &runner);
        assert_eq!(market_analytics.len(), 1);
        assert_eq!(market_analytics[&runner.key()].matched, dec!(10));

        SimulatedMiddleware::process_runner(&mut market_analytics, &runner);
        assert_eq!(market_analytics.len(), 1);
        assert_eq!(market_analytics[&runner.key()].matched, dec!(0));
    }

    #[test]
    fn test_process_runner_keys_on_handicap() {
        let mut market_analytics = MarketAnalytics::new();

        SimulatedMiddleware::process_runner(&mut market_analytics, &RunnerBook::new(5, dec!(-1)));
        SimulatedMiddleware::process_runner(&mut market_analytics, &RunnerBook::new(5, dec!(1)));

        assert_eq!(market_analytics.len(), 2);
    }

    #[test]
    fn test_process_simulated_orders() {
        let market_book = book(77, vec![RunnerBook::new(1, dec!(0))]);
        let mut market_analytics = MarketAnalytics::new();
        SimulatedMiddleware::process_runner(&mut market_analytics, &market_book.runners[0]);

        let mut blotter = Blotter::new();
        blotter.insert(RecordingOrder::new(1, 1, OrderStatus::Executable, true)).unwrap();
        blotter.insert(RecordingOrder::new(2, 1, OrderStatus::Pending, true)).unwrap();
        blotter.insert(RecordingOrder::new(3, 1, OrderStatus::Executable, false)).unwrap();

        SimulatedMiddleware::process_simulated_orders(&market_book, &mut blotter, &market_analytics);

        assert_eq!(blotter.get(1).unwrap().calls, vec![(77, 1, dec!(0))]);
        assert!(blotter.get(2).unwrap().calls.is_empty());
        assert!(blotter.get(3).unwrap().calls.is_empty());
    }

    #[test]
    fn test_process_simulated_orders_skips_unknown_selection() {
        let market_book = book(0, vec![]);
        let market_analytics = MarketAnalytics::new();

        let mut blotter = Blotter::new();
        blotter.insert(RecordingOrder::new(1, 99, OrderStatus::Executable, true)).unwrap();

        SimulatedMiddleware::process_simulated_orders(&market_book, &mut blotter, &market_analytics);

        assert!(blotter.get(1).unwrap().calls.is_empty());
    }

    #[test]
    fn test_orders_see_fully_updated_tick() {
        let mut middleware = SimulatedMiddleware::new();
        let mut market: Market<RecordingOrder> = Market::new(book(
            1,
            vec![RunnerBook::new(1, dec!(0)), RunnerBook::new(2, dec!(0))],
        ));
        // Order on the last-listed selection must see this tick's snapshot
        market
            .blotter
            .insert(RecordingOrder::new(1, 2, OrderStatus::Executable, true))
            .unwrap();

        middleware.call(&mut market).unwrap();
        market.update_book(book(
            2,
            vec![
                RunnerBook::new(1, dec!(0)).with_total_matched(dec!(5)),
                RunnerBook::new(2, dec!(0)).with_total_matched(dec!(8)),
            ],
        ));
        middleware.call(&mut market).unwrap();

        assert_eq!(
            market.blotter.get(1).unwrap().calls,
            vec![(1, 2, dec!(0)), (2, 2, dec!(8))]
        );
    }

    #[test]
    fn test_call_fills_simulated_limit_order() {
        let key = SelectionKey::new(1, dec!(0));
        let quiet = RunnerBook::new(1, dec!(0)).with_prices(RunnerPrices {
            available_to_back: vec![PriceSize::new(dec!(2.0), dec!(50))],
            available_to_lay: vec![PriceSize::new(dec!(2.02), dec!(10))],
            traded_volume: vec![PriceSize::new(dec!(2.0), dec!(100))],
        });

        let mut middleware = SimulatedMiddleware::new();
        let mut market: Market<SimulatedLimitOrder> = Market::new(book(1, vec![quiet.clone()]));
        middleware.call(&mut market).unwrap();

        let mut order = SimulatedLimitOrder::new(1, key, Side::Back, dec!(2.02), dec!(20)).unwrap();
        order.place(&quiet, 1).unwrap();
        assert_eq!(order.piq(), dec!(10));
        market.blotter.insert(order).unwrap();

        let mut traded = quiet.clone();
        traded.ex.traded_volume.push(PriceSize::new(dec!(2.02), dec!(25)));
        market.update_book(book(2, vec![traded]));
        middleware.call(&mut market).unwrap();

        let order = market.blotter.get(1).unwrap();
        assert_eq!(order.size_matched(), dec!(15));
        assert_eq!(order.piq(), dec!(0));
        assert_eq!(order.status(), OrderStatus::Executable);
    }
}
