//! Market Middleware - Binary Entry Point
//!
//! Replays a short synthetic stream for one market through the configured
//! middleware chain and reports how a simulated back order was matched.
//!
//! Configuration is read from `config/default.toml` (optional) and
//! `MIDDLEWARE__*` environment variables.

use market_middleware::logging::{init_logging, LogConfig};
use market_middleware::types::{PriceSize, RunnerPrices};
use market_middleware::{
    Config, Market, MarketBook, MiddlewareChain, RunnerBook, SelectionKey, Side,
    SimulatedLimitOrder,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

const MARKET_ID: &str = "1.234567890";
const SELECTION_ID: u64 = 47972;
const TICKS: u64 = 8;

/// Synthetic book: 6 more traded at 3.0 and 2 more at 3.05 every tick.
fn synthetic_book(tick: u64) -> MarketBook {
    let n = Decimal::from(tick);
    let runner = RunnerBook::new(SELECTION_ID, dec!(0))
        .with_total_matched(dec!(500) + n * dec!(8))
        .with_prices(RunnerPrices {
            available_to_back: vec![PriceSize::new(dec!(2.98), dec!(40))],
            available_to_lay: vec![PriceSize::new(dec!(3.0), dec!(12))],
            traded_volume: vec![
                PriceSize::new(dec!(3.0), dec!(400) + n * dec!(6)),
                PriceSize::new(dec!(3.05), dec!(100) + n * dec!(2)),
            ],
        });

    MarketBook::new(MARKET_ID, 1_703_577_600_000 + tick * 50).with_runners(vec![runner])
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::load("config/default.toml")?;
    init_logging(LogConfig::from(&config.logging))?;

    let mut chain: MiddlewareChain<SimulatedLimitOrder> = MiddlewareChain::from_config(&config);
    info!(middlewares = ?chain.names(), "Middleware chain ready");

    let mut market = Market::new(synthetic_book(0));
    chain.add_market(&mut market);
    chain.call(&mut market)?;

    let key = SelectionKey::new(SELECTION_ID, dec!(0));
    let mut order = SimulatedLimitOrder::new(1, key, Side::Back, dec!(3.0), dec!(20))?;
    if let Some(runner) = market.market_book.runner(key) {
        order.place(runner, market.market_book.publish_time)?;
    }
    market.blotter.insert(order)?;

    for tick in 1..=TICKS {
        market.update_book(synthetic_book(tick));
        chain.call(&mut market)?;
    }

    println!("===========================================");
    println!("  Market Middleware - simulated replay");
    println!("===========================================");
    if let Some(order) = market.blotter.get(1) {
        println!("Order {} {:?} @ {}", 1, order.side(), order.price());
        println!("  Matched:   {}", order.size_matched());
        println!("  Remaining: {}", order.size_remaining());
        for fill in order.fills() {
            println!("  Fill {} @ {} (t={})", fill.size, fill.price, fill.publish_time);
        }
    }

    chain.remove_market(&mut market);
    Ok(())
}
