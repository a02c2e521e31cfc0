//! Benchmarks for the simulated middleware tick.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- runner_update
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use market_middleware::types::{PriceSize, RunnerPrices};
use market_middleware::{
    Market, MarketBook, Middleware, RunnerAnalytics, RunnerBook, Side, SimulatedLimitOrder,
    SimulatedMiddleware,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ============================================================================
// HELPER FUNCTIONS - Deterministic book generation
// ============================================================================

/// Ladder price for a tick index, starting at 2.00 in 0.02 steps
fn ladder_price(index: usize) -> Decimal {
    dec!(2.00) + Decimal::from(index as u64) * dec!(0.02)
}

/// Build a runner whose traded ladder has `depth` rungs.
///
/// `bump` adds a random amount to a handful of rungs so consecutive
/// snapshots differ the way a live feed does.
fn make_runner(selection_id: u64, depth: usize, rng: &mut ChaCha8Rng, bump: bool) -> RunnerBook {
    let traded_volume: Vec<PriceSize> = (0..depth)
        .map(|i| {
            let extra = if bump && rng.gen_bool(0.1) {
                Decimal::from(rng.gen_range(1u32..=20))
            } else {
                Decimal::ZERO
            };
            PriceSize::new(ladder_price(i), dec!(100) + extra)
        })
        .collect();
    let total: Decimal = traded_volume.iter().map(|rung| rung.size).sum();

    RunnerBook::new(selection_id, dec!(0))
        .with_total_matched(total)
        .with_prices(RunnerPrices {
            available_to_back: vec![PriceSize::new(ladder_price(depth / 2), dec!(50))],
            available_to_lay: vec![PriceSize::new(ladder_price(depth / 2 + 1), dec!(50))],
            traded_volume,
        })
}

/// Build a market book with `runners` selections, each with a `depth` ladder
fn make_book(runners: u64, depth: usize, publish_time: u64, seed: u64) -> MarketBook {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let runners = (1..=runners)
        .map(|id| make_runner(id, depth, &mut rng, publish_time > 0))
        .collect();
    MarketBook::new("1.200000000", publish_time).with_runners(runners)
}

/// Market primed with one tick of analytics and `orders` resting back orders
fn primed_market(runners: u64, orders: u64) -> (SimulatedMiddleware, Market<SimulatedLimitOrder>) {
    let book = make_book(runners, 30, 0, 7);
    let mut middleware = SimulatedMiddleware::new();
    let mut market = Market::new(book.clone());
    middleware.call(&mut market).unwrap();

    for id in 1..=orders {
        let runner = &book.runners[(id % runners) as usize];
        let mut order =
            SimulatedLimitOrder::new(id, runner.key(), Side::Back, dec!(2.2), dec!(1000)).unwrap();
        order.place(runner, 0).unwrap();
        market.blotter.insert(order).unwrap();
    }

    (middleware, market)
}

// ============================================================================
// BENCHMARK: Runner Update
// ============================================================================

fn bench_runner_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("runner_update");
    group.measurement_time(Duration::from_secs(5));

    for depth in [10usize, 100, 350] {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let previous = make_runner(1, depth, &mut rng, false);
        let next = make_runner(1, depth, &mut rng, true);

        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, _| {
            b.iter_batched(
                || RunnerAnalytics::new(&previous),
                |mut analytics| {
                    analytics.update(black_box(&next));
                    analytics
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Full Middleware Tick
// ============================================================================

fn bench_middleware_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("middleware_call");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(100);

    for (runners, orders) in [(2u64, 0u64), (10, 0), (10, 100), (30, 1_000)] {
        let next = make_book(runners, 30, 50, 11);

        group.throughput(Throughput::Elements(runners + orders));
        group.bench_with_input(
            BenchmarkId::new("runners_orders", format!("{}x{}", runners, orders)),
            &next,
            |b, next| {
                b.iter_batched(
                    || {
                        let (middleware, mut market) = primed_market(runners, orders);
                        market.update_book(next.clone());
                        (middleware, market)
                    },
                    |(mut middleware, mut market)| {
                        middleware.call(black_box(&mut market)).unwrap();
                        (middleware, market)
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// CRITERION SETUP
// ============================================================================

criterion_group!(benches, bench_runner_update, bench_middleware_call);

criterion_main!(benches);
