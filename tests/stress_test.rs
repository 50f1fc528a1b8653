//! Stress tests for the resting book.
//!
//! These tests verify:
//! 1. Both strategies stay consistent under long random workloads
//! 2. Tree and Array books agree with each other and with a naive model
//! 3. Determinism: same seed = same state root
//! 4. Throughput is reported for each strategy
//!
//! ## Running Stress Tests
//!
//! ```bash
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::collections::HashMap;
use std::time::Instant;

use resting_book::{ArrayBook, BookError, Order, OrderBook, OrderId, Price, Side, SideIndex, TreeBook};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Identifier pool; small enough that duplicates and stale ids come up often
const ID_POOL: u64 = 2_000;

/// Mid price for generated orders (ticks)
const MID_PRICE: Price = 10_000;

/// Half-width of the generated price band (ticks)
const PRICE_BAND: Price = 50;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Op {
    Place(Order),
    Modify(Order),
    Cancel(OrderId),
}

fn random_order(rng: &mut ChaCha8Rng) -> Order {
    let id = rng.gen_range(1..=ID_POOL);
    let price = MID_PRICE + rng.gen_range(-PRICE_BAND..=PRICE_BAND);
    let size: i64 = rng.gen_range(1..=100);
    let quantity = if rng.gen_bool(0.5) { size } else { -size };
    Order::new(id, price, quantity)
}

/// Generate a deterministic operation stream. Same seed = same ops.
fn generate_ops(count: usize, seed: u64) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ops = Vec::with_capacity(count);

    for _ in 0..count {
        let roll: f64 = rng.gen();
        let op = if roll < 0.5 {
            Op::Place(random_order(&mut rng))
        } else if roll < 0.75 {
            let mut order = random_order(&mut rng);
            // Some amendments keep the price to hit the in-place path,
            // some zero the quantity to hit the cancel path
            if rng.gen_bool(0.1) {
                order.quantity = 0;
            }
            Op::Modify(order)
        } else {
            Op::Cancel(rng.gen_range(0..=ID_POOL))
        };
        ops.push(op);
    }
    ops
}

fn apply<S: SideIndex>(book: &mut OrderBook<S>, op: Op) -> Result<(), BookError> {
    match op {
        Op::Place(order) => book.place(order),
        Op::Modify(order) => book.modify(order),
        Op::Cancel(id) => book.cancel(id).map(|_| ()),
    }
}

/// Naive reference: a flat map of resting orders.
#[derive(Default)]
struct Model {
    orders: HashMap<OrderId, Order>,
}

impl Model {
    fn apply(&mut self, op: Op) -> bool {
        match op {
            Op::Place(order) => {
                if order.quantity == 0 || order.id == 0 || self.orders.contains_key(&order.id) {
                    return false;
                }
                self.orders.insert(order.id, order);
                true
            }
            Op::Modify(order) if order.quantity == 0 => self.orders.remove(&order.id).is_some(),
            Op::Modify(order) => match self.orders.get_mut(&order.id) {
                Some(slot) => {
                    *slot = order;
                    true
                }
                None => false,
            },
            Op::Cancel(id) => self.orders.remove(&id).is_some(),
        }
    }

    fn best_price(&self, side: Side) -> Option<Price> {
        let prices = self
            .orders
            .values()
            .filter(|o| o.side() == Some(side))
            .map(|o| o.price);
        match side {
            Side::Bid => prices.max(),
            Side::Ask => prices.min(),
        }
    }
}

fn run_sequence<S: SideIndex>(seed: u64, count: usize) -> OrderBook<S> {
    let mut book = OrderBook::<S>::with_capacity(ID_POOL as usize);
    for op in generate_ops(count, seed) {
        let _ = apply(&mut book, op);
    }
    book
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Drive both strategies and the model in lockstep and compare after every op.
#[test]
fn stress_strategies_match_model() {
    const OP_COUNT: usize = 20_000;

    let mut tree = TreeBook::with_capacity(ID_POOL as usize);
    let mut array = ArrayBook::with_capacity(ID_POOL as usize);
    let mut model = Model::default();

    for (step, op) in generate_ops(OP_COUNT, 42).into_iter().enumerate() {
        let tree_result = apply(&mut tree, op);
        let array_result = apply(&mut array, op);
        let model_ok = model.apply(op);

        assert_eq!(tree_result, array_result, "step {step}: {op:?}");
        assert_eq!(tree_result.is_ok(), model_ok, "step {step}: {op:?} -> {tree_result:?}");
        if let Err(err) = &tree_result {
            assert!(!err.is_inconsistency(), "step {step}: {err}");
        }

        for side in [Side::Bid, Side::Ask] {
            let expected = model.best_price(side);
            let tree_best = tree.best_checked(side).unwrap().map(|o| o.price);
            let array_best = array.best_checked(side).unwrap().map(|o| o.price);
            assert_eq!(tree_best, expected, "step {step}: tree {side}");
            assert_eq!(array_best, expected, "step {step}: array {side}");
        }
        assert_eq!(tree.len(), model.orders.len());
        assert_eq!(array.len(), model.orders.len());

        if step % 1_000 == 0 {
            tree.validate().unwrap();
            array.validate().unwrap();
        }
    }

    tree.validate().unwrap();
    array.validate().unwrap();
    assert_eq!(tree.state_root(), array.state_root());
    assert_eq!(tree.bid_levels(), array.bid_levels());
    assert_eq!(tree.ask_levels(), array.ask_levels());
}

/// Registry count equals the summed level populations on both sides.
#[test]
fn stress_population_matches_registry() {
    for seed in [1, 2, 3] {
        let tree = run_sequence::<resting_book::TreeSide>(seed, 10_000);
        let array = run_sequence::<resting_book::ArraySide>(seed, 10_000);

        for (name, len, populations) in [
            (
                "tree",
                tree.len(),
                tree.bids().levels().chain(tree.asks().levels()).map(|l| l.len()).sum::<usize>(),
            ),
            (
                "array",
                array.len(),
                array.bids().levels().chain(array.asks().levels()).map(|l| l.len()).sum::<usize>(),
            ),
        ] {
            assert_eq!(len, populations, "seed {seed}: {name}");
        }
        assert_eq!(tree.bid_count() + tree.ask_count(), tree.len());
        assert_eq!(array.bid_count() + array.ask_count(), array.len());
    }
}

/// Verify determinism: same sequence produces identical state root.
#[test]
fn verify_determinism() {
    const TEST_COUNT: usize = 10_000;
    const SEED: u64 = 12345;

    let root1 = run_sequence::<resting_book::TreeSide>(SEED, TEST_COUNT).state_root();
    let root2 = run_sequence::<resting_book::TreeSide>(SEED, TEST_COUNT).state_root();
    let root_array = run_sequence::<resting_book::ArraySide>(SEED, TEST_COUNT).state_root();

    println!("  Run 1 state root: {}", hex::encode(root1));
    println!("  Run 2 state root: {}", hex::encode(root2));
    println!("  Array state root: {}", hex::encode(root_array));

    assert_eq!(root1, root2, "State roots must match for determinism");
    assert_eq!(root1, root_array, "Strategies must agree on the resting set");

    let root3 = run_sequence::<resting_book::TreeSide>(SEED + 1, TEST_COUNT).state_root();
    assert_ne!(root1, root3, "Different seeds should produce different roots");
}

/// Place a batch and cancel it all; both sides must end empty.
#[test]
fn stress_place_then_cancel_all() {
    const ORDER_COUNT: u64 = 1_000;

    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let orders: Vec<Order> = (1..=ORDER_COUNT)
        .map(|id| {
            let price = rng.gen_range(90..=110);
            let size: i64 = rng.gen_range(1..=10);
            Order::new(id, price, if rng.gen_bool(0.5) { size } else { -size })
        })
        .collect();

    let mut tree = TreeBook::with_capacity(ORDER_COUNT as usize);
    let mut array = ArrayBook::with_capacity(ORDER_COUNT as usize);

    let start = Instant::now();
    for &order in &orders {
        tree.place(order).unwrap();
        array.place(order).unwrap();
    }
    assert!(tree.bid_levels() <= 21 && array.bid_levels() <= 21);
    tree.validate().unwrap();
    array.validate().unwrap();

    for order in &orders {
        assert_eq!(tree.cancel(order.id), Ok(*order));
        assert_eq!(array.cancel(order.id), Ok(*order));
    }
    println!("  place+cancel {} orders x2: {:.2?}", ORDER_COUNT, start.elapsed());

    for book_empty in [
        tree.best_bid().is_none() && tree.best_ask().is_none(),
        array.best_bid().is_none() && array.best_ask().is_none(),
    ] {
        assert!(book_empty);
    }
    assert_eq!(tree.bid_levels() + tree.ask_levels(), 0);
    assert_eq!(array.bid_levels() + array.ask_levels(), 0);
}

/// Test varying load sizes and report throughput per strategy.
#[test]
fn stress_scaling() {
    println!("{:>8} {:>10} {:>12} {:>12}", "Strategy", "Ops", "Time", "Ops/sec");

    for &size in &[1_000usize, 10_000, 50_000] {
        let ops = generate_ops(size, 7);

        let mut tree = TreeBook::with_capacity(ID_POOL as usize);
        let start = Instant::now();
        for &op in &ops {
            let _ = apply(&mut tree, op);
        }
        let tree_elapsed = start.elapsed();

        let mut array = ArrayBook::with_capacity(ID_POOL as usize);
        let start = Instant::now();
        for &op in &ops {
            let _ = apply(&mut array, op);
        }
        let array_elapsed = start.elapsed();

        for (name, elapsed) in [("tree", tree_elapsed), ("array", array_elapsed)] {
            println!(
                "{:>8} {:>10} {:>12.2?} {:>12.0}",
                name,
                size,
                elapsed,
                size as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
            );
        }

        assert_eq!(tree.state_root(), array.state_root());
    }
}
