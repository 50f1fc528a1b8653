//! Resting Book - Binary Entry Point
//!
//! Builds a book from `RESTING_BOOK_*` environment settings, replays a short
//! sequence of placements, amendments and cancels, and prints the resulting
//! top of book. Set `RUST_LOG=debug` to see every mutation.

use std::process::ExitCode;

use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use resting_book::types::price::from_ticks;
use resting_book::{AnyBook, BookConfig, Order, Side};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match BookConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut book = AnyBook::from_config(&config);
    if let Err(err) = run(&mut book) {
        error!(error = %err, "replay failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(book: &mut AnyBook) -> resting_book::BookResult<()> {
    // 0.01 tick
    let tick = Decimal::new(1, 2);
    let show = |price: resting_book::Price| {
        from_ticks(price, tick).unwrap_or_else(|| price.to_string())
    };

    for order in [
        Order::new(1, 100, 5),
        Order::new(2, 99, 7),
        Order::new(3, 101, 1),
        Order::new(4, 102, -2),
        Order::new(5, 98, -4),
    ] {
        book.place(order)?;
    }
    book.modify(Order::new(2, 101, 7))?;
    book.cancel(5)?;
    book.validate()?;

    println!("===========================================");
    println!("  Resting Book ({} strategy)", book.strategy());
    println!("===========================================");
    match book.best_bid() {
        Some(bid) => println!("  Best bid: #{} {} x {}", bid.id, show(bid.price), bid.size()),
        None => println!("  Best bid: none"),
    }
    match book.best_ask() {
        Some(ask) => println!("  Best ask: #{} {} x {}", ask.id, show(ask.price), ask.size()),
        None => println!("  Best ask: none"),
    }
    for side in [Side::Bid, Side::Ask] {
        for level in book.depth(side, 5) {
            println!(
                "  {:<4} {:>10} {:>4} orders {:>6} size",
                side.to_string(),
                show(level.price),
                level.order_count,
                level.total_size
            );
        }
    }

    info!(
        resting = book.len(),
        state_root = %hex::encode(book.state_root()),
        "replay complete"
    );
    Ok(())
}
