//! # Resting Book
//!
//! In-memory index of resting limit orders for a single instrument.
//!
//! ## Architecture
//!
//! - **Types**: Order (id, price, signed quantity) and Side
//! - **OrderBook**: registry plus one price-ordered side index per side
//! - **Config**: strategy and capacity selection
//!
//! ## Design Principles
//!
//! 1. **Not a matching engine**: orders rest; the book never crosses or fills
//! 2. **All-or-nothing mutations**: a failed call leaves the book untouched
//! 3. **Interchangeable strategies**: tree-of-levels or sorted-array-of-levels
//! 4. **Single owner**: no internal locking, no global state
//!
//! ## Example
//!
//! ```
//! use resting_book::{Order, TreeBook};
//!
//! let mut book = TreeBook::new();
//! book.place(Order::new(1, 100, 5)).unwrap();
//! book.place(Order::new(2, 99, 7)).unwrap();
//! book.place(Order::new(3, 101, 1)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(Order::new(3, 101, 1)));
//!
//! book.modify(Order::new(2, 102, 7)).unwrap();
//! assert_eq!(book.best_bid().map(|o| o.id), Some(2));
//!
//! book.cancel(2).unwrap();
//! assert_eq!(book.best_bid().map(|o| o.id), Some(3));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, tick conversion
pub mod types;

/// Resting order index: registry, side indexes, facade
pub mod orderbook;

/// Error type shared by every book operation
pub mod error;

/// Strategy and capacity selection
pub mod config;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{BookConfig, ConfigError, IndexStrategy};
pub use error::{BookError, BookResult};
pub use orderbook::{AnyBook, ArrayBook, ArraySide, OrderBook, SideIndex, TreeBook, TreeSide};
pub use types::{Order, OrderId, Price, Quantity, Side};
