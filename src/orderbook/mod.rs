//! Resting order index.
//!
//! ## Architecture
//!
//! - **Registry**: canonical records, slab-backed, keyed by order id
//! - **Side index**: per side, price levels ordered by price priority
//! - **Facade**: [`OrderBook`] keeps the two consistent
//!
//! ## Components
//!
//! - [`OrderRegistry`]: id -> record storage
//! - [`PriceLevel`]: identifiers resting at one price
//! - [`SideIndex`]: contract shared by the level strategies
//! - [`TreeSide`]: levels in a `BTreeMap`
//! - [`ArraySide`]: levels in a sorted `Vec`
//! - [`OrderBook`]: the facade, generic over the strategy
//! - [`AnyBook`]: strategy picked at runtime
//!
//! ## Choosing a Strategy
//!
//! | | Tree | Array |
//! |---|------|-------|
//! | New level | O(log L) | O(log L + L) |
//! | Erase level | O(log L) | O(L) |
//! | Best level | O(log L) | O(1) |
//! | FIFO inside a level | kept | lost on removal |
//!
//! Array wins when the number of distinct prices is small; Tree scales to wide
//! books.
//!
//! ## Example
//!
//! ```
//! use resting_book::orderbook::{ArrayBook, TreeBook};
//! use resting_book::types::Order;
//!
//! let mut tree = TreeBook::with_capacity(64);
//! let mut array = ArrayBook::with_capacity(64);
//!
//! for order in [Order::new(1, 100, 5), Order::new(2, 99, 7), Order::new(3, 101, 1)] {
//!     tree.place(order).unwrap();
//!     array.place(order).unwrap();
//! }
//!
//! assert_eq!(tree.best_bid(), Some(Order::new(3, 101, 1)));
//! assert_eq!(tree.best_bid(), array.best_bid());
//! ```

pub mod any;
pub mod array;
pub mod book;
pub mod level;
pub mod registry;
pub mod side;
pub mod tree;

pub use any::AnyBook;
pub use array::ArraySide;
pub use book::{ArrayBook, OrderBook, TreeBook};
pub use level::{LevelSummary, PriceLevel};
pub use registry::OrderRegistry;
pub use side::SideIndex;
pub use tree::TreeSide;
