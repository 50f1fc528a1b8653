//! Strategy chosen at runtime from [`BookConfig`].
//!
//! [`OrderBook`] is generic over its side index, which is what callers that
//! know their strategy at compile time should use. `AnyBook` wraps both
//! instantiations so a deployment can pick one from configuration.

use tracing::info;

use crate::config::{BookConfig, IndexStrategy};
use crate::error::BookResult;
use crate::orderbook::{ArrayBook, LevelSummary, TreeBook};
use crate::types::{Order, OrderId, Price, Side};

/// Book whose side index strategy is picked at runtime.
#[derive(Debug)]
pub enum AnyBook {
    Tree(TreeBook),
    Array(ArrayBook),
}

macro_rules! dispatch {
    ($self:expr, $book:ident => $body:expr) => {
        match $self {
            AnyBook::Tree($book) => $body,
            AnyBook::Array($book) => $body,
        }
    };
}

impl AnyBook {
    /// Build an empty book as described by `config`
    ///
    /// # Example
    ///
    /// ```
    /// use resting_book::config::{BookConfig, IndexStrategy};
    /// use resting_book::orderbook::AnyBook;
    /// use resting_book::types::Order;
    ///
    /// let config = BookConfig::default().with_strategy(IndexStrategy::Array);
    /// let mut book = AnyBook::from_config(&config);
    /// assert_eq!(book.strategy(), IndexStrategy::Array);
    ///
    /// book.place(Order::new(1, 100, 5)).unwrap();
    /// assert_eq!(book.best_bid().map(|o| o.id), Some(1));
    /// ```
    pub fn from_config(config: &BookConfig) -> Self {
        info!(
            strategy = %config.strategy,
            capacity = config.order_capacity,
            "creating resting book"
        );
        match config.strategy {
            IndexStrategy::Tree => AnyBook::Tree(TreeBook::with_capacity(config.order_capacity)),
            IndexStrategy::Array => AnyBook::Array(ArrayBook::with_capacity(config.order_capacity)),
        }
    }

    pub fn strategy(&self) -> IndexStrategy {
        match self {
            AnyBook::Tree(_) => IndexStrategy::Tree,
            AnyBook::Array(_) => IndexStrategy::Array,
        }
    }

    pub fn place(&mut self, order: Order) -> BookResult<()> {
        dispatch!(self, book => book.place(order))
    }

    pub fn modify(&mut self, order: Order) -> BookResult<()> {
        dispatch!(self, book => book.modify(order))
    }

    pub fn cancel(&mut self, id: OrderId) -> BookResult<Order> {
        dispatch!(self, book => book.cancel(id))
    }

    pub fn best_bid(&self) -> Option<Order> {
        dispatch!(self, book => book.best_bid())
    }

    pub fn best_ask(&self) -> Option<Order> {
        dispatch!(self, book => book.best_ask())
    }

    pub fn best_bid_checked(&self) -> BookResult<Option<Order>> {
        dispatch!(self, book => book.best_bid_checked())
    }

    pub fn best_ask_checked(&self) -> BookResult<Option<Order>> {
        dispatch!(self, book => book.best_ask_checked())
    }

    pub fn spread(&self) -> Option<Price> {
        dispatch!(self, book => book.spread())
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        dispatch!(self, book => book.get(id))
    }

    pub fn len(&self) -> usize {
        dispatch!(self, book => book.len())
    }

    pub fn is_empty(&self) -> bool {
        dispatch!(self, book => book.is_empty())
    }

    pub fn depth(&self, side: Side, max_levels: usize) -> Vec<LevelSummary> {
        dispatch!(self, book => book.depth(side, max_levels))
    }

    pub fn validate(&self) -> BookResult<()> {
        dispatch!(self, book => book.validate())
    }

    pub fn state_root(&self) -> [u8; 32] {
        dispatch!(self, book => book.state_root())
    }

    pub fn clear(&mut self) {
        dispatch!(self, book => book.clear())
    }
}
