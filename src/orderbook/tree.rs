//! Tree-indexed side: price levels in a `BTreeMap`.
//!
//! ## Price Ordering
//!
//! The map is keyed by raw price in ascending order for both sides. Priority
//! order is recovered at read time:
//!
//! - **Bids**: iterate from the back (best bid = highest price)
//! - **Asks**: iterate from the front (best ask = lowest price)
//!
//! ## Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order | O(log L) |
//! | Remove order | O(log L + n) |
//! | Best level | O(log L) |
//!
//! L = distinct levels on the side, n = orders at the touched level. Removal
//! within a level keeps arrival order, so this strategy gives strict
//! price-time priority.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{BookError, BookResult};
use crate::orderbook::side::{ensure_side, SideIndex};
use crate::orderbook::PriceLevel;
use crate::types::{Order, OrderId, Price, Side};

/// One side of the book backed by an ordered map of levels.
#[derive(Debug, Clone)]
pub struct TreeSide {
    side: Side,

    /// Price -> level, ascending by price
    levels: BTreeMap<Price, PriceLevel>,

    /// Total identifiers across all levels
    order_count: usize,
}

impl TreeSide {
    /// Best level, honouring the side's price direction
    fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            Side::Bid => self.levels.values().next_back(),
            Side::Ask => self.levels.values().next(),
        }
    }
}

impl SideIndex for TreeSide {
    fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            order_count: 0,
        }
    }

    #[inline]
    fn side(&self) -> Side {
        self.side
    }

    fn add(&mut self, order: &Order) -> BookResult<()> {
        ensure_side(self.side, order)?;

        match self.levels.entry(order.price) {
            Entry::Occupied(mut level) => level.get_mut().push_back(order.id),
            Entry::Vacant(slot) => {
                trace!(side = %self.side, price = order.price, "new tree level");
                slot.insert(PriceLevel::with_order(order.price, order.id));
            }
        }
        self.order_count += 1;
        Ok(())
    }

    fn remove(&mut self, price: Price, id: OrderId) -> BookResult<()> {
        let side = self.side;
        let mut level = match self.levels.entry(price) {
            Entry::Occupied(level) => level,
            Entry::Vacant(_) => return Err(BookError::LevelNotFound { side, price }),
        };

        if !level.get_mut().remove(id) {
            return Err(BookError::NotInLevel { side, price, id });
        }
        self.order_count -= 1;

        // Remove empty price levels
        if level.get().is_empty() {
            level.remove();
            trace!(side = %side, price, "tree level pruned");
        }
        Ok(())
    }

    fn best(&self) -> Option<(Price, OrderId)> {
        let level = self.best_level()?;
        level.front().map(|id| (level.price, id))
    }

    #[inline]
    fn level_count(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    fn order_count(&self) -> usize {
        self.order_count
    }

    fn contains(&self, price: Price, id: OrderId) -> bool {
        self.levels
            .get(&price)
            .is_some_and(|level| level.contains(id))
    }

    fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Bid => Box::new(self.levels.values().rev()),
            Side::Ask => Box::new(self.levels.values()),
        }
    }

    fn clear(&mut self) {
        self.levels.clear();
        self.order_count = 0;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
