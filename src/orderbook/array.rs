//! Array-indexed side: price levels in a sorted `Vec`.
//!
//! ## Layout
//!
//! ```text
//! levels[0] (best) , levels[1] , ... , levels[L-1] (worst)
//! ```
//!
//! Levels are kept sorted by price priority for the side, so the best level is
//! always `levels[0]`. Lookups binary search on price.
//!
//! ## Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Add order, existing level | O(log L) |
//! | Add order, new level | O(log L + L) shift |
//! | Remove order | O(log L + n), plus O(L) shift if the level empties |
//! | Best level | O(1) |
//!
//! Removal inside a level uses swap-remove: the last identifier fills the hole.
//! Arrival order among the remaining identifiers of that level is therefore
//! not preserved.

use tracing::trace;

use crate::error::{BookError, BookResult};
use crate::orderbook::side::{ensure_side, SideIndex};
use crate::orderbook::PriceLevel;
use crate::types::{Order, OrderId, Price, Side};

/// One side of the book backed by a priority-sorted vector of levels.
#[derive(Debug, Clone)]
pub struct ArraySide {
    side: Side,

    /// Levels sorted best-first
    levels: Vec<PriceLevel>,

    /// Total identifiers across all levels
    order_count: usize,
}

impl ArraySide {
    /// `Ok(pos)` if a level at `price` exists, `Err(pos)` with the sorted
    /// insertion point otherwise.
    #[inline]
    fn search(&self, price: Price) -> Result<usize, usize> {
        let side = self.side;
        self.levels
            .binary_search_by(|level| side.priority(level.price, price))
    }
}

impl SideIndex for ArraySide {
    fn new(side: Side) -> Self {
        Self {
            side,
            levels: Vec::new(),
            order_count: 0,
        }
    }

    #[inline]
    fn side(&self) -> Side {
        self.side
    }

    fn add(&mut self, order: &Order) -> BookResult<()> {
        ensure_side(self.side, order)?;

        match self.search(order.price) {
            Ok(pos) => self.levels[pos].push_back(order.id),
            Err(pos) => {
                trace!(side = %self.side, price = order.price, pos, "new array level");
                self.levels
                    .insert(pos, PriceLevel::with_order(order.price, order.id));
            }
        }
        self.order_count += 1;
        Ok(())
    }

    fn remove(&mut self, price: Price, id: OrderId) -> BookResult<()> {
        let side = self.side;
        let pos = self
            .search(price)
            .map_err(|_| BookError::LevelNotFound { side, price })?;

        let level = &mut self.levels[pos];
        if !level.swap_remove(id) {
            return Err(BookError::NotInLevel { side, price, id });
        }
        self.order_count -= 1;

        if level.is_empty() {
            self.levels.remove(pos);
            trace!(side = %side, price, "array level pruned");
        }
        Ok(())
    }

    fn best(&self) -> Option<(Price, OrderId)> {
        let level = self.levels.first()?;
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
        self.search(price)
            .is_ok_and(|pos| self.levels[pos].contains(id))
    }

    fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        Box::new(self.levels.iter())
    }

    fn clear(&mut self) {
        self.levels.clear();
        self.order_count = 0;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
