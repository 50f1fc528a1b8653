//! Price level: the identifiers resting at one exact price on one side.
//!
//! ## Queue Structure
//!
//! ```text
//! ids[0] (oldest) , ids[1] , ... , ids[n-1] (newest)
//! ```
//!
//! - New identifiers are appended at the back
//! - `best()` reads the front
//! - Removal comes in two flavours:
//!   - [`PriceLevel::remove`]: shifts the tail down, keeps arrival order
//!   - [`PriceLevel::swap_remove`]: moves the last id into the hole, O(1)
//!     after the scan but arrival order is lost
//!
//! Levels only hold identifiers. The order records themselves live in the
//! registry.

use crate::types::{OrderId, Price};

/// A price level containing order identifiers at a single price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price for this level (tick units)
    pub price: Price,

    /// Resting identifiers, front = served first
    ids: Vec<OrderId>,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self { price, ids: Vec::new() }
    }

    /// Create a level holding a single identifier
    pub fn with_order(price: Price, id: OrderId) -> Self {
        Self { price, ids: vec![id] }
    }

    /// Check if the price level is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of orders at this price level
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Append an identifier at the back of the queue
    #[inline]
    pub fn push_back(&mut self, id: OrderId) {
        self.ids.push(id);
    }

    /// First identifier in the queue
    #[inline]
    pub fn front(&self) -> Option<OrderId> {
        self.ids.first().copied()
    }

    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.ids.contains(&id)
    }

    /// Identifiers in queue order
    #[inline]
    pub fn ids(&self) -> &[OrderId] {
        &self.ids
    }

    /// Remove `id`, keeping the remaining identifiers in arrival order.
    ///
    /// Returns `false` if `id` is not a member.
    pub fn remove(&mut self, id: OrderId) -> bool {
        match self.ids.iter().position(|&member| member == id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove `id` by swapping the last identifier into its slot.
    ///
    /// Returns `false` if `id` is not a member.
    pub fn swap_remove(&mut self, id: OrderId) -> bool {
        match self.ids.iter().position(|&member| member == id) {
            Some(pos) => {
                self.ids.swap_remove(pos);
                true
            }
            None => false,
        }
    }
}

/// Aggregate view of one level, as returned by depth queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    /// Level price (tick units)
    pub price: Price,

    /// Number of resting orders
    pub order_count: usize,

    /// Sum of resting sizes (absolute quantities)
    pub total_size: u64,
}

// ============================================================================
// Unit Tests
// ============================================================================
