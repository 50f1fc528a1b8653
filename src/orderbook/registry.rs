//! Order registry: the canonical record of every resting order.
//!
//! ## Storage
//!
//! Per slab docs (https://docs.rs/slab/0.4.11):
//! - `Slab::with_capacity(n)` pre-allocates n slots
//! - Keys are reused after removal
//! - O(1) insert, remove, and lookup
//!
//! Records live in the slab; a `HashMap` maps each order id to its slab key.
//! The registry never touches the side indexes.

use std::collections::HashMap;

use slab::Slab;

use crate::error::{BookError, BookResult};
use crate::types::{Order, OrderId};

/// Resting order records keyed by identifier.
#[derive(Debug, Default)]
pub struct OrderRegistry {
    /// Pre-allocated record storage
    records: Slab<Order>,

    /// Order ID to slab key mapping
    index: HashMap<OrderId, usize>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with pre-allocated capacity
    ///
    /// # Example
    ///
    /// ```
    /// use resting_book::orderbook::OrderRegistry;
    ///
    /// let registry = OrderRegistry::with_capacity(1_000);
    /// assert!(registry.capacity() >= 1_000);
    /// assert!(registry.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// Number of resting records
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.index.contains_key(&id)
    }

    /// Store a new record.
    ///
    /// # Errors
    ///
    /// [`BookError::DuplicateOrder`] if the id already rests.
    pub fn insert(&mut self, order: Order) -> BookResult<()> {
        if self.index.contains_key(&order.id) {
            return Err(BookError::DuplicateOrder(order.id));
        }
        let key = self.records.insert(order);
        self.index.insert(order.id, key);
        Ok(())
    }

    /// Replace the record for `order.id` in place, returning the old record.
    ///
    /// # Errors
    ///
    /// [`BookError::OrderNotFound`] if the id is not resting.
    pub fn update(&mut self, order: Order) -> BookResult<Order> {
        let key = *self
            .index
            .get(&order.id)
            .ok_or(BookError::OrderNotFound(order.id))?;
        let slot = self
            .records
            .get_mut(key)
            .ok_or(BookError::OrderNotFound(order.id))?;
        Ok(std::mem::replace(slot, order))
    }

    /// Remove and return the record for `id`.
    ///
    /// # Errors
    ///
    /// [`BookError::OrderNotFound`] if the id is not resting.
    pub fn remove(&mut self, id: OrderId) -> BookResult<Order> {
        let key = self.index.remove(&id).ok_or(BookError::OrderNotFound(id))?;
        self.records
            .try_remove(key)
            .ok_or(BookError::OrderNotFound(id))
    }

    /// Look up the record for `id`
    #[inline]
    pub fn lookup(&self, id: OrderId) -> Option<&Order> {
        self.index.get(&id).and_then(|&key| self.records.get(key))
    }

    /// Iterate over all resting records in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.records.iter().map(|(_, order)| order)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
