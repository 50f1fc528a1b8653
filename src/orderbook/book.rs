//! Order book facade: registry plus one side index per side.
//!
//! ## Architecture
//!
//! - **Registry**: canonical order records, keyed by id
//! - **Bids / Asks**: one [`SideIndex`] each, holding identifiers per level
//!
//! Every mutation goes registry-first on the way in and index-first on the way
//! out, and is undone if the second step fails, so a failed call leaves the
//! book exactly as it found it. Queries read the side index for the winning
//! identifier and dereference it through the registry.
//!
//! ## Example
//!
//! ```
//! use resting_book::orderbook::TreeBook;
//! use resting_book::types::Order;
//!
//! let mut book = TreeBook::new();
//!
//! book.place(Order::new(1, 100, 5)).unwrap();
//! book.place(Order::new(2, 101, -3)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(Order::new(1, 100, 5)));
//! assert_eq!(book.best_ask(), Some(Order::new(2, 101, -3)));
//! assert_eq!(book.spread(), Some(1));
//! ```

use std::collections::HashSet;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{BookError, BookResult};
use crate::orderbook::{ArraySide, LevelSummary, OrderRegistry, SideIndex, TreeSide};
use crate::types::{Order, OrderId, Price, Side};

/// Book backed by ordered-map levels
pub type TreeBook = OrderBook<TreeSide>;

/// Book backed by sorted-vector levels
pub type ArrayBook = OrderBook<ArraySide>;

/// Resting order index for a single instrument.
///
/// Not a matching engine: crossed prices are stored as given.
#[derive(Debug)]
pub struct OrderBook<S> {
    /// Canonical order records
    registry: OrderRegistry,

    /// Bid levels (best = highest price)
    bids: S,

    /// Ask levels (best = lowest price)
    asks: S,
}

impl<S: SideIndex> Default for OrderBook<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SideIndex> OrderBook<S> {
    /// Create a new empty book
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a book with `order_capacity` pre-allocated registry slots
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            registry: OrderRegistry::with_capacity(order_capacity),
            bids: S::new(Side::Bid),
            asks: S::new(Side::Ask),
        }
    }

    #[inline]
    fn index(&self, side: Side) -> &S {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    #[inline]
    fn index_mut(&mut self, side: Side) -> &mut S {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Side of a registry record. Records with zero quantity never enter the
    /// registry, so `None` here means the registry has been corrupted.
    fn resting_side(order: &Order) -> BookResult<Side> {
        order.side().ok_or_else(|| {
            BookError::IndexInconsistency(format!(
                "registry holds order {} with zero quantity",
                order.id
            ))
        })
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Start resting `order`.
    ///
    /// # Errors
    ///
    /// - [`BookError::InvalidQuantity`] for a zero quantity
    /// - [`BookError::InvalidOrderId`] for id 0
    /// - [`BookError::DuplicateOrder`] if the id already rests
    ///
    /// The registry insert is rolled back if the side index rejects the order.
    pub fn place(&mut self, order: Order) -> BookResult<()> {
        let side = order
            .side()
            .ok_or(BookError::InvalidQuantity { id: order.id })?;
        if order.id == 0 {
            return Err(BookError::InvalidOrderId);
        }

        self.registry.insert(order)?;

        if let Err(err) = self.index_mut(side).add(&order) {
            warn!(order_id = order.id, %side, error = %err, "side index rejected placement");
            // Roll back: the registry must not hold an unindexed order
            let _ = self.registry.remove(order.id);
            return Err(err);
        }

        debug!(order_id = order.id, price = order.price, quantity = order.quantity, "placed");
        Ok(())
    }

    /// Amend a resting order.
    ///
    /// - quantity 0: same as [`cancel`](Self::cancel)
    /// - same side and price: the record is updated in place and the order
    ///   keeps its queue position
    /// - otherwise: the order leaves its level and joins the back of the new one
    ///
    /// # Errors
    ///
    /// [`BookError::OrderNotFound`] if the id is not resting, or an
    /// inconsistency error if the side indexes refuse the move. A refused move
    /// restores the previous record and level membership.
    pub fn modify(&mut self, order: Order) -> BookResult<()> {
        if order.quantity == 0 {
            return self.cancel(order.id).map(|_| ());
        }

        let previous = *self
            .registry
            .lookup(order.id)
            .ok_or(BookError::OrderNotFound(order.id))?;

        if previous.same_slot(&order) {
            self.registry.update(order)?;
            debug!(order_id = order.id, quantity = order.quantity, "amended in place");
            return Ok(());
        }

        let old_side = Self::resting_side(&previous)?;
        let new_side = Self::resting_side(&order)?;

        if let Err(err) = self.index_mut(old_side).remove(previous.price, previous.id) {
            warn!(order_id = order.id, error = %err, "modify: order missing from its level");
            return Err(err);
        }

        if let Err(err) = self.registry.update(order) {
            self.restore_level(&previous, old_side);
            return Err(err);
        }

        if let Err(err) = self.index_mut(new_side).add(&order) {
            warn!(order_id = order.id, error = %err, "modify: new level rejected order, restoring");
            let _ = self.registry.update(previous);
            self.restore_level(&previous, old_side);
            return Err(err);
        }

        debug!(
            order_id = order.id,
            from_price = previous.price,
            to_price = order.price,
            quantity = order.quantity,
            "moved"
        );
        Ok(())
    }

    /// Best-effort re-insert of `previous` into the level it was taken from.
    fn restore_level(&mut self, previous: &Order, side: Side) {
        if let Err(err) = self.index_mut(side).add(previous) {
            warn!(order_id = previous.id, error = %err, "rollback failed; book is inconsistent");
        }
    }

    /// Stop resting order `id` and return its final record.
    ///
    /// # Errors
    ///
    /// [`BookError::OrderNotFound`] if the id is not resting. If the side
    /// index does not hold the order, the registry entry is kept and the
    /// index error is returned.
    pub fn cancel(&mut self, id: OrderId) -> BookResult<Order> {
        let current = *self
            .registry
            .lookup(id)
            .ok_or(BookError::OrderNotFound(id))?;
        let side = Self::resting_side(&current)?;

        if let Err(err) = self.index_mut(side).remove(current.price, id) {
            warn!(order_id = id, error = %err, "cancel: order missing from its level");
            return Err(err);
        }

        let removed = self.registry.remove(id)?;
        debug!(order_id = id, price = removed.price, "cancelled");
        Ok(removed)
    }

    /// Remove every order
    pub fn clear(&mut self) {
        self.registry.clear();
        self.bids.clear();
        self.asks.clear();
    }

    // ========================================================================
    // Best Bid/Ask
    // ========================================================================

    /// Order at the front of the best level on `side`.
    ///
    /// # Errors
    ///
    /// [`BookError::IndexInconsistency`] if the level references an id the
    /// registry does not hold.
    pub fn best_checked(&self, side: Side) -> BookResult<Option<Order>> {
        let Some((price, id)) = self.index(side).best() else {
            return Ok(None);
        };

        match self.registry.lookup(id) {
            Some(order) => Ok(Some(*order)),
            None => Err(BookError::IndexInconsistency(format!(
                "best {side} level at {price} references unknown order {id}"
            ))),
        }
    }

    fn best(&self, side: Side) -> Option<Order> {
        self.best_checked(side).unwrap_or_else(|err| {
            warn!(%side, error = %err, "best query hit an inconsistent index");
            None
        })
    }

    /// Highest-priced resting bid, `None` if there is none
    pub fn best_bid(&self) -> Option<Order> {
        self.best(Side::Bid)
    }

    /// Lowest-priced resting ask, `None` if there is none
    pub fn best_ask(&self) -> Option<Order> {
        self.best(Side::Ask)
    }

    /// Like [`best_bid`](Self::best_bid) but distinguishes an empty side from
    /// a broken one
    pub fn best_bid_checked(&self) -> BookResult<Option<Order>> {
        self.best_checked(Side::Bid)
    }

    /// Like [`best_ask`](Self::best_ask) but distinguishes an empty side from
    /// a broken one
    pub fn best_ask_checked(&self) -> BookResult<Option<Order>> {
        self.best_checked(Side::Ask)
    }

    #[inline]
    pub fn best_bid_price(&self) -> Option<Price> {
        self.bids.best_price()
    }

    #[inline]
    pub fn best_ask_price(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Best ask minus best bid, when both sides rest.
    ///
    /// Negative for a crossed book; `None` on overflow.
    pub fn spread(&self) -> Option<Price> {
        self.best_ask_price()?.checked_sub(self.best_bid_price()?)
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Look up a resting order
    #[inline]
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.registry.lookup(id)
    }

    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.registry.contains(id)
    }

    /// Number of resting orders
    #[inline]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.order_count()
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.asks.order_count()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.level_count()
    }

    /// All resting records, in no particular order
    pub fn orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.registry.iter()
    }

    #[inline]
    pub fn bids(&self) -> &S {
        &self.bids
    }

    #[inline]
    pub fn asks(&self) -> &S {
        &self.asks
    }

    /// Top `max_levels` levels on `side`, best first
    pub fn depth(&self, side: Side, max_levels: usize) -> Vec<LevelSummary> {
        self.index(side)
            .levels()
            .take(max_levels)
            .map(|level| LevelSummary {
                price: level.price,
                order_count: level.len(),
                total_size: level
                    .ids()
                    .iter()
                    .filter_map(|&id| self.registry.lookup(id))
                    .fold(0u64, |acc, order| acc.saturating_add(order.size())),
            })
            .collect()
    }

    // ========================================================================
    // Integrity
    // ========================================================================

    /// Audit registry/index consistency.
    ///
    /// Checks that levels are non-empty, strictly ordered by priority, and
    /// that every indexed id resolves to a registry record on the same side
    /// at the same price, exactly once, with nothing left over.
    pub fn validate(&self) -> BookResult<()> {
        let mut seen: HashSet<OrderId> = HashSet::with_capacity(self.registry.len());

        for side in [Side::Bid, Side::Ask] {
            let index = self.index(side);
            let mut previous: Option<Price> = None;
            let mut population = 0usize;

            for level in index.levels() {
                if level.is_empty() {
                    return Err(inconsistent(format!("empty {side} level at {}", level.price)));
                }
                if let Some(prev) = previous {
                    if !side.is_better(prev, level.price) {
                        return Err(inconsistent(format!(
                            "{side} levels out of order: {prev} before {}",
                            level.price
                        )));
                    }
                }
                previous = Some(level.price);
                population += level.len();

                for &id in level.ids() {
                    let record = self.registry.lookup(id).ok_or_else(|| {
                        inconsistent(format!("{side} level {} holds unknown order {id}", level.price))
                    })?;
                    if record.price != level.price || record.side() != Some(side) {
                        return Err(inconsistent(format!(
                            "order {id} indexed at {side} {} but registry says {record}",
                            level.price
                        )));
                    }
                    if !seen.insert(id) {
                        return Err(inconsistent(format!("order {id} indexed more than once")));
                    }
                }
            }

            if population != index.order_count() {
                return Err(inconsistent(format!(
                    "{side} index counts {} orders but levels hold {population}",
                    index.order_count()
                )));
            }
        }

        if seen.len() != self.registry.len() {
            return Err(inconsistent(format!(
                "registry holds {} orders but levels hold {}",
                self.registry.len(),
                seen.len()
            )));
        }
        Ok(())
    }

    /// SHA-256 over all resting records ordered by id.
    ///
    /// Queue order inside levels is not hashed, so books built with different
    /// strategies from the same operations have equal roots.
    pub fn state_root(&self) -> [u8; 32] {
        let mut records: Vec<&Order> = self.registry.iter().collect();
        records.sort_unstable_by_key(|order| order.id);

        let mut hasher = Sha256::new();
        hasher.update((records.len() as u64).to_le_bytes());
        for order in records {
            hasher.update(order.id.to_le_bytes());
            hasher.update(order.price.to_le_bytes());
            hasher.update(order.quantity.to_le_bytes());
        }
        hasher.finalize().into()
    }
}

fn inconsistent(msg: String) -> BookError {
    BookError::IndexInconsistency(msg)
}

// ============================================================================
// Unit Tests
// ============================================================================
