//! The side index contract shared by both level strategies.
//!
//! A side index holds the price levels for one side of the book, ordered by
//! price priority (highest first for bids, lowest first for asks). It knows
//! nothing about quantities; it stores identifiers and hands the facade the
//! identifier at the front of the best level.
//!
//! Implementations:
//!
//! - [`TreeSide`](crate::orderbook::TreeSide): `BTreeMap` of levels
//! - [`ArraySide`](crate::orderbook::ArraySide): sorted `Vec` of levels

use crate::error::{BookError, BookResult};
use crate::orderbook::PriceLevel;
use crate::types::{Order, OrderId, Price, Side};

/// Price-ordered levels for one side of the book.
pub trait SideIndex {
    /// Create an empty index for `side`
    fn new(side: Side) -> Self
    where
        Self: Sized;

    /// Side this index serves
    fn side(&self) -> Side;

    /// Append `order.id` to the level at `order.price`, creating the level
    /// if needed.
    ///
    /// Fails with [`BookError::IndexInconsistency`] if the order does not
    /// belong on this side.
    fn add(&mut self, order: &Order) -> BookResult<()>;

    /// Remove `id` from the level at `price`, erasing the level once empty.
    ///
    /// Fails with [`BookError::LevelNotFound`] or [`BookError::NotInLevel`].
    fn remove(&mut self, price: Price, id: OrderId) -> BookResult<()>;

    /// Price of the best level and the identifier at its front
    fn best(&self) -> Option<(Price, OrderId)>;

    fn best_price(&self) -> Option<Price> {
        self.best().map(|(price, _)| price)
    }

    /// Number of distinct price levels
    fn level_count(&self) -> usize;

    /// Number of identifiers across all levels
    fn order_count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.level_count() == 0
    }

    /// True if the level at `price` holds `id`
    fn contains(&self, price: Price, id: OrderId) -> bool;

    /// Levels in priority order, best first
    fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_>;

    /// Drop every level
    fn clear(&mut self);
}

/// Reject orders whose quantity sign does not match `side`.
pub(crate) fn ensure_side(side: Side, order: &Order) -> BookResult<()> {
    match order.side() {
        Some(order_side) if order_side == side => Ok(()),
        Some(order_side) => Err(BookError::IndexInconsistency(format!(
            "order {} is {} interest, routed to the {} index",
            order.id, order_side, side
        ))),
        None => Err(BookError::IndexInconsistency(format!(
            "order {} has no side (zero quantity)",
            order.id
        ))),
    }
}

/// Behaviour every [`SideIndex`] must show. Each strategy's test module runs
/// these against its own type.
#[cfg(test)]
pub(crate) mod contract {
    use super::*;

    pub fn empty_side<S: SideIndex>() {
        let index = S::new(Side::Bid);
        assert_eq!(index.side(), Side::Bid);
        assert!(index.is_empty());
        assert!(index.best().is_none());
        assert!(index.best_price().is_none());
        assert_eq!(index.order_count(), 0);
    }

    pub fn bid_priority<S: SideIndex>() {
        let mut index = S::new(Side::Bid);
        index.add(&Order::new(1, 100, 5)).unwrap();
        index.add(&Order::new(2, 99, 7)).unwrap();
        index.add(&Order::new(3, 101, 1)).unwrap();

        assert_eq!(index.best(), Some((101, 3)));
        let prices: Vec<Price> = index.levels().map(|l| l.price).collect();
        assert_eq!(prices, vec![101, 100, 99]);
    }

    pub fn ask_priority<S: SideIndex>() {
        let mut index = S::new(Side::Ask);
        index.add(&Order::new(4, 102, -2)).unwrap();
        index.add(&Order::new(5, 98, -4)).unwrap();
        index.add(&Order::new(6, -3, -1)).unwrap();

        assert_eq!(index.best(), Some((-3, 6)));
        let prices: Vec<Price> = index.levels().map(|l| l.price).collect();
        assert_eq!(prices, vec![-3, 98, 102]);
    }

    pub fn same_price_orders_share_level<S: SideIndex>() {
        let mut index = S::new(Side::Bid);
        index.add(&Order::new(1, 100, 5)).unwrap();
        index.add(&Order::new(2, 100, 3)).unwrap();
        index.add(&Order::new(3, 100, 1)).unwrap();

        assert_eq!(index.level_count(), 1);
        assert_eq!(index.order_count(), 3);
        assert_eq!(index.best(), Some((100, 1)));
        assert!(index.contains(100, 2));
        assert!(!index.contains(101, 2));
    }

    pub fn remove_prunes_empty_level<S: SideIndex>() {
        let mut index = S::new(Side::Ask);
        index.add(&Order::new(1, 50, -1)).unwrap();
        index.add(&Order::new(2, 60, -1)).unwrap();

        index.remove(50, 1).unwrap();
        assert_eq!(index.level_count(), 1);
        assert_eq!(index.best(), Some((60, 2)));

        index.remove(60, 2).unwrap();
        assert!(index.is_empty());
        assert!(index.best().is_none());
    }

    pub fn remove_failures_leave_state<S: SideIndex>() {
        let mut index = S::new(Side::Bid);
        index.add(&Order::new(1, 100, 5)).unwrap();

        assert_eq!(
            index.remove(99, 1),
            Err(BookError::LevelNotFound { side: Side::Bid, price: 99 })
        );
        assert_eq!(
            index.remove(100, 2),
            Err(BookError::NotInLevel { side: Side::Bid, price: 100, id: 2 })
        );
        assert_eq!(index.best(), Some((100, 1)));
        assert_eq!(index.order_count(), 1);
    }

    pub fn wrong_side_rejected<S: SideIndex>() {
        let mut index = S::new(Side::Bid);
        assert!(index.add(&Order::new(1, 100, -5)).unwrap_err().is_inconsistency());
        assert!(index.add(&Order::new(2, 100, 0)).unwrap_err().is_inconsistency());
        assert!(index.is_empty());
    }

    pub fn extreme_prices<S: SideIndex>() {
        let mut index = S::new(Side::Bid);
        index.add(&Order::new(1, i64::MIN, 1)).unwrap();
        index.add(&Order::new(2, i64::MAX, 1)).unwrap();
        index.add(&Order::new(3, 0, 1)).unwrap();

        assert_eq!(index.best(), Some((i64::MAX, 2)));
        index.remove(i64::MAX, 2).unwrap();
        assert_eq!(index.best(), Some((0, 3)));
        index.remove(0, 3).unwrap();
        assert_eq!(index.best(), Some((i64::MIN, 1)));
    }

    pub fn clear_drops_everything<S: SideIndex>() {
        let mut index = S::new(Side::Ask);
        for id in 1..=10 {
            index.add(&Order::new(id, id as i64 % 3, -1)).unwrap();
        }
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.order_count(), 0);
    }

    /// Run the whole contract against `S`
    pub fn run_all<S: SideIndex>() {
        empty_side::<S>();
        bid_priority::<S>();
        ask_priority::<S>();
        same_price_orders_share_level::<S>();
        remove_prunes_empty_level::<S>();
        remove_failures_leave_state::<S>();
        wrong_side_rejected::<S>();
        extreme_prices::<S>();
        clear_drops_everything::<S>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_side() {
        assert!(ensure_side(Side::Bid, &Order::new(1, 100, 5)).is_ok());
        assert!(ensure_side(Side::Ask, &Order::new(1, 100, -5)).is_ok());

        let err = ensure_side(Side::Bid, &Order::new(1, 100, -5)).unwrap_err();
        assert!(err.is_inconsistency());

        let err = ensure_side(Side::Ask, &Order::new(1, 100, 0)).unwrap_err();
        assert!(err.is_inconsistency());
    }
}
