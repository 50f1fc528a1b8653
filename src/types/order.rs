//! Order types for the resting book.
//!
//! ## Signed Quantity
//!
//! An order does not carry an explicit side. The sign of `quantity` encodes it:
//!
//! - `quantity > 0`: bid (buy) interest
//! - `quantity < 0`: ask (sell) interest
//! - `quantity == 0`: not a resting state; a request to remove the order
//!
//! Prices are signed integers in instrument tick units. See
//! [`crate::types::price`] for decimal <-> tick conversion.

use std::cmp::Ordering;
use std::fmt;

/// Unique order identifier. Zero is never a resting identifier.
pub type OrderId = u64;

/// Price in instrument tick units.
pub type Price = i64;

/// Signed quantity; the sign encodes the side.
pub type Quantity = i64;

// ============================================================================
// Side enum
// ============================================================================

/// Side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy interest. Best = highest price.
    Bid,
    /// Sell interest. Best = lowest price.
    Ask,
}

impl Side {
    /// Derive the side from a signed quantity.
    ///
    /// Returns `None` for zero, which has no side.
    ///
    /// # Example
    ///
    /// ```
    /// use resting_book::types::Side;
    ///
    /// assert_eq!(Side::from_quantity(5), Some(Side::Bid));
    /// assert_eq!(Side::from_quantity(-5), Some(Side::Ask));
    /// assert_eq!(Side::from_quantity(0), None);
    /// ```
    #[inline]
    pub fn from_quantity(quantity: Quantity) -> Option<Self> {
        match quantity.cmp(&0) {
            Ordering::Greater => Some(Side::Bid),
            Ordering::Less => Some(Side::Ask),
            Ordering::Equal => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Order two prices by priority on this side.
    ///
    /// `Ordering::Less` means `a` is served before `b`: higher first on the
    /// bid side, lower first on the ask side.
    #[inline]
    pub fn priority(self, a: Price, b: Price) -> Ordering {
        match self {
            Side::Bid => b.cmp(&a),
            Side::Ask => a.cmp(&b),
        }
    }

    /// True when `a` is strictly better than `b` on this side.
    #[inline]
    pub fn is_better(self, a: Price, b: Price) -> bool {
        self.priority(a, b) == Ordering::Less
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("bid"),
            Side::Ask => f.write_str("ask"),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// ## Example
///
/// ```
/// use resting_book::types::{Order, Side};
///
/// let bid = Order::new(1, 100, 5);
/// assert_eq!(bid.side(), Some(Side::Bid));
///
/// let ask = Order::ask(2, 101, 3);
/// assert_eq!(ask.quantity, -3);
/// assert_eq!(ask.size(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Order {
    /// Unique order identifier (chosen by the caller)
    pub id: OrderId,

    /// Limit price in tick units
    pub price: Price,

    /// Signed resting quantity: positive = bid, negative = ask
    pub quantity: Quantity,
}

impl Order {
    /// Create an order from its raw signed representation.
    #[inline]
    pub const fn new(id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self { id, price, quantity }
    }

    /// Create a bid for `size` units.
    pub fn bid(id: OrderId, price: Price, size: u32) -> Self {
        Self::new(id, price, Quantity::from(size))
    }

    /// Create an ask for `size` units.
    pub fn ask(id: OrderId, price: Price, size: u32) -> Self {
        Self::new(id, price, -Quantity::from(size))
    }

    /// Side derived from the quantity sign, `None` for zero quantity.
    #[inline]
    pub fn side(&self) -> Option<Side> {
        Side::from_quantity(self.quantity)
    }

    /// Check if this is bid interest
    #[inline]
    pub fn is_bid(&self) -> bool {
        self.quantity > 0
    }

    /// Resting size (magnitude of the signed quantity).
    #[inline]
    pub fn size(&self) -> u64 {
        self.quantity.unsigned_abs()
    }

    /// True if this order and `other` sit on the same side at the same price.
    ///
    /// Two zero-quantity orders never share a slot.
    #[inline]
    pub fn same_slot(&self, other: &Order) -> bool {
        self.price == other.price
            && self.side().is_some()
            && self.side() == other.side()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}@{}", self.id, self.quantity, self.price)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
