//! Decimal price <-> tick conversion.
//!
//! ## Overview
//!
//! The book itself only ever sees signed integer prices in tick units. Callers
//! that speak human decimal prices convert at the boundary with these helpers.
//! All math goes through `rust_decimal`; nothing here touches floating point.
//!
//! ## Examples
//!
//! ```
//! use resting_book::types::price::{to_ticks, from_ticks};
//! use rust_decimal::Decimal;
//!
//! let tick = Decimal::new(25, 2); // 0.25
//!
//! assert_eq!(to_ticks("100.25", tick), Some(401));
//! assert_eq!(to_ticks("-0.50", tick), Some(-2));
//! assert_eq!(from_ticks(401, tick).as_deref(), Some("100.25"));
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::types::Price;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Parse a tick size string. Only strictly positive sizes are accepted.
///
/// ```
/// use resting_book::types::price::parse_tick_size;
///
/// assert!(parse_tick_size("0.01").is_some());
/// assert!(parse_tick_size("0").is_none());
/// assert!(parse_tick_size("-1").is_none());
/// ```
pub fn parse_tick_size(s: &str) -> Option<Decimal> {
    let tick = Decimal::from_str(s.trim()).ok()?;
    (tick > Decimal::ZERO).then_some(tick)
}

/// Convert a decimal string to tick units.
///
/// # Returns
///
/// * `Some(Price)` - The price expressed in ticks
/// * `None` - Parse failure, non-positive tick size, off-tick price, or overflow
pub fn to_ticks(s: &str, tick_size: Decimal) -> Option<Price> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_ticks(decimal, tick_size)
}

/// Convert a Decimal to tick units.
///
/// Prices that are not an exact multiple of `tick_size` are rejected rather
/// than rounded.
pub fn decimal_to_ticks(d: Decimal, tick_size: Decimal) -> Option<Price> {
    if tick_size <= Decimal::ZERO {
        return None;
    }

    let ticks = d.checked_div(tick_size)?;
    if !ticks.fract().is_zero() {
        return None;
    }
    ticks.to_i64()
}

/// Convert tick units back to a Decimal.
pub fn ticks_to_decimal(ticks: Price, tick_size: Decimal) -> Option<Decimal> {
    if tick_size <= Decimal::ZERO {
        return None;
    }
    Decimal::from(ticks).checked_mul(tick_size)
}

/// Convert tick units to a human-readable string (trailing zeros trimmed)
///
/// # Example
///
/// ```
/// use resting_book::types::price::from_ticks;
/// use rust_decimal::Decimal;
///
/// let tick = Decimal::new(1, 2); // 0.01
/// assert_eq!(from_ticks(150, tick).as_deref(), Some("1.5"));
/// assert_eq!(from_ticks(-3, tick).as_deref(), Some("-0.03"));
/// ```
pub fn from_ticks(ticks: Price, tick_size: Decimal) -> Option<String> {
    ticks_to_decimal(ticks, tick_size).map(|d| d.normalize().to_string())
}

// ============================================================================
// Unit Tests
// ============================================================================
