//! Core data types for the resting book
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order (id, price, signed quantity)
//! - [`Side`]: Bid or Ask, derived from the quantity sign
//! - [`OrderId`], [`Price`], [`Quantity`]: integer aliases
//!
//! ## Tick Units
//!
//! Prices are signed integers in instrument tick units.
//! Example: with a 0.25 tick, 100.25 is stored as 401i64

mod order;
pub mod price;

// Re-export all types at module level
pub use order::{Order, OrderId, Price, Quantity, Side};
