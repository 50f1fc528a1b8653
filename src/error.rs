//! Error types for book operations.
//!
//! Every failed mutation leaves the book exactly as it was before the call.
//! The variants fall into four groups:
//!
//! - invalid request: [`BookError::InvalidQuantity`], [`BookError::InvalidOrderId`]
//! - not found: [`BookError::OrderNotFound`]
//! - duplicate: [`BookError::DuplicateOrder`]
//! - index inconsistency: [`BookError::LevelNotFound`], [`BookError::NotInLevel`],
//!   [`BookError::IndexInconsistency`]
//!
//! The last group should never surface under correct use. Callers should treat
//! it as a structural-integrity signal, see [`BookError::is_inconsistency`].

use thiserror::Error;

use crate::types::{OrderId, Price, Side};

/// Errors returned by the registry, the side indexes and the book facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// Placement with a zero quantity
    #[error("order {id} has zero quantity")]
    InvalidQuantity { id: OrderId },

    /// Identifier zero is reserved
    #[error("order id 0 is reserved")]
    InvalidOrderId,

    /// Operation on an identifier that is not resting
    #[error("order {0} is not resting")]
    OrderNotFound(OrderId),

    /// Placement with an identifier that is already resting
    #[error("order {0} is already resting")]
    DuplicateOrder(OrderId),

    /// A side index has no level at the requested price
    #[error("no {side} level at price {price}")]
    LevelNotFound { side: Side, price: Price },

    /// A level exists but does not hold the identifier
    #[error("order {id} is not in the {side} level at price {price}")]
    NotInLevel { side: Side, price: Price, id: OrderId },

    /// Registry and side index disagree
    #[error("index inconsistency: {0}")]
    IndexInconsistency(String),
}

impl BookError {
    /// True for errors that indicate the registry and the side indexes have
    /// drifted apart, as opposed to a rejected request.
    pub fn is_inconsistency(&self) -> bool {
        matches!(
            self,
            BookError::LevelNotFound { .. }
                | BookError::NotInLevel { .. }
                | BookError::IndexInconsistency(_)
        )
    }
}

/// Result type for book operations
pub type BookResult<T> = Result<T, BookError>;
