//! Cart error types.
//!
//! Validation and empty-cart errors block the operation and leave state
//! untouched. Persistence and deserialization errors are degraded: the
//! in-memory cart has already moved on, and the error tells the caller that
//! the change may not survive a reload.

use metro_bites_core::{LineItemId, PriceError};
use thiserror::Error;

use crate::payment::PaymentError;
use crate::storage::StorageError;

/// Rejected input to a cart operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The item id is blank.
    #[error("item id cannot be empty")]
    EmptyId,

    /// The unit price is missing, not a number, or negative.
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),

    /// A quantity change would overflow the line's counter.
    #[error("quantity of {id} cannot exceed {max}")]
    QuantityOverflow {
        /// Line that would overflow.
        id: LineItemId,
        /// Largest representable quantity.
        max: u32,
    },
}

/// Error type for [`CartStore`](crate::CartStore) operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Bad input; nothing changed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Checkout or payment requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The backing store could not be read or written.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),

    /// The payment link could not be built.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Stored JSON could not be decoded; the entry was treated as empty.
    #[error("Stored data under {key:?} is malformed: {source}")]
    Deserialization {
        /// Storage key holding the bad data.
        key: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
}

impl CartError {
    /// Whether the operation still took effect in memory.
    ///
    /// `true` means the caller should warn the user that the cart may not
    /// survive a reload, not that the operation failed.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::Deserialization { .. })
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        assert_eq!(CartError::EmptyCart.to_string(), "Cart is empty");

        let err = CartError::from(ValidationError::EmptyId);
        assert_eq!(err.to_string(), "Validation error: item id cannot be empty");
    }

    #[test]
    fn test_is_degraded() {
        assert!(!CartError::EmptyCart.is_degraded());
        assert!(!CartError::from(ValidationError::EmptyId).is_degraded());
        assert!(CartError::from(StorageError::Unavailable("disabled".to_string())).is_degraded());

        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = CartError::Deserialization {
            key: "cart".to_string(),
            source,
        };
        assert!(err.is_degraded());
    }
}
