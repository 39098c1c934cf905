//! Cart error taxonomy.

use thiserror::Error;

use crate::storage::StorageError;
use crate::types::{ItemTitle, QuantityError};

/// Errors raised by cart operations.
///
/// Every variant is terminal to the operation that raised it; nothing is
/// retried. [`CartError::EmptyCart`] is an expected outcome rather than a
/// fault and callers usually turn it into an informational message.
#[derive(Debug, Error)]
pub enum CartError {
    /// Checkout or cart view attempted on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A positional edit referenced an entry that does not exist.
    #[error("no cart entry at index {index} (cart has {len} entries)")]
    InvalidIndex {
        /// Requested position.
        index: usize,
        /// Number of entries at the time of the request.
        len: usize,
    },

    /// A title-addressed edit referenced a product not in the cart.
    #[error("no cart entry titled {0:?}")]
    ItemNotFound(ItemTitle),

    /// A quantity change left the supported range.
    #[error("quantity error: {0}")]
    Quantity(#[from] QuantityError),

    /// Reading or writing the storage slot failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The storage slot holds data that is not a valid cart.
    #[error("stored cart is corrupt: {0}")]
    CorruptState(#[source] serde_json::Error),
}

impl CartError {
    /// Whether this is a normal control-flow outcome rather than a fault.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        matches!(self, Self::EmptyCart)
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
