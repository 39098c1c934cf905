//! Storage port for persisted cart state.
//!
//! The cart lives in a single named slot of a string key-value store, the
//! same shape as the browser's `localStorage`. This port is all the cart
//! store needs from infrastructure; backends live in the widget crate.
//!
//! # Design Rules
//!
//! - Values are opaque strings; the store owns the JSON encoding
//! - A missing key is `Ok(None)`, never an error
//! - A failed `set` must leave the previous value readable

use thiserror::Error;

/// Errors reported by a [`CartStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or otherwise not reachable.
    #[error("storage is unavailable")]
    Unavailable,

    /// Writing the value would exceed the backend's capacity.
    #[error("storage quota exceeded: need {needed} bytes, limit is {limit}")]
    QuotaExceeded {
        /// Bytes the store would hold after the write.
        needed: usize,
        /// Configured capacity in bytes.
        limit: usize,
    },

    /// Underlying file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend's own container format could not be read or written.
    #[error("format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// String key-value storage holding the cart slot.
pub trait CartStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected; the previous value is kept.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: CartStorage + ?Sized> CartStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
