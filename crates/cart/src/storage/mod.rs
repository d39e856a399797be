//! Key-value persistence for the cart.
//!
//! The cart and the order history live under two independent keys, each
//! holding a JSON array. Backends only move strings; encoding is the
//! store's job.

mod file;
mod memory;
#[cfg(feature = "web")]
mod web;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(feature = "web")]
pub use web::LocalStorage;

use thiserror::Error;

/// Default storage keys, shared with the ordering page.
pub mod keys {
    /// Current cart.
    pub const CART: &str = "quickmetro_bites_cart";
    /// Completed orders.
    pub const ORDERS: &str = "quickmetro_bites_orders";
}

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store cannot be used at all (disabled, private mode, no window).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The write would exceed the store's capacity.
    #[error(
        "storage quota exceeded writing {key:?}: need {needed} bytes, {remaining} remaining"
    )]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Bytes the write adds to the store.
        needed: usize,
        /// Bytes still free before the write.
        remaining: usize,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A value could not be encoded as JSON.
    #[error("failed to encode {key:?}: {source}")]
    Encode {
        /// Key being written.
        key: String,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem failure.
    #[error("I/O error on {key:?}: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A synchronous string key-value store.
///
/// Modeled on browser local storage: reads of absent keys are `Ok(None)`,
/// removing an absent key is not an error.
pub trait KeyValueStore {
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
    /// Returns an error if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Names of the two entries a cart store uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Key of the cart entry.
    pub cart: String,
    /// Key of the order history entry.
    pub orders: String,
}

impl StorageKeys {
    /// Create a custom key pair.
    #[must_use]
    pub fn new(cart: impl Into<String>, orders: impl Into<String>) -> Self {
        Self {
            cart: cart.into(),
            orders: orders.into(),
        }
    }

    /// Key an unreadable order history is moved to before it is replaced.
    #[must_use]
    pub fn orders_backup(&self) -> String {
        format!("{}.corrupt", self.orders)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(keys::CART, keys::ORDERS)
    }
}
