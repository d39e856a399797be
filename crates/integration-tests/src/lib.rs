//! Integration tests for Metro Bites.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p metro-bites-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end cart flows over in-memory storage
//! - `file_persistence` - Sessions sharing a directory-backed store

use metro_bites_cart::{CartStore, MemoryStore};

/// A fresh cart over shared in-memory storage, plus a handle to the storage.
#[must_use]
pub fn memory_cart() -> (CartStore, MemoryStore) {
    let storage = MemoryStore::new();
    (CartStore::new(Box::new(storage.clone())), storage)
}

/// A second session over the same storage, hydrated.
///
/// # Panics
///
/// Panics if hydration reports an error.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn reopen(storage: &MemoryStore) -> CartStore {
    let mut cart = CartStore::new(Box::new(storage.clone()));
    cart.hydrate().unwrap();
    cart
}
