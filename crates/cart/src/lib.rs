//! Metro Bites Cart - persistent shopping cart.
//!
//! [`CartStore`] owns one session's cart and order history and writes both
//! through to a [`KeyValueStore`] after every change.
//!
//! # Modules
//!
//! - [`store`] - The cart itself: add, remove, update, totals, checkout
//! - [`storage`] - Key-value backends (memory, files, browser local storage)
//! - [`observer`] - Change notifications for presentation layers
//! - [`menu`] - Structured menu source and the listing-text adapter
//! - [`payment`] - UPI payment URIs for the QR code
//! - [`render`] - Plain-text presentation of carts and orders
//!
//! # Example
//!
//! ```rust
//! use metro_bites_cart::{CartStore, MemoryStore};
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartStore::new(Box::new(MemoryStore::new()));
//! cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();
//! cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total(), Decimal::from(40));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod menu;
pub mod observer;
pub mod payment;
pub mod render;
pub mod storage;
pub mod store;

pub use error::{CartError, Result, ValidationError};
pub use menu::{Menu, MenuError, MenuItem};
pub use observer::{CartObserver, CartSnapshot, TracingObserver};
pub use payment::{PaymentError, UpiPayee};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageKeys};
pub use store::CartStore;

#[cfg(feature = "web")]
pub use storage::LocalStorage;
