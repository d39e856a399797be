//! Core types for Metro Bites.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod id;
pub mod line_item;
pub mod order;
pub mod price;
pub mod status;

pub use id::*;
pub use line_item::{DEFAULT_IMAGE, LineItem};
pub use order::Order;
pub use price::{CurrencyCode, Price, PriceError};
pub use status::CartStatus;
