//! Metro Bites Core - Shared types library.
//!
//! This crate provides the types shared by all Metro Bites components:
//! - `cart` - Cart state, persistence, menu and payment helpers
//! - `cli` - Command-line driver for a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types - no storage access, no rendering.
//! This keeps it lightweight and usable from native and browser builds alike.
//!
//! # Modules
//!
//! - [`types`] - Line items, orders, identifiers, prices and cart status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
