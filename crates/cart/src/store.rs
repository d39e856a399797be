//! The cart store.
//!
//! One [`CartStore`] per session owns the cart lines and the order history
//! and writes both through to a [`KeyValueStore`] after every change. Reads
//! never touch storage; the in-memory state is authoritative for the
//! session even when a write fails.

use std::fmt;

use chrono::{DateTime, Utc};
use metro_bites_core::{CartStatus, LineItem, LineItemId, Order, Price};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::{CartError, Result, ValidationError};
use crate::menu::MenuItem;
use crate::observer::{CartObserver, CartSnapshot};
use crate::payment::UpiPayee;
use crate::storage::{KeyValueStore, StorageError, StorageKeys};

/// A session's cart and order history.
pub struct CartStore {
    items: Vec<LineItem>,
    orders: Vec<Order>,
    /// Whether `orders` mirrors the stored history. Until it does, checkout
    /// re-reads the entry instead of writing over it.
    history_loaded: bool,
    storage: Box<dyn KeyValueStore>,
    keys: StorageKeys,
    observers: Vec<Box<dyn CartObserver>>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("orders", &self.orders.len())
            .field("history_loaded", &self.history_loaded)
            .field("keys", &self.keys)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an empty store using the default storage keys.
    ///
    /// Call [`hydrate`](Self::hydrate) to load previously persisted state.
    #[must_use]
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self::with_keys(storage, StorageKeys::default())
    }

    /// Create an empty store using custom storage keys.
    #[must_use]
    pub fn with_keys(storage: Box<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self {
            items: Vec::new(),
            orders: Vec::new(),
            history_loaded: false,
            storage,
            keys,
            observers: Vec::new(),
        }
    }

    /// Register an observer. It is called after every change.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // =========================================================================
    // Hydration
    // =========================================================================

    /// Load the persisted cart and order history.
    ///
    /// Absent entries load as empty. Cart lines are decoded one at a time:
    /// a line that cannot be decoded is dropped and the rest are kept. Lines
    /// that break the cart invariants (zero quantity, negative price,
    /// repeated id) are dropped or merged. An order history that cannot be
    /// read or decoded loads as empty but stays untouched in storage until
    /// [`checkout_at`](Self::checkout_at) moves it aside. Problems are
    /// logged and the first one is returned after both entries have been
    /// attempted. Observers are notified in every case.
    ///
    /// # Errors
    ///
    /// Returns the first [`CartError::Persistence`] or
    /// [`CartError::Deserialization`] encountered. The store is usable
    /// either way.
    #[instrument(skip(self), fields(cart_key = %self.keys.cart, orders_key = %self.keys.orders))]
    pub fn hydrate(&mut self) -> Result<()> {
        let (items, mut first_error) = match read_entry(self.storage.as_ref(), &self.keys.cart) {
            Ok(Some(raw)) => decode_lines(&self.keys.cart, &raw),
            Ok(None) => (Vec::new(), None),
            Err(e) => (Vec::new(), Some(e)),
        };
        if let Some(e) = &first_error {
            tracing::warn!(error = %e, kept = items.len(), "Stored cart was not fully readable");
        }
        self.items = sanitize_items(items);

        let orders = read_entry(self.storage.as_ref(), &self.keys.orders).and_then(|raw| {
            raw.map_or_else(
                || Ok(Vec::new()),
                |raw| decode_entry::<Order>(&self.keys.orders, &raw),
            )
        });
        match orders {
            Ok(orders) => {
                self.orders = orders;
                self.history_loaded = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Order history unreadable, leaving it in place");
                self.orders = Vec::new();
                self.history_loaded = false;
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        tracing::debug!(
            lines = self.items.len(),
            orders = self.orders.len(),
            "Cart hydrated"
        );
        self.notify();

        first_error.map_or(Ok(()), Err)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of an item.
    ///
    /// If a line with `id` exists its quantity goes up by one and its name,
    /// price and image are left as they were. Otherwise a new line with
    /// quantity 1 is appended.
    ///
    /// # Errors
    ///
    /// - [`CartError::Validation`] for a blank id, a negative price or a
    ///   quantity overflow; nothing changes.
    /// - [`CartError::Persistence`] if the write fails; the line is already
    ///   in the cart and can be read back with [`item`](Self::item).
    pub fn add_item(
        &mut self,
        id: impl Into<LineItemId>,
        name: impl Into<String>,
        price: Decimal,
        image: Option<String>,
    ) -> Result<LineItem> {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        let price = Price::validate_amount(price).map_err(ValidationError::from)?;

        let item = if let Some(existing) = self.items.iter_mut().find(|item| item.id == id) {
            existing.quantity =
                existing
                    .quantity
                    .checked_add(1)
                    .ok_or_else(|| ValidationError::QuantityOverflow {
                        id: id.clone(),
                        max: u32::MAX,
                    })?;
            existing.clone()
        } else {
            let item = LineItem::new(id, name, price, image);
            self.items.push(item.clone());
            item
        };

        tracing::debug!(id = %item.id, quantity = item.quantity, "Added item");
        self.commit_cart()?;
        Ok(item)
    }

    /// Add one unit of an item whose price is still text.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Validation`] if `price_text` is not a
    /// non-negative number, otherwise as [`add_item`](Self::add_item).
    pub fn add_item_from_text(
        &mut self,
        id: impl Into<LineItemId>,
        name: impl Into<String>,
        price_text: &str,
        image: Option<String>,
    ) -> Result<LineItem> {
        let price = Price::parse_amount(price_text).map_err(ValidationError::from)?;
        self.add_item(id, name, price, image)
    }

    /// Add one unit of a menu item.
    ///
    /// # Errors
    ///
    /// As [`add_item`](Self::add_item).
    pub fn add_menu_item(&mut self, item: &MenuItem) -> Result<LineItem> {
        self.add_item(
            item.id.clone(),
            item.name.clone(),
            item.price,
            item.image.clone(),
        )
    }

    /// Remove the line with `id`. Returns whether a line was removed.
    ///
    /// Removing an id that is not in the cart changes nothing and writes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if the write fails; the line is
    /// already gone from memory.
    pub fn remove_item(&mut self, id: &str) -> Result<bool> {
        let before = self.items.len();
        self.items.retain(|item| item.id.as_str() != id);
        if self.items.len() == before {
            return Ok(false);
        }

        tracing::debug!(id, "Removed item");
        self.commit_cart()?;
        Ok(true)
    }

    /// Change the quantity of the line with `id` by `delta`.
    ///
    /// A result of zero or less removes the line. An unknown id is a no-op.
    /// Returns the updated line, or `None` if it was removed or absent.
    ///
    /// # Errors
    ///
    /// - [`CartError::Validation`] if the result would overflow; nothing
    ///   changes.
    /// - [`CartError::Persistence`] if the write fails; the change is
    ///   already applied in memory.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> Result<Option<LineItem>> {
        let Some(item) = self.items.iter_mut().find(|item| item.id.as_str() == id) else {
            return Ok(None);
        };

        let quantity = i64::from(item.quantity).saturating_add(delta);
        let updated = if quantity <= 0 {
            None
        } else {
            item.quantity =
                u32::try_from(quantity).map_err(|_| ValidationError::QuantityOverflow {
                    id: item.id.clone(),
                    max: u32::MAX,
                })?;
            Some(item.clone())
        };

        if updated.is_none() {
            self.items.retain(|item| item.id.as_str() != id);
            tracing::debug!(id, delta, "Quantity reached zero, removed item");
        } else {
            tracing::debug!(id, delta, "Updated quantity");
        }

        self.commit_cart()?;
        Ok(updated)
    }

    /// Empty the cart without placing an order and delete its stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if the entry cannot be removed;
    /// the cart is already empty in memory.
    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        tracing::debug!("Cleared cart");
        let removed = self.storage.remove(&self.keys.cart);
        self.notify();
        removed.map_err(|e| {
            tracing::warn!(error = %e, "Cart entry not removed, cleared in memory only");
            CartError::from(e)
        })
    }

    /// Place an order for the current cart and empty it.
    ///
    /// # Errors
    ///
    /// As [`checkout_at`](Self::checkout_at).
    pub fn checkout(&mut self) -> Result<Order> {
        self.checkout_at(Utc::now())
    }

    /// Place an order timestamped `at` for the current cart and empty it.
    ///
    /// If the stored history was not loaded, it is read again first. A
    /// stored history that still cannot be decoded is copied to
    /// `<orders key>.corrupt` before being replaced. The extended order
    /// history is then written. Only once it is stored are the history and
    /// cart updated in memory and the empty cart written.
    ///
    /// # Errors
    ///
    /// - [`CartError::EmptyCart`] if there is nothing to order; nothing
    ///   changes.
    /// - [`CartError::Persistence`] if the history cannot be read, backed
    ///   up or written; nothing changes and checkout can be retried.
    /// - [`CartError::Persistence`] if only the cart write fails; the order
    ///   is placed and is the last entry of [`orders`](Self::orders).
    #[instrument(skip(self), fields(lines = self.items.len()))]
    pub fn checkout_at(&mut self, at: DateTime<Utc>) -> Result<Order> {
        if self.items.is_empty() {
            return Err(CartError::EmptyCart);
        }
        if !self.history_loaded {
            self.reload_history()?;
        }

        let order = Order::place(self.items.clone(), at);

        let mut history = Vec::with_capacity(self.orders.len() + 1);
        history.extend(self.orders.iter().cloned());
        history.push(order.clone());

        if let Err(e) = write_entry(self.storage.as_mut(), &self.keys.orders, &history) {
            tracing::error!(error = %e, order_id = %order.id, "Failed to record order, cart kept");
            return Err(e.into());
        }

        self.orders = history;
        self.items.clear();
        tracing::info!(order_id = %order.id, total = %order.total_price(), "Order placed");

        self.commit_cart()?;
        Ok(order)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line with `id`, if present.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    /// Completed orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Sum of `price * quantity` over all lines; zero when empty.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities over all lines; zero when empty.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empty or non-empty.
    #[must_use]
    pub fn status(&self) -> CartStatus {
        CartStatus::for_line_count(self.items.len())
    }

    /// A snapshot of the current cart, as observers receive it.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot<'_> {
        CartSnapshot::new(&self.items)
    }

    /// Storage keys in use.
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// The UPI URI paying [`total`](Self::total) to `payee`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] when there is nothing in the cart,
    /// or [`CartError::Payment`] when the total is zero.
    pub fn payment_uri(&self, payee: &UpiPayee) -> Result<String> {
        if self.items.is_empty() {
            return Err(CartError::EmptyCart);
        }
        Ok(payee.payment_uri(self.total())?)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Write the cart through and notify observers, in that order. Observers
    /// are notified even when the write fails.
    fn commit_cart(&mut self) -> Result<()> {
        let written = write_entry(self.storage.as_mut(), &self.keys.cart, &self.items);
        self.notify();
        written.map_err(|e| {
            tracing::warn!(error = %e, "Cart change not persisted, kept in memory");
            CartError::from(e)
        })
    }

    /// Re-read the stored order history. An undecodable value is copied to
    /// the backup key so the next history write cannot destroy it.
    fn reload_history(&mut self) -> Result<()> {
        let key = &self.keys.orders;
        if let Some(raw) = read_entry(self.storage.as_ref(), key)? {
            match decode_entry::<Order>(key, &raw) {
                Ok(orders) => self.orders = orders,
                Err(e) => {
                    let backup = self.keys.orders_backup();
                    tracing::warn!(error = %e, %backup, "Moving unreadable order history aside");
                    self.storage.set(&backup, &raw)?;
                }
            }
        }
        self.history_loaded = true;
        Ok(())
    }

    fn notify(&mut self) {
        let snapshot = CartSnapshot::new(&self.items);
        for observer in &mut self.observers {
            observer.cart_changed(&snapshot);
        }
    }
}

fn write_entry<T: Serialize>(
    storage: &mut dyn KeyValueStore,
    key: &str,
    value: &[T],
) -> std::result::Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_owned(),
        source,
    })?;
    storage.set(key, &json)
}

/// Read a raw entry; blank values count as absent.
fn read_entry(storage: &dyn KeyValueStore, key: &str) -> Result<Option<String>> {
    Ok(storage.get(key)?.filter(|raw| !raw.trim().is_empty()))
}

fn decode_entry<T: DeserializeOwned>(key: &str, raw: &str) -> Result<Vec<T>> {
    let entries: Option<Vec<T>> =
        serde_json::from_str(raw).map_err(|source| CartError::Deserialization {
            key: key.to_owned(),
            source,
        })?;
    Ok(entries.unwrap_or_default())
}

/// Decode stored cart lines one by one, dropping those that fail.
///
/// Returns the lines that decoded and the first decoding error, if any.
fn decode_lines(key: &str, raw: &str) -> (Vec<LineItem>, Option<CartError>) {
    let values = match decode_entry::<serde_json::Value>(key, raw) {
        Ok(values) => values,
        Err(e) => return (Vec::new(), Some(e)),
    };

    let mut items = Vec::with_capacity(values.len());
    let mut first_error = None;
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<LineItem>(value) {
            Ok(item) => items.push(item),
            Err(source) => {
                tracing::warn!(index, error = %source, "Dropping undecodable stored cart line");
                if first_error.is_none() {
                    first_error = Some(CartError::Deserialization {
                        key: key.to_owned(),
                        source,
                    });
                }
            }
        }
    }
    (items, first_error)
}

/// Drop lines with zero quantity or a negative price and merge repeated
/// ids into the first occurrence.
fn sanitize_items(items: Vec<LineItem>) -> Vec<LineItem> {
    let loaded = items.len();
    let mut clean: Vec<LineItem> = Vec::with_capacity(loaded);

    for item in items {
        if item.quantity == 0 || Price::validate_amount(item.price).is_err() {
            tracing::warn!(id = %item.id, "Dropping invalid stored cart line");
            continue;
        }
        if let Some(existing) = clean.iter_mut().find(|line| line.id == item.id) {
            tracing::warn!(id = %item.id, "Merging duplicate stored cart line");
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            clean.push(item);
        }
    }

    if clean.len() != loaded {
        tracing::debug!(loaded, kept = clean.len(), "Sanitized stored cart");
    }
    clean
}
