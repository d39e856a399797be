//! Change notifications.
//!
//! Presentation layers subscribe to a [`CartStore`](crate::CartStore) and
//! receive a [`CartSnapshot`] after every state change, so the store never
//! touches the UI itself.

use metro_bites_core::{CartStatus, LineItem, Price};
use rust_decimal::Decimal;

/// Read-only view of the cart handed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSnapshot<'a> {
    /// Current lines, in insertion order.
    pub items: &'a [LineItem],
    /// Sum of `price * quantity`.
    pub total: Decimal,
    /// Sum of quantities (the badge count).
    pub item_count: u64,
}

impl<'a> CartSnapshot<'a> {
    /// Build a snapshot, computing the aggregates from `items`.
    #[must_use]
    pub fn new(items: &'a [LineItem]) -> Self {
        Self {
            items,
            total: items.iter().map(LineItem::line_total).sum(),
            item_count: items.iter().map(|item| u64::from(item.quantity)).sum(),
        }
    }

    /// Empty or non-empty.
    #[must_use]
    pub const fn status(&self) -> CartStatus {
        CartStatus::for_line_count(self.items.len())
    }

    /// Total with currency, for display.
    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::inr(self.total)
    }
}

/// Receives a snapshot after each cart change.
pub trait CartObserver {
    /// Called once per change, after the change is applied in memory.
    fn cart_changed(&mut self, snapshot: &CartSnapshot<'_>);
}

/// Logs the badge count and total at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CartObserver for TracingObserver {
    fn cart_changed(&mut self, snapshot: &CartSnapshot<'_>) {
        tracing::info!(
            lines = snapshot.items.len(),
            item_count = snapshot.item_count,
            total = %snapshot.total_price(),
            "Cart updated"
        );
    }
}
