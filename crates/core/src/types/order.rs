//! Completed orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::OrderId;
use super::line_item::LineItem;
use super::price::Price;

/// Immutable snapshot of a cart taken at checkout.
///
/// Serialized as `{id, date, items, total}` with `date` in RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order number.
    pub id: OrderId,
    /// When the order was placed.
    pub date: DateTime<Utc>,
    /// Copy of the cart lines at checkout time.
    pub items: Vec<LineItem>,
    /// Sum of line totals at checkout time.
    pub total: Decimal,
}

impl Order {
    /// Snapshot `items` as an order placed at `at`.
    #[must_use]
    pub fn place(items: Vec<LineItem>, at: DateTime<Utc>) -> Self {
        let total = items.iter().map(LineItem::line_total).sum();
        Self {
            id: OrderId::generate(at),
            date: at,
            items,
            total,
        }
    }

    /// Total number of units in the order.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Order total with currency, for display.
    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::inr(self.total)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::LineItemId;

    fn item(id: &str, price: i64, quantity: u32) -> LineItem {
        let mut item = LineItem::new(LineItemId::new(id), id, Decimal::from(price), None);
        item.quantity = quantity;
        item
    }

    #[test]
    fn test_place_computes_total() {
        let order = Order::place(vec![item("a", 20, 2), item("b", 50, 1)], Utc::now());
        assert_eq!(order.total, Decimal::from(90));
        assert_eq!(order.item_count(), 3);
        assert!(order.id.as_str().starts_with("ORD-"));
    }

    #[test]
    fn test_place_empty_total_is_zero() {
        let order = Order::place(Vec::new(), Utc::now());
        assert_eq!(order.total, Decimal::ZERO);
    }

    #[test]
    fn test_date_serializes_as_iso8601() {
        let at = DateTime::parse_from_rfc3339("2026-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let order = Order::place(vec![item("a", 20, 1)], at);
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["date"], "2026-01-15T10:30:00Z");

        let parsed: Order = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, order);
    }
}
