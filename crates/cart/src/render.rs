//! Plain-text presentation of carts and orders.

use std::fmt::Write as _;

use metro_bites_core::{LineItem, Order, Price};

use crate::observer::CartSnapshot;

/// Text shown for a cart with no lines.
pub const EMPTY_CART_TEXT: &str = "Your cart is empty.";

fn line_text(item: &LineItem) -> String {
    format!(
        "{}  {} x {} = {}",
        item.name,
        item.unit_price(),
        item.quantity,
        Price::inr(item.line_total())
    )
}

/// Render the cart modal: one line per item followed by the total.
#[must_use]
pub fn cart_text(snapshot: &CartSnapshot<'_>) -> String {
    if snapshot.items.is_empty() {
        return EMPTY_CART_TEXT.to_owned();
    }

    let mut out = String::new();
    for item in snapshot.items {
        let _ = writeln!(out, "[{}] {}", item.id, line_text(item));
    }
    let _ = write!(
        out,
        "Total: {} ({} items)",
        snapshot.total_price(),
        snapshot.item_count
    );
    out
}

/// Render one order for the history listing.
#[must_use]
pub fn order_text(order: &Order) -> String {
    let mut out = format!(
        "{} placed {} total {}",
        order.id,
        order.date.format("%Y-%m-%d %H:%M UTC"),
        order.total_price()
    );
    for item in &order.items {
        let _ = write!(out, "\n  {}", line_text(item));
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use metro_bites_core::LineItemId;
    use rust_decimal::Decimal;

    fn idli() -> LineItem {
        let mut item = LineItem::new(LineItemId::new("a"), "Idli", Decimal::from(20), None);
        item.quantity = 2;
        item
    }

    #[test]
    fn test_empty_cart_text() {
        assert_eq!(cart_text(&CartSnapshot::new(&[])), "Your cart is empty.");
    }

    #[test]
    fn test_cart_text() {
        let items = [idli()];
        assert_eq!(
            cart_text(&CartSnapshot::new(&items)),
            "[a] Idli  ₹20.00 x 2 = ₹40.00\nTotal: ₹40.00 (2 items)"
        );
    }

    #[test]
    fn test_order_text() {
        let at: DateTime<Utc> = "2026-01-15T10:30:00Z".parse().unwrap();
        let order = Order::place(vec![idli()], at);
        let text = order_text(&order);
        assert!(text.starts_with("ORD-"));
        assert!(text.contains("placed 2026-01-15 10:30 UTC total ₹40.00"));
        assert!(text.ends_with("\n  Idli  ₹20.00 x 2 = ₹40.00"));
    }
}
