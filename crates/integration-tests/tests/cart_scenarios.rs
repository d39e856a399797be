//! End-to-end cart flows.
//!
//! These tests drive a `CartStore` the way the ordering page does: hydrate,
//! add from the menu, adjust quantities, pay and check out, then reload.

#![allow(clippy::unwrap_used)]

use metro_bites_cart::storage::keys;
use metro_bites_cart::{CartError, KeyValueStore, Menu, UpiPayee};
use metro_bites_core::{CartStatus, Order};
use metro_bites_integration_tests::{memory_cart, reopen};
use rust_decimal::Decimal;

const MENU: &str = r#"[
    {"id": "idli", "name": "Idli", "price": 20},
    {"id": "vada", "name": "Medu Vada", "price": "15.50"},
    {"id": "dosa", "name": "Masala Dosa", "price": 60, "image": "assets/images/dosa.png"}
]"#;

// =============================================================================
// Ordering Flow
// =============================================================================

#[test]
fn test_full_ordering_flow() {
    let menu = Menu::from_json(MENU).unwrap();
    let (mut cart, storage) = memory_cart();
    cart.hydrate().unwrap();
    assert_eq!(cart.status(), CartStatus::Empty);

    cart.add_menu_item(menu.get("idli").unwrap()).unwrap();
    cart.add_menu_item(menu.get("idli").unwrap()).unwrap();
    cart.add_menu_item(menu.get("vada").unwrap()).unwrap();
    cart.add_menu_item(menu.get("dosa").unwrap()).unwrap();
    cart.update_quantity("dosa", -1).unwrap();
    assert_eq!(cart.status(), CartStatus::NonEmpty);

    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Decimal::new(5550, 2));

    let payee = UpiPayee::new("metro@okbank", "QuickMetroBITES").unwrap();
    assert_eq!(
        cart.payment_uri(&payee).unwrap(),
        "upi://pay?pa=metro@okbank&pn=QuickMetroBITES&am=55.50&cu=INR"
    );

    let order = cart.checkout().unwrap();
    assert_eq!(order.total, Decimal::new(5550, 2));
    assert_eq!(cart.status(), CartStatus::Empty);

    let reloaded = reopen(&storage);
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.orders(), [order]);
}

#[test]
fn test_repeated_add_scenario() {
    let (mut cart, _) = memory_cart();
    cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();
    cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.item("a").unwrap().quantity, 2);
    assert_eq!(cart.total(), Decimal::from(40));
}

#[test]
fn test_checkout_scenario() {
    let (mut cart, storage) = memory_cart();
    cart.add_item("b", "Dosa", Decimal::from(50), None).unwrap();
    cart.update_quantity("b", 1).unwrap();
    let history_before = cart.orders().len();

    let order = cart.checkout().unwrap();
    assert_eq!(order.total, Decimal::from(100));
    assert!(cart.is_empty());
    assert_eq!(cart.orders().len(), history_before + 1);

    let stored: Vec<Order> =
        serde_json::from_str(&storage.get(keys::ORDERS).unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
}

#[test]
fn test_update_by_negative_quantity_equals_remove() {
    let (mut by_update, _) = memory_cart();
    let (mut by_remove, _) = memory_cart();
    for cart in [&mut by_update, &mut by_remove] {
        cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();
        cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();
        cart.add_item("b", "Vada", Decimal::from(15), None).unwrap();
    }

    let quantity = i64::from(by_update.item("a").unwrap().quantity);
    by_update.update_quantity("a", -quantity).unwrap();
    by_remove.remove_item("a").unwrap();

    assert_eq!(by_update.items(), by_remove.items());
}

#[test]
fn test_total_matches_line_sum_through_mutations() {
    let (mut cart, _) = memory_cart();
    let steps: [(&str, i64); 6] = [("a", 3), ("b", 1), ("a", -1), ("c", 5), ("b", -4), ("c", 2)];
    for id in ["a", "b", "c"] {
        cart.add_item(id, id, Decimal::new(1050, 2), None).unwrap();
    }

    for (id, delta) in steps {
        cart.update_quantity(id, delta).unwrap();
        let expected: Decimal = cart
            .items()
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum();
        assert_eq!(cart.total(), expected);
        assert!(cart.items().iter().all(|item| item.quantity >= 1));
    }
}

// =============================================================================
// Failure Handling
// =============================================================================

#[test]
fn test_empty_checkout_leaves_history_alone() {
    let (mut cart, storage) = memory_cart();
    cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();
    cart.checkout().unwrap();
    let stored_before = storage.get(keys::ORDERS).unwrap();

    assert!(matches!(cart.checkout(), Err(CartError::EmptyCart)));
    assert_eq!(cart.orders().len(), 1);
    assert_eq!(storage.get(keys::ORDERS).unwrap(), stored_before);
}

#[test]
fn test_session_survives_storage_outage() {
    let (mut cart, storage) = memory_cart();
    cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();

    storage.set_available(false);
    let err = cart.add_item("a", "Idli", Decimal::from(20), None).unwrap_err();
    assert!(err.is_degraded());
    assert_eq!(cart.item("a").unwrap().quantity, 2);

    storage.set_available(true);
    cart.add_item("b", "Vada", Decimal::from(15), None).unwrap();
    assert_eq!(reopen(&storage).items(), cart.items());
}

#[test]
fn test_legacy_page_data_hydrates() {
    let (_, mut storage) = memory_cart();
    storage
        .set(
            keys::CART,
            r#"[{"id":"menu_masala_dosa","name":"Masala Dosa","price":60,"image":"assets/images/logo.png","quantity":2}]"#,
        )
        .unwrap();
    storage
        .set(
            keys::ORDERS,
            r#"[{"id":"ORD-1700000000000","date":"2023-11-14T22:13:20.000Z","items":[{"id":"a","name":"Idli","price":20,"image":"assets/images/logo.png","quantity":1}],"total":20}]"#,
        )
        .unwrap();

    let cart = reopen(&storage);
    assert_eq!(cart.total(), Decimal::from(120));
    assert_eq!(cart.orders().len(), 1);
    assert_eq!(cart.orders()[0].id.as_str(), "ORD-1700000000000");
}
