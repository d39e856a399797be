//! Sessions sharing a directory-backed store.

#![allow(clippy::unwrap_used)]

use metro_bites_cart::{CartError, CartStore, FileStore, StorageKeys};
use rust_decimal::Decimal;

fn open(dir: &std::path::Path) -> (CartStore, Option<CartError>) {
    let mut cart = CartStore::new(Box::new(FileStore::open(dir).unwrap()));
    let err = cart.hydrate().err();
    (cart, err)
}

#[test]
fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (mut first, err) = open(dir.path());
    assert!(err.is_none());
    first.add_item("b", "Vada", Decimal::from(15), None).unwrap();
    first
        .add_item("a", "Idli", Decimal::new(205, 1), Some("idli.png".into()))
        .unwrap();
    first.add_item("b", "Vada", Decimal::from(15), None).unwrap();

    let (second, err) = open(dir.path());
    assert!(err.is_none());
    assert_eq!(second.items(), first.items());
    assert_eq!(second.item("a").unwrap().image, "idli.png");
}

#[test]
fn test_history_accumulates_across_sessions() {
    let dir = tempfile::tempdir().unwrap();

    for price in [10, 20, 30] {
        let (mut cart, _) = open(dir.path());
        cart.add_item("x", "Chai", Decimal::from(price), None).unwrap();
        cart.checkout().unwrap();
    }

    let (cart, _) = open(dir.path());
    let totals: Vec<Decimal> = cart.orders().iter().map(|order| order.total).collect();
    assert_eq!(totals, [Decimal::from(10), Decimal::from(20), Decimal::from(30)]);
    assert!(cart.is_empty());
}

#[test]
fn test_corrupt_file_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("quickmetro_bites_cart.json"), "not json").unwrap();

    let (mut cart, err) = open(dir.path());
    assert!(matches!(err, Some(CartError::Deserialization { .. })));
    assert!(cart.is_empty());

    cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();
    let (reloaded, err) = open(dir.path());
    assert!(err.is_none());
    assert_eq!(reloaded.item_count(), 1);
}

#[test]
fn test_custom_keys_use_separate_files() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStore::open(dir.path()).unwrap();
    let mut cart = CartStore::with_keys(
        Box::new(storage),
        StorageKeys::new("table_4", "table_4_orders"),
    );
    cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();
    cart.checkout().unwrap();

    assert!(dir.path().join("table_4.json").exists());
    assert!(dir.path().join("table_4_orders.json").exists());
    assert!(!dir.path().join("quickmetro_bites_cart.json").exists());
}

#[test]
fn test_unreadable_history_file_moved_aside_on_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let history = r#"[{"id":"ORD-1","date":"2025-01-01T10:00:00Z","items":[],"total":null}]"#;
    std::fs::write(dir.path().join("quickmetro_bites_orders.json"), history).unwrap();

    let (mut cart, err) = open(dir.path());
    assert!(matches!(err, Some(CartError::Deserialization { .. })));
    cart.add_item("a", "Idli", Decimal::from(20), None).unwrap();
    cart.checkout().unwrap();

    let backup = dir.path().join("quickmetro_bites_orders.corrupt.json");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), history);

    let (reloaded, err) = open(dir.path());
    assert!(err.is_none());
    assert_eq!(reloaded.orders().len(), 1);
    assert_eq!(reloaded.orders()[0].total, Decimal::from(20));
}
