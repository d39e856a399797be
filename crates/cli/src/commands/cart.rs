//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! mb-cli add --name "Masala Dosa" --price 60
//! mb-cli update menu_masala_dosa -1
//! mb-cli remove menu_masala_dosa
//! ```

use metro_bites_cart::{CartError, CartStore, Menu, render};
use metro_bites_core::{LineItemId, Price};
use rust_decimal::Decimal;

use super::emit;
use crate::config::CliConfig;

/// Print the cart.
pub fn show(cart: &CartStore) {
    emit(&render::cart_text(&cart.snapshot()));
}

/// Print the total and item count.
pub fn total(cart: &CartStore) {
    emit(&format!(
        "{} ({} items)",
        Price::inr(cart.total()),
        cart.item_count()
    ));
}

/// Add one unit of an item, deriving the id from `name` when absent.
pub fn add(
    cart: &mut CartStore,
    id: Option<String>,
    name: &str,
    price: Decimal,
    image: Option<String>,
) -> Result<(), CartError> {
    let id = id.map_or_else(|| LineItemId::from_display_name(name), LineItemId::from);
    let item = cart.add_item(id, name, price, image)?;
    emit(&format!("{} added to cart (x{})", item.name, item.quantity));
    Ok(())
}

/// Add one unit of a dish from the configured menu.
pub fn add_from_menu(
    cart: &mut CartStore,
    config: &CliConfig,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let menu = Menu::load(config.require_menu_path()?)?;
    let menu_item = menu
        .get(id)
        .ok_or_else(|| format!("no menu item with id {id:?}"))?;
    let item = cart.add_menu_item(menu_item)?;
    emit(&format!("{} added to cart (x{})", item.name, item.quantity));
    Ok(())
}

/// Print the configured menu.
pub fn list_menu(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let menu = Menu::load(config.require_menu_path()?)?;
    if menu.is_empty() {
        emit("The menu is empty.");
    }
    for item in menu.items() {
        emit(&format!("{}  {}  {}", item.id, item.name, Price::inr(item.price)));
    }
    Ok(())
}

/// Remove an item.
pub fn remove(cart: &mut CartStore, id: &str) -> Result<(), CartError> {
    if cart.remove_item(id)? {
        emit(&format!("Removed {id}"));
    } else {
        emit(&format!("{id} is not in the cart"));
    }
    Ok(())
}

/// Change an item's quantity.
pub fn update(cart: &mut CartStore, id: &str, delta: i64) -> Result<(), CartError> {
    let present = cart.item(id).is_some();
    match cart.update_quantity(id, delta)? {
        Some(item) => emit(&format!("{} x{}", item.name, item.quantity)),
        None if present => emit(&format!("Removed {id}")),
        None => emit(&format!("{id} is not in the cart")),
    }
    Ok(())
}

/// Empty the cart.
pub fn clear(cart: &mut CartStore) -> Result<(), CartError> {
    cart.clear()?;
    emit(render::EMPTY_CART_TEXT);
    Ok(())
}
