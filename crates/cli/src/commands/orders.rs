//! Checkout, order history and payment commands.

use metro_bites_cart::{CartError, CartStore, render};

use super::emit;
use crate::config::CliConfig;

/// Place an order for the cart.
pub fn checkout(cart: &mut CartStore) -> Result<(), CartError> {
    let order = cart.checkout()?;
    emit("Order Placed Successfully! Thank you.");
    emit(&render::order_text(&order));
    Ok(())
}

/// Print past orders, oldest first.
pub fn history(cart: &CartStore) {
    if cart.orders().is_empty() {
        emit("No orders yet.");
        return;
    }
    for order in cart.orders() {
        emit(&render::order_text(order));
    }
}

/// Print the UPI payment URI for the cart total.
pub fn pay(cart: &CartStore, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let payee = config.require_payee()?;
    let uri = cart.payment_uri(payee)?;
    tracing::info!(total = %cart.total(), "Generated payment link");
    emit(&uri);
    Ok(())
}
