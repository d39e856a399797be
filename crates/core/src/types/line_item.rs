//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::LineItemId;
use super::price::Price;

/// Image shown for items added without one.
pub const DEFAULT_IMAGE: &str = "assets/images/logo.png";

/// A single line in the cart.
///
/// Serialized as `{id, name, price, image, quantity}`, the shape the
/// ordering page keeps in local storage. `price` is written as a decimal
/// string and accepted back as either a string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Key of the item within the cart.
    pub id: LineItemId,
    /// Display label.
    pub name: String,
    /// Unit price, never negative.
    pub price: Decimal,
    /// Image asset reference.
    #[serde(default = "default_image")]
    pub image: String,
    /// Number of units, at least 1 while the item is in a cart.
    pub quantity: u32,
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_owned()
}

impl LineItem {
    /// Create a line item with quantity 1.
    ///
    /// `image` falls back to [`DEFAULT_IMAGE`] when `None` or blank.
    #[must_use]
    pub fn new(
        id: LineItemId,
        name: impl Into<String>,
        price: Decimal,
        image: Option<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: image
                .filter(|img| !img.trim().is_empty())
                .unwrap_or_else(default_image),
            quantity: 1,
        }
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Unit price with currency, for display.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::inr(self.price)
    }
}
