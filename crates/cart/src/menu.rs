//! Menu items: the structured source for `add_item`.
//!
//! A [`Menu`] is normally loaded from JSON, so ids, names and prices are
//! known up front. [`MenuItem::from_listing`] remains for pages whose menu
//! only exists as markup text such as `Masala Dosa` / `₹60/-`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use metro_bites_core::{LineItemId, Price, PriceError};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;

/// Currency decoration around listed prices (`₹120/-`).
static PRICE_DECORATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[₹/\-]").expect("Invalid regex"));

/// Stray punctuation at either end of a listed name.
static NAME_EDGES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^a-zA-Z0-9]+|[^a-zA-Z0-9)]+$").expect("Invalid regex")
});

/// Name used when a listing has no usable text.
const FALLBACK_NAME: &str = "Item";

/// Errors loading a menu.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The menu file could not be read.
    #[error("failed to read menu {path}: {source}")]
    Io {
        /// Menu file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The menu is not valid JSON of the expected shape.
    #[error("failed to parse menu: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share an id.
    #[error("duplicate menu item id: {0}")]
    DuplicateId(LineItemId),

    /// An entry has a negative price.
    #[error("menu item {id} has an invalid price: {source}")]
    InvalidPrice {
        /// Offending entry.
        id: LineItemId,
        /// Price problem.
        #[source]
        source: PriceError,
    },
}

/// One orderable dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Cart key for the dish.
    pub id: LineItemId,
    /// Display label.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Optional image asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MenuItem {
    /// Build a menu item from the visible text of a menu listing.
    ///
    /// The price has `₹`, `/` and `-` stripped before parsing. The name is
    /// trimmed of leading non-alphanumerics and trailing characters other
    /// than alphanumerics or `)`, and becomes `Item` if nothing is left.
    /// The id is derived from the cleaned name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Price`] if the price text is not a number.
    pub fn from_listing(name_text: &str, price_text: &str) -> Result<Self, ValidationError> {
        let cleaned_price = PRICE_DECORATION_RE.replace_all(price_text, "");
        let price = Price::parse_amount(&cleaned_price)?;

        let cleaned_name = NAME_EDGES_RE.replace_all(name_text.trim(), "");
        let name = if cleaned_name.is_empty() {
            FALLBACK_NAME.to_owned()
        } else {
            cleaned_name.into_owned()
        };

        Ok(Self {
            id: LineItemId::from_display_name(&name),
            name,
            price,
            image: None,
        })
    }
}

/// An ordered list of menu items with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Build a menu, checking ids are unique and prices non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::DuplicateId`] or [`MenuError::InvalidPrice`].
    pub fn new(items: Vec<MenuItem>) -> Result<Self, MenuError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(MenuError::DuplicateId(item.id.clone()));
            }
            Price::validate_amount(item.price).map_err(|source| MenuError::InvalidPrice {
                id: item.id.clone(),
                source,
            })?;
        }
        Ok(Self { items })
    }

    /// Parse a menu from a JSON array of items.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`Menu::new`].
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Load a menu from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        let json = std::fs::read_to_string(path).map_err(|source| MenuError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let menu = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), items = menu.len(), "Loaded menu");
        Ok(menu)
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    /// All items in menu order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
