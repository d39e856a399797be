//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing a line item key with an order number.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use metro_bites_core::define_id;
/// define_id!(TableId);
/// define_id!(CouponId);
///
/// let table = TableId::new("t-4");
/// let coupon = CouponId::new("t-4");
///
/// // These are different types, so this won't compile:
/// // let _: TableId = coupon;
/// assert_eq!(table.as_str(), coupon.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(LineItemId);
define_id!(OrderId);

impl LineItemId {
    /// Prefix for IDs derived from a menu display name.
    pub const MENU_PREFIX: &'static str = "menu_";

    /// Derive an ID from a menu display name.
    ///
    /// Every run of whitespace becomes a single `_` and the result is
    /// lowercased, so `"Masala  Dosa"` becomes `menu_masala_dosa`.
    #[must_use]
    pub fn from_display_name(name: &str) -> Self {
        let mut slug = String::with_capacity(Self::MENU_PREFIX.len() + name.len());
        slug.push_str(Self::MENU_PREFIX);

        let mut in_whitespace = false;
        for c in name.chars() {
            if c.is_whitespace() {
                if !in_whitespace {
                    slug.push('_');
                }
                in_whitespace = true;
            } else {
                slug.extend(c.to_lowercase());
                in_whitespace = false;
            }
        }

        Self(slug)
    }
}

impl OrderId {
    /// Generate a fresh order number for an order placed at `at`.
    ///
    /// The format is `ORD-<unix millis>-<8 hex chars>`: sortable by time,
    /// and the random suffix keeps two orders in the same millisecond apart.
    #[must_use]
    pub fn generate(at: DateTime<Utc>) -> Self {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        Self(format!("ORD-{}-{suffix}", at.timestamp_millis()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_display_name() {
        assert_eq!(
            LineItemId::from_display_name("Masala Dosa").as_str(),
            "menu_masala_dosa"
        );
        assert_eq!(
            LineItemId::from_display_name("Idli  Sambar\tCombo").as_str(),
            "menu_idli_sambar_combo"
        );
        assert_eq!(LineItemId::from_display_name("VADA").as_str(), "menu_vada");
    }

    #[test]
    fn test_order_id_format() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let id = OrderId::generate(at);
        let rest = id.as_str().strip_prefix("ORD-1700000000123-").unwrap();
        assert_eq!(rest.len(), 8);
        assert!(rest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_order_ids_unique_within_same_instant() {
        let at = Utc::now();
        assert_ne!(OrderId::generate(at), OrderId::generate(at));
    }

    #[test]
    fn test_serde_transparent() {
        let id = LineItemId::new("a");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a\"");
        let parsed: LineItemId = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(parsed, id);
    }
}
