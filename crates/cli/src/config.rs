//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `METRO_BITES_DATA_DIR` - Directory for cart and order files (default: .metro-bites)
//! - `METRO_BITES_CART_KEY` - Storage key of the cart (default: `quickmetro_bites_cart`)
//! - `METRO_BITES_ORDERS_KEY` - Storage key of the order history (default: `quickmetro_bites_orders`)
//! - `METRO_BITES_MENU` - Path to a menu JSON file
//! - `METRO_BITES_LOG_FORMAT` - `text` or `json` (default: text)
//! - `UPI_PAYEE_VPA` - UPI address receiving payments (required by `pay`)
//! - `UPI_PAYEE_NAME` - Payee name shown in UPI apps (default: `QuickMetroBITES`)

use std::path::PathBuf;

use metro_bites_cart::{StorageKeys, UpiPayee, storage::keys};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding the storage files
    pub data_dir: PathBuf,
    /// Storage keys for the cart and the order history
    pub keys: StorageKeys,
    /// Menu file, if one is configured
    pub menu_path: Option<PathBuf>,
    /// UPI payee, if one is configured
    pub payee: Option<UpiPayee>,
    /// Log output format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let data_dir = PathBuf::from(get_or_default("METRO_BITES_DATA_DIR", ".metro-bites"));
        let storage_keys = StorageKeys::new(
            get_or_default("METRO_BITES_CART_KEY", keys::CART),
            get_or_default("METRO_BITES_ORDERS_KEY", keys::ORDERS),
        );
        if storage_keys.cart == storage_keys.orders {
            return Err(ConfigError::InvalidEnvVar(
                "METRO_BITES_ORDERS_KEY".to_string(),
                "must differ from METRO_BITES_CART_KEY".to_string(),
            ));
        }

        let menu_path = lookup("METRO_BITES_MENU")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match get_or_default("METRO_BITES_LOG_FORMAT", "text").as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "METRO_BITES_LOG_FORMAT".to_string(),
                    format!("expected text or json, got {other:?}"),
                ));
            }
        };

        let payee = match lookup("UPI_PAYEE_VPA").filter(|v| !v.trim().is_empty()) {
            Some(vpa) => {
                let name = get_or_default("UPI_PAYEE_NAME", UpiPayee::DEFAULT_NAME);
                let payee = UpiPayee::new(vpa, name).map_err(|e| {
                    ConfigError::InvalidEnvVar("UPI_PAYEE_VPA".to_string(), e.to_string())
                })?;
                Some(payee)
            }
            None => None,
        };

        Ok(Self {
            data_dir,
            keys: storage_keys,
            menu_path,
            payee,
            log_format,
        })
    }

    /// The configured payee.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `UPI_PAYEE_VPA` is not set.
    pub fn require_payee(&self) -> Result<&UpiPayee, ConfigError> {
        self.payee
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("UPI_PAYEE_VPA".to_string()))
    }

    /// The configured menu path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `METRO_BITES_MENU` is not set.
    pub fn require_menu_path(&self) -> Result<&PathBuf, ConfigError> {
        self.menu_path
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("METRO_BITES_MENU".to_string()))
    }
}
