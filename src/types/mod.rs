//! Type definitions for the storefront

use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::StorefrontError;

pub mod product_catalog;

/// Storage key the cart is persisted under.
pub const DEFAULT_CART_KEY: &str = "facyas-cart";

/// Currency used for price display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// ISO 4217 code.
    pub code:   String,
    /// Symbol prefixed to amounts.
    pub symbol: String,
    /// Display locale.
    pub locale: String,
}

impl CurrencyConfig {
    /// US Dollar.
    #[must_use]
    pub fn usd() -> Self {
        Self { code: "USD".to_string(), symbol: "$".to_string(), locale: "en-US".to_string() }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self::usd()
    }
}

/// Storefront configuration.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Shop name
    pub site_name:   String,
    /// Key the cart is persisted under
    pub cart_key:    String,
    /// Directory backing the file store
    pub storage_dir: PathBuf,
    /// Display currency
    pub currency:    CurrencyConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            site_name:   "Facyas".to_string(),
            cart_key:    DEFAULT_CART_KEY.to_string(),
            storage_dir: PathBuf::from(".facyas"),
            currency:    CurrencyConfig::usd(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ConfigRead` when the file cannot be read and
    /// `StorefrontError::ConfigParse` when it is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, StorefrontError> {
        let raw = fs::read_to_string(path).map_err(|source| StorefrontError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| {
            StorefrontError::ConfigParse { path: path.to_path_buf(), source }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, StorefrontError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Checks the configuration is usable.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.cart_key.trim().is_empty() {
            return Err(StorefrontError::ValidationError("cart_key must not be empty".into()));
        }
        if self.currency.code.len() != 3 {
            return Err(StorefrontError::ValidationError(format!(
                "currency code {:?} is not an ISO 4217 code",
                self.currency.code
            )));
        }
        Ok(())
    }
}
