//! # Configuration State
//!
//! Stores storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PARADISE_*`)
//! 2. Config file (`storefront.toml` in the platform config dir, or `--config`)
//! 3. Defaults (this file)
//!
//! ## Example `storefront.toml`
//! ```toml
//! store_name = "Paradise Kitchen"
//! delivery_fee = "4.99"
//! tax_rate_bps = 1800
//! data_dir = "/var/lib/paradise"
//! ```
//!
//! Configuration is read-only after initialization.

use std::path::{Path, PathBuf};

use paradise_core::{
    Money, PricingPolicy, TaxRate, CART_STORAGE_KEY, FIXED_DELIVERY_FEE_CENTS, TAX_RATE_BPS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Placeholder shown for cart lines added without an image.
pub const DEFAULT_FALLBACK_IMAGE: &str = "assets/images/checkout-image-1.png";

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

const MAX_TAX_RATE_BPS: u32 = 10_000;

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists (or was named explicitly) but can't be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },

    /// The merged configuration breaks a rule.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// ConfigState
// =============================================================================

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shown in the presentation header)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Flat delivery fee, waived for pickup and empty carts
    pub delivery_fee: Money,

    /// Tax rate in basis points
    /// e.g., 1800 = 18%
    pub tax_rate_bps: u32,

    /// Directory holding the cart slot. `None` = platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Slot key the cart is stored under
    pub cart_key: String,

    /// Image reference used for lines without one
    pub fallback_image: String,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Delivery fee: $4.99
    /// - Tax: 18%
    /// - Cart key: `paradise_cart_v1`
    fn default() -> Self {
        ConfigState {
            store_name: "Paradise".to_string(),
            currency_symbol: "$".to_string(),
            delivery_fee: Money::from_cents(FIXED_DELIVERY_FEE_CENTS),
            tax_rate_bps: TAX_RATE_BPS,
            data_dir: None,
            cart_key: CART_STORAGE_KEY.to_string(),
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
        }
    }
}

/// On-disk shape of `storefront.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    store_name: Option<String>,
    currency_symbol: Option<String>,
    delivery_fee: Option<Money>,
    tax_rate_bps: Option<u32>,
    data_dir: Option<PathBuf>,
    cart_key: Option<String>,
    fallback_image: Option<String>,
}

impl ConfigState {
    /// Loads defaults, then the config file, then the environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = ConfigState::default();

        match path {
            Some(path) => config.apply_file(path)?,
            None => {
                if let Some(path) = Self::default_path().filter(|p| p.exists()) {
                    config.apply_file(&path)?;
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but never fails: a bad config is logged
    /// and replaced by the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Config failed to load, using defaults");
                ConfigState::default()
            }
        }
    }

    /// `<platform config dir>/storefront.toml`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "paradise", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Overlays the values present in a TOML file.
    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.apply_toml(&raw)?;
        debug!(?path, "Config file applied");
        Ok(())
    }

    fn apply_toml(&mut self, raw: &str) -> Result<(), ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;

        if let Some(v) = file.store_name {
            self.store_name = v;
        }
        if let Some(v) = file.currency_symbol {
            self.currency_symbol = v;
        }
        if let Some(v) = file.delivery_fee {
            self.delivery_fee = v;
        }
        if let Some(v) = file.tax_rate_bps {
            self.tax_rate_bps = v;
        }
        if let Some(v) = file.data_dir {
            self.data_dir = Some(v);
        }
        if let Some(v) = file.cart_key {
            self.cart_key = v;
        }
        if let Some(v) = file.fallback_image {
            self.fallback_image = v;
        }
        Ok(())
    }

    /// Overlays `PARADISE_*` variables read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `PARADISE_STORE_NAME`: Override store name
    /// - `PARADISE_DATA_DIR`: Directory for the cart slot
    /// - `PARADISE_DELIVERY_FEE`: Delivery fee (e.g., "4.99")
    /// - `PARADISE_TAX_RATE`: Tax rate in percent (e.g., "18")
    /// - `PARADISE_CART_KEY`: Cart slot key
    /// - `PARADISE_FALLBACK_IMAGE`: Placeholder image reference
    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store_name) = lookup("PARADISE_STORE_NAME") {
            self.store_name = store_name;
        }

        if let Some(dir) = lookup("PARADISE_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(fee) = lookup("PARADISE_DELIVERY_FEE") {
            self.delivery_fee = fee.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "PARADISE_DELIVERY_FEE",
                value: fee.clone(),
            })?;
        }

        if let Some(rate_str) = lookup("PARADISE_TAX_RATE") {
            match rate_str.trim().parse::<f64>().ok().and_then(TaxRate::from_percentage) {
                Some(rate) => self.tax_rate_bps = rate.bps(),
                None => {
                    return Err(ConfigError::InvalidEnv {
                        key: "PARADISE_TAX_RATE",
                        value: rate_str,
                    })
                }
            }
        }

        if let Some(key) = lookup("PARADISE_CART_KEY") {
            self.cart_key = key;
        }

        if let Some(image) = lookup("PARADISE_FALLBACK_IMAGE") {
            self.fallback_image = image;
        }

        Ok(())
    }

    /// Checks the merged values.
    ///
    /// ## Rules
    /// - Delivery fee is not negative
    /// - Tax rate is at most 100%
    /// - Cart key is non-empty and safe as a file name
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delivery_fee.is_negative() {
            return Err(ConfigError::Invalid(format!(
                "delivery fee cannot be negative ({})",
                self.delivery_fee
            )));
        }

        if self.tax_rate_bps > MAX_TAX_RATE_BPS {
            return Err(ConfigError::Invalid(format!(
                "tax rate {} bps exceeds {} bps",
                self.tax_rate_bps, MAX_TAX_RATE_BPS
            )));
        }

        if self.cart_key.is_empty() {
            return Err(ConfigError::Invalid("cart key cannot be empty".to_string()));
        }

        if !self
            .cart_key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Invalid(format!(
                "cart key '{}' may only contain letters, digits, '_' and '-'",
                self.cart_key
            )));
        }

        Ok(())
    }

    /// Tax rate as a core type.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Pricing policy built from the configured fee and rate.
    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy {
            delivery_fee: self.delivery_fee,
            tax_rate: self.tax_rate(),
        }
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(2387)), "$23.87");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.to_string().replacen('$', &self.currency_symbol, 1)
    }

    /// The line's image, or the configured placeholder.
    pub fn image_or_fallback(&self, image: Option<&str>) -> String {
        match image {
            Some(image) if !image.trim().is_empty() => image.to_string(),
            _ => self.fallback_image.clone(),
        }
    }
}
