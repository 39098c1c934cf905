//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `NUCART_STORAGE_PATH` - File backing the storage slot (default: `.nucart/storage.json`)
//! - `NUCART_STORAGE_KEY` - Name of the cart slot (default: `cart`)
//! - `NUCART_CURRENCY_PREFIX` - Text shown before prices (default: `Nu.`)
//! - `NUCART_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::str::FromStr;

use nucart_core::PriceFormat;
use thiserror::Error;

const DEFAULT_STORAGE_PATH: &str = ".nucart/storage.json";

/// Default name of the storage slot holding the cart.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// File holding the key-value store
    pub storage_path: PathBuf,
    /// Slot name for the cart
    pub storage_key: String,
    /// Price display settings
    pub price_format: PriceFormat,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            price_format: PriceFormat::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl WidgetConfig {
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

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage_path = PathBuf::from(get_or_default("NUCART_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        if storage_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "NUCART_STORAGE_PATH".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let storage_key = get_or_default("NUCART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "NUCART_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let price_format = PriceFormat::new(get_or_default(
            "NUCART_CURRENCY_PREFIX",
            PriceFormat::DEFAULT_PREFIX,
        ));

        let log_format = get_or_default("NUCART_LOG_FORMAT", "pretty")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("NUCART_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            storage_path,
            storage_key,
            price_format,
            log_format,
        })
    }
}
