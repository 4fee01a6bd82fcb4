//! Storefront settings: slot names and the order backend location.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_CART_KEY: &str = "carrito_compras";
pub const DEFAULT_HISTORY_KEY: &str = "historial_compras";
pub const DEFAULT_API_BASE: &str = "https://electrohome-847j.onrender.com";

/// The backend sleeps on its free tier; short timeouts fail the first call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings shared by the store, the history and the order client.
///
/// Every field has a default, so a partial JSON document only overrides what
/// it names:
///
/// ```
/// use cart_sync::StorefrontConfig;
///
/// let config = StorefrontConfig::from_json(r#"{ "cart_key": "cart" }"#).unwrap();
/// assert_eq!(config.cart_key, "cart");
/// assert_eq!(config.history_key, "historial_compras");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Slot holding the serialized cart.
    pub cart_key: String,
    /// Slot holding the serialized order history.
    pub history_key: String,
    /// Base URL of the order backend, without trailing slash.
    pub api_base: String,
    pub request_timeout_secs: u64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            cart_key: DEFAULT_CART_KEY.to_string(),
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl StorefrontConfig {
    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn with_cart_key(mut self, key: impl Into<String>) -> Self {
        self.cart_key = key.into();
        self
    }

    pub fn with_history_key(mut self, key: impl Into<String>) -> Self {
        self.history_key = key.into();
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
