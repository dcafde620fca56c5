//! Client configuration and credentials.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.yookassa.ru/v3";

/// Shop credentials and endpoint configuration.
///
/// Constructed once by the caller and shared by the endpoint clients;
/// nothing here is mutated after construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub shop_id: String,
    pub secret_key: String,
    pub base_url: String,
}

impl Config {
    pub fn new(shop_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Config {
            shop_id: shop_id.into(),
            secret_key: secret_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read credentials from `YOOKASSA_SHOP_ID` / `YOOKASSA_SECRET_KEY`.
    pub fn from_env() -> Result<Self, ApiError> {
        let shop_id = env_credential("YOOKASSA_SHOP_ID")?;
        let secret_key = env_credential("YOOKASSA_SECRET_KEY")?;
        Ok(Config::new(shop_id, secret_key))
    }

    /// Override the API origin (test doubles, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `Authorization` header value: HTTP Basic over `shop_id:secret_key`.
    pub(crate) fn basic_auth(&self) -> String {
        let credentials = format!("{}:{}", self.shop_id, self.secret_key);
        format!("Basic {}", STANDARD.encode(credentials))
    }

    /// Join a request path onto the configured origin.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn env_credential(key: &str) -> Result<String, ApiError> {
    std::env::var(key).map_err(|_| ApiError::Config {
        message: format!("environment variable {} is not set", key),
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
