//! Client configuration
//!
//! Both clients are built once from a [`ClientConfig`] and never reconfigured.
//! Base addresses come from defaults, then environment variables, then
//! whatever the front end layers on top.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Default base address of the local application server
pub const DEFAULT_LOCAL_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Marketplace address used when nothing is configured; calls against it fail
pub const PLACEHOLDER_MARKET_BASE_URL: &str = "https://your-server.com/api/market";

/// Client-wide request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Timeout for AI file parsing in milliseconds
pub const FILE_PARSE_TIMEOUT_MS: u64 = 120_000;

/// Environment variable overriding the local server address
pub const LOCAL_URL_ENV: &str = "QBANK_LOCAL_API_URL";

/// Environment variable overriding the marketplace address
pub const MARKET_URL_ENV: &str = "QBANK_MARKET_API_URL";

/// Settings shared by the local and market clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address of the local application server
    pub local_base_url: String,

    /// Base address of the marketplace service
    pub market_base_url: String,

    /// Timeout applied to every call without an override
    pub default_timeout_ms: u64,

    /// Timeout applied to AI file parsing
    pub file_parse_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            local_base_url: DEFAULT_LOCAL_BASE_URL.to_string(),
            market_base_url: PLACEHOLDER_MARKET_BASE_URL.to_string(),
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            file_parse_timeout_ms: FILE_PARSE_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply base-address overrides from a variable lookup.
    ///
    /// Empty values count as unset.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value_of = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = value_of(LOCAL_URL_ENV) {
            self.local_base_url = url;
        }
        if let Some(url) = value_of(MARKET_URL_ENV) {
            self.market_base_url = url;
        }
        self
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    pub fn file_parse_timeout(&self) -> Duration {
        Duration::from_millis(self.file_parse_timeout_ms)
    }

    /// Whether the marketplace address was never configured
    pub fn market_is_placeholder(&self) -> bool {
        self.market_base_url.trim_end_matches('/') == PLACEHOLDER_MARKET_BASE_URL
    }

    /// Validate addresses and timeouts
    pub fn validate(&self) -> Result<()> {
        validate_base_url("local_base_url", &self.local_base_url)?;
        validate_base_url("market_base_url", &self.market_base_url)?;

        if self.default_timeout_ms == 0 {
            return Err(Error::configuration("default_timeout_ms cannot be zero"));
        }
        if self.file_parse_timeout_ms == 0 {
            return Err(Error::configuration("file_parse_timeout_ms cannot be zero"));
        }
        Ok(())
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::Configuration {
        message: format!("Invalid {}: {}", field, value),
        source: Some(e.into()),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::configuration(format!(
            "Unsupported scheme '{}' in {}",
            scheme, field
        ))),
    }
}
