//! Configuration for the Browser Use API client.
//!
//! Configuration can be set via environment variables:
//! - `BROWSER_USE_API_KEY` - Required. Your Browser Use cloud API key.
//! - `BROWSER_USE_BASE_URL` - Optional. Base URL of the v2 API. Defaults to
//!   `https://api.browser-use.com/api/v2`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Default base URL of the Browser Use v2 API.
pub const DEFAULT_BASE_URL: &str = "https://api.browser-use.com/api/v2";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Browser Use cloud API key.
    pub api_key: String,

    /// Base URL for API requests (no trailing slash required).
    pub base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `BROWSER_USE_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("BROWSER_USE_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("BROWSER_USE_API_KEY".to_string()))?;

        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "BROWSER_USE_API_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let base_url =
            std::env::var("BROWSER_USE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }

    /// Create a config with explicit values (useful for testing).
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_keeps_values() {
        let config = Config::new("bu_key", "https://api.example.com/api/v2");
        assert_eq!(config.api_key, "bu_key");
        assert_eq!(config.base_url, "https://api.example.com/api/v2");
    }
}
