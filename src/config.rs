//! Client configuration module
//!
//! Holds the hosted store's base URL and the bearer token for the signed-in
//! user. The base URL comes from `FIZIKHUB_API_URL` when set, with a local
//! development default otherwise.

use thiserror::Error;
use uuid::Uuid;

/// Default store URL for local development
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Environment variable overriding the store URL
const BASE_URL_ENV: &str = "FIZIKHUB_API_URL";

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: normalize_base_url(base_url),
            token: None,
        }
    }
}

impl Config {
    /// Create a new configuration from the environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ConfigBuilder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Set the bearer token after sign-in
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the bearer token
    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    /// Clear the token (sign-out)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the full URL for a store endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Get the realtime feed URL for a conversation
    pub fn feed_url(&self, conversation_id: Uuid) -> String {
        format!(
            "{}/realtime/conversations/{}/feed",
            self.base_url, conversation_id
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    base_url: Option<String>,
    token: Option<String>,
}

impl ConfigBuilder {
    /// Set the store base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingValue("base_url"))?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(base_url));
        }
        Ok(Config {
            base_url: normalize_base_url(base_url),
            token: self.token,
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
