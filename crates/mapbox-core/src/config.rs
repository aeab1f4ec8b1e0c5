//! Configuration structures for Mapbox clients.
//!
//! Credentials are supplied out of band: an access token and the account
//! username. Neither is part of the parameter layer.

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default Mapbox API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/";

/// Configuration for a Mapbox client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MapboxConfig {
    /// API base URL
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account access token
    #[serde(skip_serializing, deserialize_with = "deserialize_secret")]
    pub access_token: SecretString,

    /// Account username, used by account-scoped endpoints
    #[validate(length(min = 1))]
    pub username: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Default cache TTL hint passed to the transport, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl MapboxConfig {
    /// Create a new configuration for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is empty or validation fails.
    pub fn new(access_token: impl Into<String>, username: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: default_base_url(),
            access_token: SecretString::from(access_token.into()),
            username: username.into(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_ttl_secs: None,
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Override the API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, Error> {
        self.base_url = base_url.into();
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;
        Ok(self)
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set the default cache TTL hint in seconds.
    #[must_use]
    pub const fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.cache_ttl_secs = Some(seconds);
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the default cache TTL hint as a Duration, if set.
    #[must_use]
    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    /// Returns true if an access token has been configured.
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        !self.access_token.expose_secret().is_empty()
    }

    /// Parse the base URL, normalising it to end with a slash so endpoints join below it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let mut raw = self.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))
    }
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: SecretString::from(String::new()),
            username: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_ttl_secs: None,
        }
    }
}
