//! The fetch primitive and its `reqwest` implementation.
//!
//! The request layer never talks HTTP directly. It hands a [`FetchRequest`]
//! to a [`Fetcher`] and gets back the status and decoded JSON body, whatever
//! the status. Mapping non-2xx responses to errors happens in
//! [`MapboxClient`](crate::MapboxClient).

use crate::client::ClientConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// User agent sent by [`HttpFetcher`].
pub const USER_AGENT: &str = concat!("mapbox-rs/", env!("CARGO_PKG_VERSION"));

/// A single outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// HTTP method
    pub method: Method,
    /// Fully assembled URL, including the access token
    pub url: Url,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// JSON body for mutating calls
    pub body: Option<Value>,
    /// Cache lifetime hint for the transport
    pub cache_ttl: Option<Duration>,
}

impl FetchRequest {
    /// Create a request without headers, body or cache hint.
    #[must_use]
    pub const fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
            cache_ttl: None,
        }
    }
}

/// Raw response handed back by a [`Fetcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded body; `Null` when empty, a JSON string when not JSON
    pub body: Value,
}

impl FetchResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Executes HTTP requests on behalf of the request layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Send a request and return its status and body.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response could be obtained.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse>;
}

/// [`Fetcher`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    enable_logging: bool,
}

impl HttpFetcher {
    /// Build a fetcher from HTTP client settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .gzip(config.enable_compression)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            enable_logging: config.enable_logging,
        })
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    map.insert(ACCEPT, HeaderValue::from_static("application/json"));
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::HttpError(format!("Invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::HttpError(format!("Invalid header value: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        if let Some(ttl) = request.cache_ttl {
            tracing::debug!(ttl_secs = ttl.as_secs(), "cache hint not applied by reqwest transport");
        }

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(header_map(&request.headers)?);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if self.enable_logging {
            tracing::debug!(
                method = %request.method,
                path = request.url.path(),
                status,
                "received response"
            );
        }

        Ok(FetchResponse {
            status,
            body: decode_body(&text),
        })
    }
}
