//! HTTP client configuration and the request builder.
//!
//! [`MapboxClient`] owns the credentials and a [`Fetcher`]. Endpoint crates
//! describe each call with a [`RequestBuilder`]:
//! `{base}{endpoint}/{username?}/{path?}?{query}&access_token=...`.

use crate::config::MapboxConfig;
use crate::encoding::encode_component;
use crate::query::QueryParams;
use crate::transport::{FetchRequest, Fetcher, HttpFetcher};
use crate::{Error, Result};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default timeout for Mapbox requests, in seconds
pub const MAPBOX_DEFAULT_TIMEOUT: u64 = 30;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response logging
    pub enable_logging: bool,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(MAPBOX_DEFAULT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_logging: true,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared client for every Mapbox endpoint.
#[derive(Clone)]
pub struct MapboxClient {
    fetcher: Arc<dyn Fetcher>,
    base_url: Url,
    access_token: SecretString,
    username: String,
    default_cache_ttl: Option<Duration>,
}

impl MapboxClient {
    /// Create a client using the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &MapboxConfig) -> Result<Self> {
        let http = ClientConfig::new().with_timeout(config.timeout());
        Self::with_http_config(config, &http)
    }

    /// Create a client with explicit HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn with_http_config(config: &MapboxConfig, http: &ClientConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(http)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Create a client around any [`Fetcher`].
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_fetcher(config: &MapboxConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        Ok(Self {
            fetcher,
            base_url: config.parse_base_url()?,
            access_token: config.access_token.clone(),
            username: config.username.clone(),
            default_cache_ttl: config.cache_ttl(),
        })
    }

    /// API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Start describing a request to `endpoint`, e.g. `styles/v1`.
    #[must_use]
    pub fn request(&self, endpoint: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            endpoint: endpoint.into(),
            append_username: false,
            path: String::new(),
            query: QueryParams::new(),
            body: None,
            token: None,
            headers: Vec::new(),
            fragment: None,
            cache_ttl: self.default_cache_ttl,
        }
    }
}

impl fmt::Debug for MapboxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapboxClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("default_cache_ttl", &self.default_cache_ttl)
            .finish_non_exhaustive()
    }
}

/// Description of one outbound call.
pub struct RequestBuilder<'a> {
    client: &'a MapboxClient,
    endpoint: String,
    append_username: bool,
    path: String,
    query: QueryParams,
    body: Option<Value>,
    token: Option<String>,
    headers: Vec<(String, String)>,
    fragment: Option<String>,
    cache_ttl: Option<Duration>,
}

impl RequestBuilder<'_> {
    /// Insert the account username after the endpoint.
    #[must_use]
    pub const fn append_username(mut self) -> Self {
        self.append_username = true;
        self
    }

    /// Append an already-encoded path below the endpoint (and username).
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Merge assembled query parameters.
    #[must_use]
    pub fn query(mut self, params: QueryParams) -> Self {
        self.query.extend(params);
        self
    }

    /// Add a single query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<crate::ParamValue>) -> Self {
        self.query.push(key, value);
        self
    }

    /// Set the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the JSON body from assembled fields.
    #[must_use]
    pub fn body_fields(self, fields: Map<String, Value>) -> Self {
        self.body(Value::Object(fields))
    }

    /// Use a different access token for this call only.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the URL fragment.
    #[must_use]
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Pass a cache lifetime hint to the transport.
    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Build the full URL, including the access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the result is not a valid URL.
    pub fn url(&self) -> Result<Url> {
        let mut raw = self.client.base_url.as_str().to_string();
        raw.push_str(self.endpoint.trim_matches('/'));
        if self.append_username {
            raw.push('/');
            raw.push_str(&encode_component(&self.client.username));
        }
        let path = self.path.trim_start_matches('/');
        if !path.is_empty() {
            raw.push('/');
            raw.push_str(path);
        }

        let mut url = Url::parse(&raw)?;
        {
            let token = self
                .token
                .as_deref()
                .unwrap_or_else(|| self.client.access_token.expose_secret());
            let mut pairs = url.query_pairs_mut();
            for (key, value) in self.query.clone().into_pairs() {
                pairs.append_pair(&key, &value);
            }
            pairs.append_pair("access_token", token);
        }
        url.set_fragment(self.fragment.as_deref());
        Ok(url)
    }

    /// Send a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the service answers with a message, or a transport error.
    pub async fn get(self) -> Result<Value> {
        self.send(Method::GET).await
    }

    /// Send a POST request with the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the service answers with a message, or a transport error.
    pub async fn post(self) -> Result<Value> {
        self.send(Method::POST).await
    }

    /// Send a PUT request with the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the service answers with a message, or a transport error.
    pub async fn put(self) -> Result<Value> {
        self.send(Method::PUT).await
    }

    /// Send a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the service answers with a message, or a transport error.
    pub async fn delete(self) -> Result<Value> {
        self.send(Method::DELETE).await
    }

    /// Send a GET request and decode the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.get().await?;
        serde_json::from_value(body).map_err(Error::from)
    }

    /// Send the request with the given method.
    ///
    /// GET and DELETE never carry a body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the service answers with a message, or a transport error.
    pub async fn send(self, method: Method) -> Result<Value> {
        let url = self.url()?;
        tracing::info!(method = %method, path = url.path(), "sending Mapbox request");
        if let Some(ttl) = self.cache_ttl {
            tracing::debug!(ttl_secs = ttl.as_secs(), "cache hint");
        }

        let body = if method == Method::POST || method == Method::PUT {
            Some(self.body.unwrap_or_else(|| Value::Object(Map::new())))
        } else {
            None
        };

        let request = FetchRequest {
            method,
            url,
            headers: self.headers,
            body,
            cache_ttl: self.cache_ttl,
        };

        let response = self.client.fetcher.fetch(request).await?;
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(map_status_to_error(response.status, &response.body))
        }
    }
}

fn map_status_to_error(status: u16, body: &Value) -> Error {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Error::Api {
            status,
            message: message.to_string(),
        };
    }

    let text = match body {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    match StatusCode::from_u16(status) {
        Ok(StatusCode::NOT_FOUND) => Error::NotFound(text),
        Ok(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
            Error::Unauthorized(format!("Mapbox authentication failed: {text}"))
        }
        Ok(
            StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT,
        ) => Error::ServiceUnavailable(format!("Mapbox temporarily unavailable: {text}")),
        Ok(code) if code.is_server_error() => {
            Error::ServiceUnavailable(format!("Mapbox server error {code}: {text}"))
        }
        _ => Error::HttpError(format!("Mapbox error {status}: {text}")),
    }
}
