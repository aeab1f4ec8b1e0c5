//! Asynchronous token client.

use crate::models::{TemporaryToken, TokenCheck, TokenRecord};
use crate::params::{temporary_token_params, TemporaryTokenRequest, EXPIRES};
use crate::Result;
use chrono::{SecondsFormat, Utc};
use mapbox_core::{Error, MapboxClient, MapboxConfig, ParamValue};
use serde_json::Value;
use std::time::Duration;

const ENDPOINT: &str = "tokens/v2";

/// Client for the Mapbox Tokens API.
#[derive(Debug, Clone)]
pub struct TokensClient {
    inner: MapboxClient,
}

impl TokensClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &MapboxConfig) -> Result<Self> {
        Ok(Self {
            inner: MapboxClient::new(config)?,
        })
    }

    /// Wrap an existing shared client.
    #[must_use]
    pub const fn from_client(inner: MapboxClient) -> Self {
        Self { inner }
    }

    /// Returns true if `token` is valid and not a secret token.
    ///
    /// A token the API rejects as unauthorized is reported as `false`.
    ///
    /// # Errors
    ///
    /// Returns transport errors and unexpected API failures.
    pub async fn check_valid_public(&self, token: &str) -> Result<bool> {
        let result = self
            .inner
            .request(ENDPOINT)
            .token(token)
            .get_json::<TokenCheck>()
            .await;

        match result {
            Ok(check) => Ok(check.is_valid_public()),
            Err(Error::Api {
                status: 401 | 403, ..
            }
            | Error::Unauthorized(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// The account's default public token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the account has no default token.
    pub async fn default_public_token(&self) -> Result<String> {
        let records: Vec<TokenRecord> = self
            .inner
            .request(ENDPOINT)
            .append_username()
            .param("default", true)
            .get_json()
            .await?;

        records
            .into_iter()
            .next()
            .map(|record| record.token)
            .ok_or_else(|| Error::NotFound("default public token".to_string()))
    }

    /// Use `candidate` if it is a valid public token, otherwise the account default.
    ///
    /// # Errors
    ///
    /// Returns an error if the default token cannot be fetched.
    pub async fn resolve_public_token(&self, candidate: Option<&str>) -> Result<String> {
        if let Some(token) = candidate.filter(|t| !t.is_empty()) {
            if self.check_valid_public(token).await? {
                return Ok(token.to_string());
            }
            tracing::debug!("supplied token is not a valid public token, using account default");
        }
        self.default_public_token().await
    }

    /// Create a temporary token.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error or an API error.
    pub async fn generate_temporary_token(&self, request: TemporaryTokenRequest) -> Result<String> {
        self.generate_temporary_token_args(request.into_args()).await
    }

    /// Create a temporary token from positional arguments.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error or an API error.
    pub async fn generate_temporary_token_args(
        &self,
        args: Vec<Option<ParamValue>>,
    ) -> Result<String> {
        let bindings = temporary_token_params().bind_args(args)?;
        let minutes = bindings.require(EXPIRES)?.as_f64().unwrap_or_default();
        let mut body = bindings.assemble_body(None)?;
        body.insert(EXPIRES.to_string(), Value::String(expiry_timestamp(minutes)));

        let response = self
            .inner
            .request(ENDPOINT)
            .append_username()
            .body_fields(body)
            .cache_ttl(Duration::ZERO)
            .post()
            .await?;

        let token: TemporaryToken = serde_json::from_value(response)?;
        Ok(token.token)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn expiry_timestamp(minutes: f64) -> String {
    let expires = Utc::now() + chrono::Duration::milliseconds((minutes * 60_000.0) as i64);
    expires.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> TokensClient {
        let config = MapboxConfig::new("sk.account", "alice")
            .unwrap()
            .with_base_url(server.uri())
            .unwrap();
        TokensClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn check_valid_public_uses_candidate_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens/v2"))
            .and(query_param("access_token", "pk.candidate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "TokenValid",
                "token": {"usage": "pk", "user": "alice"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert!(test_client(&server)
            .check_valid_public("pk.candidate")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn check_valid_public_rejects_secret_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens/v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "TokenValid",
                "token": {"usage": "sk"}
            })))
            .mount(&server)
            .await;

        assert!(!test_client(&server)
            .check_valid_public("sk.secret")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn check_valid_public_treats_unauthorized_as_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens/v2"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "TokenInvalid"
            })))
            .mount(&server)
            .await;

        assert!(!test_client(&server)
            .check_valid_public("pk.bogus")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn default_public_token_reads_first_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens/v2/alice"))
            .and(query_param("default", "true"))
            .and(query_param("access_token", "sk.account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "ck1", "token": "pk.default", "usage": "pk", "default": true}
            ])))
            .mount(&server)
            .await;

        let token = test_client(&server).default_public_token().await.unwrap();
        assert_eq!(token, "pk.default");
    }

    #[tokio::test]
    async fn default_public_token_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens/v2/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = test_client(&server).default_public_token().await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn resolve_falls_back_to_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens/v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "TokenExpired"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tokens/v2/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"token": "pk.default"}])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert_eq!(
            client.resolve_public_token(Some("pk.old")).await.unwrap(),
            "pk.default"
        );
        assert_eq!(client.resolve_public_token(None).await.unwrap(), "pk.default");
    }

    #[tokio::test]
    async fn generate_temporary_token_posts_scopes_and_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tokens/v2/alice"))
            .and(body_partial_json(json!({"scopes": ["styles:read", "fonts:read"]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"token": "tk.temp"})))
            .expect(1)
            .mount(&server)
            .await;

        let before = Utc::now();
        let request = TemporaryTokenRequest {
            expires_minutes: Some(30.0),
            scopes: Some(vec!["styles:read".into(), "fonts:read".into()]),
        };
        let token = test_client(&server)
            .generate_temporary_token(request)
            .await
            .unwrap();
        assert_eq!(token, "tk.temp");

        let received = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&received[0].body).unwrap();
        let expires = DateTime::parse_from_rfc3339(body["expires"].as_str().unwrap()).unwrap();
        let minutes = (expires.with_timezone(&Utc) - before).num_minutes();
        assert!((29..=30).contains(&minutes), "expires in {minutes} minutes");
    }

    #[tokio::test]
    async fn generate_temporary_token_rejects_long_expiry() {
        let server = MockServer::start().await;
        let request = TemporaryTokenRequest {
            expires_minutes: Some(120.0),
            ..TemporaryTokenRequest::default()
        };
        let err = test_client(&server)
            .generate_temporary_token(request)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn expiry_timestamp_is_rfc3339_utc() {
        let stamp = expiry_timestamp(60.0);
        assert!(stamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
