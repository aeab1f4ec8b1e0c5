//! Asynchronous geocoding client.

use crate::models::{GeocodingResponse, Suggestion};
use crate::params::{geocode_params, GeocodeRequest, QUERY};
use crate::Result;
use mapbox_core::encoding::encode_component;
use mapbox_core::{GeocodeMode, MapboxClient, MapboxConfig, ParamValue};

const ENDPOINT: &str = "geocoding/v5";
const DATASET: &str = "mapbox.places";

/// Client for the Mapbox Geocoding API.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    inner: MapboxClient,
}

impl GeocodingClient {
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

    /// Forward or reverse geocode, depending on whether the query is a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`mapbox_core::Error::InvalidParameter`] for invalid arguments or an API error.
    pub async fn search(&self, request: GeocodeRequest) -> Result<GeocodingResponse> {
        self.search_args(request.into_args()).await
    }

    /// Geocode from positional arguments in descriptor order.
    ///
    /// # Errors
    ///
    /// Returns [`mapbox_core::Error::InvalidParameter`] for invalid arguments or an API error.
    pub async fn search_args(&self, args: Vec<Option<ParamValue>>) -> Result<GeocodingResponse> {
        let bindings = geocode_params().bind_args(args)?;
        let query = bindings.require(QUERY)?.to_string();

        let mode = GeocodeMode::classify(&query);
        let params = bindings.assemble(Some(mode))?;

        self.inner
            .request(ENDPOINT)
            .path(format!("{DATASET}/{}.json", encode_component(&query)))
            .query(params)
            .get_json()
            .await
    }

    /// Autocomplete suggestions for partial text, biased by IP location.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying search fails.
    pub async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>> {
        let request = GeocodeRequest {
            autocomplete: Some(true),
            proximity: Some("ip".to_string()),
            ..GeocodeRequest::new(text)
        };
        let response = self.search(request).await?;
        Ok(response.features.iter().map(Suggestion::from).collect())
    }
}
