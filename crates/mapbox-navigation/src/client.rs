//! Asynchronous navigation client.

use crate::models::{DirectionsResponse, IsochroneResponse};
use crate::params::{
    directions_params, isochrone_params, DirectionsRequest, IsochroneRequest, COORDINATES,
    LATITUDE, LONGITUDE, PROFILE,
};
use crate::Result;
use mapbox_core::{MapboxClient, MapboxConfig, ParamValue};

const DIRECTIONS_ENDPOINT: &str = "directions/v5";
const ISOCHRONE_ENDPOINT: &str = "isochrone/v1";

/// Client for the Mapbox Directions and Isochrone APIs.
#[derive(Debug, Clone)]
pub struct NavigationClient {
    inner: MapboxClient,
}

impl NavigationClient {
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

    /// Route between two or more waypoints.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error or an API error.
    pub async fn directions(&self, request: DirectionsRequest) -> Result<DirectionsResponse> {
        self.directions_args(request.into_args()).await
    }

    /// Route from positional arguments in descriptor order.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error or an API error.
    pub async fn directions_args(
        &self,
        args: Vec<Option<ParamValue>>,
    ) -> Result<DirectionsResponse> {
        let bindings = directions_params().bind_args(args)?;
        let profile = bindings.require(PROFILE)?;
        let coordinates = bindings.require(COORDINATES)?;
        let params = bindings.assemble(None)?;

        self.inner
            .request(DIRECTIONS_ENDPOINT)
            .path(format!("mapbox/{profile}/{coordinates}"))
            .query(params)
            .get_json()
            .await
    }

    /// Areas reachable from an origin within the requested contours.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error or an API error.
    pub async fn isochrone(&self, request: IsochroneRequest) -> Result<IsochroneResponse> {
        self.isochrone_args(request.into_args()).await
    }

    /// Isochrone from positional arguments in descriptor order.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error or an API error.
    pub async fn isochrone_args(&self, args: Vec<Option<ParamValue>>) -> Result<IsochroneResponse> {
        let bindings = isochrone_params().bind_args(args)?;
        let profile = bindings.require(PROFILE)?;
        let longitude = bindings.require(LONGITUDE)?;
        let latitude = bindings.require(LATITUDE)?;
        let params = bindings.assemble(None)?;

        self.inner
            .request(ISOCHRONE_ENDPOINT)
            .path(format!("mapbox/{profile}/{longitude},{latitude}"))
            .query(params)
            .get_json()
            .await
    }
}
