//! Asynchronous maps client: static images, embeddable maps and tilequery.

use crate::models::FeatureCollection;
use crate::params::{
    embed_params, static_image_params, tilequery_params, EmbedRequest, StaticImageRequest,
    TilequeryRequest, BBOX, BEARING, DRAFT, GEOJSON, HEIGHT, LATITUDE, LONGITUDE, MARKERS,
    PADDING, PATHS, PITCH, POSITION, SEARCH, STYLE, TILESET, TOKEN, TWO_X, WIDTH, ZOOM,
};
use crate::Result;
use mapbox_core::geo::parse_coordinate_pair;
use mapbox_core::param::Bindings;
use mapbox_core::{Error, MapboxClient, MapboxConfig, ParamValue};
use mapbox_search::{GeocodeRequest, GeocodingClient};
use mapbox_tokens::TokensClient;

pub(crate) const STYLES_ENDPOINT: &str = "styles/v1";
const TILEQUERY_ENDPOINT: &str = "v4";

/// Client for the Mapbox map endpoints.
#[derive(Debug, Clone)]
pub struct MapsClient {
    pub(crate) inner: MapboxClient,
    tokens: TokensClient,
    geocoder: GeocodingClient,
}

impl MapsClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &MapboxConfig) -> Result<Self> {
        Ok(Self::from_client(MapboxClient::new(config)?))
    }

    /// Wrap an existing shared client.
    #[must_use]
    pub fn from_client(inner: MapboxClient) -> Self {
        Self {
            tokens: TokensClient::from_client(inner.clone()),
            geocoder: GeocodingClient::from_client(inner.clone()),
            inner,
        }
    }

    /// URL of a static map image.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error, or an error if no public token can be resolved.
    pub async fn static_image_url(&self, request: StaticImageRequest) -> Result<String> {
        self.static_image_url_args(request.into_args()).await
    }

    /// Static image URL from positional arguments in descriptor order.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error, or an error if no public token can be resolved.
    pub async fn static_image_url_args(&self, args: Vec<Option<ParamValue>>) -> Result<String> {
        let mut bindings = static_image_params().bind_args(args)?;

        let position = match bindings.require(POSITION)?.to_string().as_str() {
            "auto" => "auto".to_string(),
            "bounding box" => format!("[{}]", bindings.require(BBOX)?),
            _ => {
                bindings.unset(PADDING)?;
                format!(
                    "{},{},{},{},{}",
                    bindings.require(LONGITUDE)?,
                    bindings.require(LATITUDE)?,
                    bindings.require(ZOOM)?,
                    bindings.require(BEARING)?,
                    bindings.require(PITCH)?
                )
            }
        };

        let mut overlays = Vec::new();
        for name in [GEOJSON, MARKERS, PATHS] {
            if let Some(ParamValue::List(items)) = bindings.checked(name)? {
                overlays.extend(items.iter().map(ToString::to_string));
            }
        }
        let overlays = if overlays.is_empty() {
            String::new()
        } else {
            format!("{}/", overlays.join(","))
        };

        let path = format!(
            "{}/static/{overlays}{position}/{}x{}{}",
            bindings.require(STYLE)?,
            bindings.require(WIDTH)?,
            bindings.require(HEIGHT)?,
            bindings.require(TWO_X)?
        );
        let params = bindings.assemble(None)?;
        let token = self.public_token(&bindings).await?;

        let url = self
            .inner
            .request(STYLES_ENDPOINT)
            .path(path)
            .query(params)
            .token(token)
            .url()?;
        Ok(url.to_string())
    }

    /// URL of an embeddable, interactive map.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error, a geocoding error, or an error if no
    /// public token can be resolved.
    pub async fn embed_url(&self, request: EmbedRequest) -> Result<String> {
        self.embed_url_args(request.into_args()).await
    }

    /// Embeddable map URL from positional arguments in descriptor order.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error, a geocoding error, or an error if no
    /// public token can be resolved.
    pub async fn embed_url_args(&self, args: Vec<Option<ParamValue>>) -> Result<String> {
        let mut bindings = embed_params().bind_args(args)?;
        self.locate(&mut bindings).await?;

        let style = bindings.require(STYLE)?;
        let path = if bindings.require(DRAFT)?.as_bool() == Some(true) {
            format!("{style}/draft.html")
        } else {
            format!("{style}.html")
        };
        let fragment = format!(
            "{}/{}/{}/{}/{}",
            bindings.require(ZOOM)?,
            bindings.require(LATITUDE)?,
            bindings.require(LONGITUDE)?,
            bindings.require(BEARING)?,
            bindings.require(PITCH)?
        );
        let params = bindings.assemble(None)?;
        let token = self.public_token(&bindings).await?;

        let url = self
            .inner
            .request(STYLES_ENDPOINT)
            .path(path)
            .query(params)
            .token(token)
            .fragment(fragment)
            .url()?;
        Ok(url.to_string())
    }

    /// Features of a tileset near a point.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error, a geocoding error or an API error.
    pub async fn tilequery(&self, request: TilequeryRequest) -> Result<FeatureCollection> {
        self.tilequery_args(request.into_args()).await
    }

    /// Tilequery from positional arguments in descriptor order.
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error, a geocoding error or an API error.
    pub async fn tilequery_args(&self, args: Vec<Option<ParamValue>>) -> Result<FeatureCollection> {
        let mut bindings = tilequery_params().bind_args(args)?;
        self.locate(&mut bindings).await?;

        let path = format!(
            "{}/tilequery/{},{}.json",
            bindings.require(TILESET)?,
            bindings.require(LONGITUDE)?,
            bindings.require(LATITUDE)?
        );
        let params = bindings.assemble(None)?;

        self.inner
            .request(TILEQUERY_ENDPOINT)
            .path(path)
            .query(params)
            .get_json()
            .await
    }

    /// Replace longitude and latitude with the location named by `search`, if set.
    ///
    /// A coordinate pair is read as `latitude,longitude`; other text is
    /// forward geocoded and the first match is used.
    async fn locate(&self, bindings: &mut Bindings<'_>) -> Result<()> {
        let Some(search) = bindings.checked(SEARCH)? else {
            return Ok(());
        };
        let text = search.to_string();

        let (longitude, latitude) = if let Some((lat, lon)) = parse_coordinate_pair(&text) {
            (lon, lat)
        } else {
            self.geocoder
                .search(GeocodeRequest::new(text.as_str()))
                .await?
                .first_center()
                .ok_or_else(|| Error::NotFound(format!("No place matches {text}")))?
        };
        tracing::debug!(longitude, latitude, "resolved search location");

        bindings.set_value(LONGITUDE, Some(longitude.into()))?;
        bindings.set_value(LATITUDE, Some(latitude.into()))?;
        Ok(())
    }

    async fn public_token(&self, bindings: &Bindings<'_>) -> Result<String> {
        let candidate = bindings.checked(TOKEN)?.map(|v| v.to_string());
        self.tokens.resolve_public_token(candidate.as_deref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Position;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> MapsClient {
        let config = MapboxConfig::new("sk.account", "alice")
            .unwrap()
            .with_base_url(server.uri())
            .unwrap();
        MapsClient::new(&config).unwrap()
    }

    async fn mount_default_token(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/tokens/v2/alice"))
            .and(query_param("default", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "ck1", "token": "pk.default", "usage": "pk", "default": true}
            ])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn static_image_centered_with_geojson() {
        let server = MockServer::start().await;
        mount_default_token(&server).await;

        let request = StaticImageRequest {
            longitude: Some(-122.3486),
            latitude: Some(37.8169),
            zoom: Some(9.0),
            geojson: Some(vec![
                r#"{"type":"Point","coordinates":[-122.4285,37.763658]}"#.into(),
            ]),
            padding: Some(vec![5]),
            ..StaticImageRequest::new(Position::Center, 300, 200)
        };
        let url = test_client(&server).static_image_url(request).await.unwrap();
        assert_eq!(
            url,
            format!(
                "{}/styles/v1/mapbox/streets-v11/static/\
                 geojson(%7B%22type%22%3A%22Point%22%2C%22coordinates%22%3A%5B-122.4285%2C37.763658%5D%7D)/\
                 -122.3486,37.8169,9,0,0/300x200?attribution=true&logo=true&access_token=pk.default",
                server.uri()
            )
        );
    }

    #[tokio::test]
    async fn static_image_auto_keeps_padding_and_overlays() {
        let server = MockServer::start().await;
        mount_default_token(&server).await;

        let request = StaticImageRequest {
            two_x: Some(true),
            markers: Some(vec!["pin-s(-74.0021,40.7338)".into()]),
            paths: Some(vec!["path-5+f44(abc)".into()]),
            padding: Some(vec![5, 8]),
            logo: Some(false),
            ..StaticImageRequest::new(Position::Auto, 600, 400)
        };
        let url = test_client(&server).static_image_url(request).await.unwrap();
        assert!(url.contains(
            "/static/pin-s(-74.0021,40.7338),path-5+f44(abc)/auto/600x400@2x?"
        ));
        assert!(url.contains("logo=false"));
        assert!(url.contains("padding=5%2C8"));
    }

    #[tokio::test]
    async fn static_image_bounding_box() {
        let server = MockServer::start().await;
        mount_default_token(&server).await;

        let request = StaticImageRequest {
            bbox: Some([-77.08, 38.87, -76.99, 38.93]),
            ..StaticImageRequest::new(Position::BoundingBox, 300, 200)
        };
        let url = test_client(&server).static_image_url(request).await.unwrap();
        assert!(url.contains("/static/[-77.08,38.87,-76.99,38.93]/300x200?"));
    }

    #[tokio::test]
    async fn static_image_bounding_box_needs_bbox() {
        let server = MockServer::start().await;
        let err = test_client(&server)
            .static_image_url(StaticImageRequest::new(Position::BoundingBox, 300, 200))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Entered no value...Four numbers"));
    }

    #[tokio::test]
    async fn static_image_center_uses_default_zoom() {
        let server = MockServer::start().await;
        mount_default_token(&server).await;

        let request = StaticImageRequest {
            longitude: Some(-122.3486),
            latitude: Some(37.8169),
            ..StaticImageRequest::new(Position::Center, 300, 200)
        };
        let url = test_client(&server).static_image_url(request).await.unwrap();
        assert!(url.contains("/static/-122.3486,37.8169,10,0,0/300x200?"));
    }

    #[tokio::test]
    async fn static_image_center_rejects_bad_zoom() {
        let server = MockServer::start().await;
        let request = StaticImageRequest {
            zoom: Some(23.0),
            ..StaticImageRequest::new(Position::Center, 300, 200)
        };
        let err = test_client(&server).static_image_url(request).await.unwrap_err();
        assert!(err.to_string().starts_with("Entered 23...Zoom level"));
    }

    #[tokio::test]
    async fn supplied_public_token_is_used_once_checked() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokens/v2"))
            .and(query_param("access_token", "pk.mine"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": "TokenValid",
                "token": {"usage": "pk", "user": "alice"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = StaticImageRequest {
            token: Some("pk.mine".into()),
            ..StaticImageRequest::new(Position::Auto, 300, 200)
        };
        let url = test_client(&server).static_image_url(request).await.unwrap();
        assert!(url.ends_with("access_token=pk.mine"));
    }

    #[tokio::test]
    async fn embed_with_coordinate_search() {
        let server = MockServer::start().await;
        mount_default_token(&server).await;

        let request = EmbedRequest {
            search: Some("40.7306,-73.9866".into()),
            zoom: Some(12.0),
            ..EmbedRequest::default()
        };
        let url = test_client(&server).embed_url(request).await.unwrap();
        assert_eq!(
            url,
            format!(
                "{}/styles/v1/mapbox/streets-v11.html?zoomwheel=true&fallback=false\
                 &access_token=pk.default#12/40.7306/-73.9866/0/0",
                server.uri()
            )
        );
    }

    #[tokio::test]
    async fn embed_without_arguments() {
        let server = MockServer::start().await;
        mount_default_token(&server).await;

        let url = test_client(&server)
            .embed_url(EmbedRequest::default())
            .await
            .unwrap();
        assert!(url.contains(
            "/styles/v1/mapbox/streets-v11.html?zoomwheel=true&fallback=false\
             &access_token=pk.default#10/"
        ));
    }

    #[tokio::test]
    async fn embed_draft_with_place_search() {
        let server = MockServer::start().await;
        mount_default_token(&server).await;
        Mock::given(method("GET"))
            .and(path("/geocoding/v5/mapbox.places/central%20park.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "FeatureCollection",
                "query": ["central", "park"],
                "features": [{
                    "id": "poi.1",
                    "type": "Feature",
                    "place_name": "Central Park, New York",
                    "center": [-73.9654, 40.7829]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = EmbedRequest {
            search: Some("central park".into()),
            zoom: Some(14.0),
            draft: Some(true),
            title: Some("view".into()),
            ..EmbedRequest::default()
        };
        let url = test_client(&server).embed_url(request).await.unwrap();
        assert!(url.contains("/styles/v1/mapbox/streets-v11/draft.html?"));
        assert!(url.contains("title=view"));
        assert!(url.ends_with("#14/40.7829/-73.9654/0/0"));
    }

    #[tokio::test]
    async fn embed_search_without_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocoding/v5/mapbox.places/nowhere.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "FeatureCollection",
                "features": []
            })))
            .mount(&server)
            .await;

        let request = EmbedRequest {
            search: Some("nowhere".into()),
            zoom: Some(3.0),
            ..EmbedRequest::default()
        };
        let err = test_client(&server).embed_url(request).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn tilequery_at_point() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/v4/mapbox.mapbox-streets-v8/tilequery/-122.42,37.76.json",
            ))
            .and(query_param("radius", "10"))
            .and(query_param("limit", "5"))
            .and(query_param("dedupe", "true"))
            .and(query_param("layers", "poi_label"))
            .and(query_param("access_token", "sk.account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-122.42, 37.76]},
                    "properties": {"tilequery": {"distance": 3.2, "layer": "poi_label"}}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = TilequeryRequest {
            radius: Some(10.0),
            layers: Some(vec!["poi_label".into()]),
            ..TilequeryRequest::at(-122.42, 37.76)
        };
        let result = test_client(&server).tilequery(request).await.unwrap();
        assert_eq!(result.features.len(), 1);
        assert_eq!(result.features[0].tilequery_distance(), Some(3.2));
    }

    #[tokio::test]
    async fn tilequery_with_coordinate_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/alice.parks/tilequery/-122.42,37.76.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "FeatureCollection",
                "features": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = TilequeryRequest {
            tileset: Some("alice.parks".into()),
            search: Some("37.76,-122.42".into()),
            ..TilequeryRequest::default()
        };
        let result = test_client(&server).tilequery(request).await.unwrap();
        assert!(result.features.is_empty());
    }

    #[tokio::test]
    async fn tilequery_limit_is_bounded() {
        let server = MockServer::start().await;
        let request = TilequeryRequest {
            limit: Some(51),
            ..TilequeryRequest::at(0.0, 0.0)
        };
        let err = test_client(&server).tilequery(request).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
