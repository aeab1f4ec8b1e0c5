//! Descriptor sets and typed requests for the map endpoints.

use crate::options::{is_maki_icon, DEFAULT_STYLE};
use mapbox_core::encoding::{encode_component, strip_whitespace};
use mapbox_core::param::{common, rules};
use mapbox_core::{ParamSet, ParamSpec, ParamValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Camera positioning method for static images.
pub const POSITION: &str = "position";
/// Public token for client-exposed URLs.
pub const TOKEN: &str = "token";
/// Map style, `owner/id`.
pub const STYLE: &str = "style";
/// Image width in pixels.
pub const WIDTH: &str = "width";
/// Image height in pixels.
pub const HEIGHT: &str = "height";
/// Retina scale flag.
pub const TWO_X: &str = "twoX";
/// Attribution flag.
pub const ATTRIBUTION: &str = "attribution";
/// Logo flag.
pub const LOGO: &str = "logo";
/// Centre longitude.
pub const LONGITUDE: &str = "longitude";
/// Centre latitude.
pub const LATITUDE: &str = "latitude";
/// Zoom level.
pub const ZOOM: &str = "zoom";
/// Map rotation.
pub const BEARING: &str = "bearing";
/// Map tilt.
pub const PITCH: &str = "pitch";
/// Bounding box for `bounding box` positioning.
pub const BBOX: &str = "bbox";
/// GeoJSON overlays.
pub const GEOJSON: &str = "geoJSON";
/// Formatted marker overlays.
pub const MARKERS: &str = "markers";
/// Formatted path overlays.
pub const PATHS: &str = "paths";
/// Layer to insert overlays before.
pub const BEFORE_LAYER: &str = "before_layer";
/// Viewport padding.
pub const PADDING: &str = "padding";
/// Place name or coordinate pair to centre on.
pub const SEARCH: &str = "search";
/// Scroll zoom flag.
pub const ZOOMWHEEL: &str = "zoomwheel";
/// Title box mode.
pub const TITLE: &str = "title";
/// Draft style flag.
pub const DRAFT: &str = "draft";
/// Raster fallback flag.
pub const FALLBACK: &str = "fallback";
/// Mapbox GL JS version.
pub const GL_VERSION: &str = "mapboxGLVersion";
/// Geocoder plugin version.
pub const GEOCODER_VERSION: &str = "mapboxGLGeocoderVersion";
/// Tileset to query.
pub const TILESET: &str = "tileset";
/// Query radius in meters.
pub const RADIUS: &str = "radius";
/// Maximum number of features.
pub const LIMIT: &str = "limit";
/// Deduplicate results.
pub const DEDUPE: &str = "dedupe";
/// Geometry type filter.
pub const GEOMETRY: &str = "geometry";
/// Layer filter.
pub const LAYERS: &str = "layers";
/// Dataset identifier.
pub const DATASET_ID: &str = "dataset_id";
/// Feature identifier.
pub const FEATURE_ID: &str = "feature_id";
/// Single GeoJSON feature as text.
pub const GEOJSON_FEATURE: &str = "geoJSONFeature";

/// Accepted positioning methods.
pub const POSITIONS: &[&str] = &["center", "auto", "bounding box"];
/// Accepted title box modes.
pub const TITLES: &[&str] = &["copy", "view"];
/// Accepted tilequery geometry filters.
pub const GEOMETRIES: &[&str] = &["polygon", "linestring", "point"];
/// Tileset queried when none is given.
pub const DEFAULT_TILESET: &str = "mapbox.mapbox-streets-v8";
/// Zoom level used when none is given.
pub const DEFAULT_ZOOM: f64 = 10.0;
/// Static image width used when none is given.
pub const DEFAULT_WIDTH: u32 = 300;
/// Static image height used when none is given.
pub const DEFAULT_HEIGHT: u32 = 200;

/// How the static image camera is placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    /// Explicit centre, zoom, bearing and pitch
    #[default]
    #[serde(rename = "center")]
    Center,
    /// Fit the overlays
    #[serde(rename = "auto")]
    Auto,
    /// Fit a bounding box
    #[serde(rename = "bounding box")]
    BoundingBox,
}

impl Position {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Auto => "auto",
            Self::BoundingBox => "bounding box",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_json_text(value: &ParamValue) -> bool {
    value
        .as_str()
        .is_some_and(|s| serde_json::from_str::<serde_json::Value>(s).is_ok())
}

fn is_json_object_text(value: &ParamValue) -> bool {
    value.as_str().is_some_and(|s| {
        serde_json::from_str::<serde_json::Value>(s).is_ok_and(|v| v.is_object())
    })
}

fn geojson_overlays(value: &ParamValue) -> ParamValue {
    match value {
        ParamValue::List(items) => ParamValue::list(items.iter().map(|item| {
            format!("geojson({})", encode_component(&strip_whitespace(&item.to_string())))
        })),
        other => other.clone(),
    }
}

fn two_x(value: &ParamValue) -> ParamValue {
    ParamValue::from(if value.as_bool() == Some(true) { "@2x" } else { "" })
}

fn style() -> ParamSpec {
    ParamSpec::optional(STYLE, "The style for your map, defaults to Mapbox Streets.")
        .with_default(DEFAULT_STYLE)
        .with_rule(rules::is_text)
}

fn token() -> ParamSpec {
    ParamSpec::optional(
        TOKEN,
        "Specify a public token for client-exposed functions. Defaults to your account's \
         default public token.",
    )
    .with_rule(rules::is_text)
}

fn zoom() -> ParamSpec {
    ParamSpec::optional(
        ZOOM,
        "Zoom level; a number between 0 and 22. Fractional zoom levels will be rounded to two \
         decimal places.",
    )
    .with_default(DEFAULT_ZOOM)
    .with_rule(rules::number_between(0.0, 22.0))
}

fn bearing() -> ParamSpec {
    ParamSpec::optional(
        BEARING,
        "Bearing rotates the map around its center. A number between 0 and 360, interpreted as \
         decimal degrees. Defaults to 0.",
    )
    .with_default(0)
    .with_rule(rules::number_between(0.0, 360.0))
}

fn pitch() -> ParamSpec {
    ParamSpec::optional(
        PITCH,
        "Pitch tilts the map, producing a perspective effect. A number between 0 and 60, \
         measured in degrees. Defaults to 0.",
    )
    .with_default(0)
    .with_rule(rules::number_between(0.0, 60.0))
}

fn search() -> ParamSpec {
    ParamSpec::optional(
        SEARCH,
        "Optionally search by placename or a latitude,longitude pair instead of passing \
         coordinates.",
    )
    .with_rule(rules::is_text)
}

fn dataset_id() -> ParamSpec {
    ParamSpec::required(DATASET_ID, "The ID of the dataset.").with_rule(rules::is_text)
}

fn feature_id() -> ParamSpec {
    ParamSpec::required(
        FEATURE_ID,
        "The ID of the feature. It must match the top-level id of the GeoJSON feature, if any.",
    )
    .with_rule(rules::is_text)
}

/// Returns true for a marker label: a Maki icon, a letter or digit, or a number from 0 to 99.
#[must_use]
pub fn is_marker_label(value: &ParamValue) -> bool {
    match value {
        ParamValue::Text(s) => {
            is_maki_icon(s)
                || (s.len() == 1 && s.chars().all(|c| c.is_ascii_alphanumeric()))
                || s.parse::<u8>().is_ok_and(|n| n <= 99)
        }
        ParamValue::Number(n) => n.fract() == 0.0 && (0.0..=99.0).contains(n),
        _ => false,
    }
}

/// Descriptors for a path overlay, in positional order.
pub fn path_overlay_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParamSet::new(vec![
            ParamSpec::required(
                "polyline",
                "A path encoded with the polyline algorithm; see EncodePolyline.",
            )
            .with_rule(rules::is_text)
            .with_formatter(|v| ParamValue::Text(encode_component(&v.to_string()))),
            ParamSpec::optional("strokeWidth", "A positive number for the line stroke width.")
                .with_rule(rules::number_at_least(0.0)),
            ParamSpec::optional(
                "strokeColor",
                "A 3- or 6-digit hexadecimal color code for the line stroke.",
            )
            .with_rule(rules::is_hex_color),
            ParamSpec::optional(
                "strokeOpacity",
                "A number between 0 (transparent) and 1 (opaque) for the line stroke opacity.",
            )
            .with_rule(rules::number_between(0.0, 1.0)),
            ParamSpec::optional(
                "fillColor",
                "A 3- or 6-digit hexadecimal color code for the fill. Only used for closed \
                 paths.",
            )
            .with_rule(rules::is_hex_color),
            ParamSpec::optional(
                "fillOpacity",
                "A number between 0 (transparent) and 1 (opaque) for the fill opacity.",
            )
            .with_rule(rules::number_between(0.0, 1.0)),
        ])
    })
}

/// Descriptors for a marker overlay, in positional order.
pub fn marker_overlay_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParamSet::new(vec![
            common::longitude(),
            common::latitude(),
            ParamSpec::optional("large", "Use a large pin (true) or a small pin (false, default).")
                .with_default(false)
                .with_rule(rules::is_bool)
                .with_formatter(|v| {
                    ParamValue::from(if v.as_bool() == Some(true) { "pin-l" } else { "pin-s" })
                }),
            ParamSpec::optional(
                "label",
                "A Maki icon name, a single letter or digit, or a number between 0 and 99.",
            )
            .with_rule(is_marker_label),
            ParamSpec::optional("color", "A 3- or 6-digit hexadecimal color code for the pin.")
                .with_rule(rules::is_hex_color),
            ParamSpec::optional(
                "customMarker",
                "URL of a custom marker image. Overrides size, label and color.",
            )
            .with_rule(|v| v.as_str().is_some_and(|s| !s.trim().is_empty()))
            .with_formatter(|v| ParamValue::Text(encode_component(&v.to_string()))),
        ])
    })
}

/// Descriptors for the static image URL, in positional order.
pub fn static_image_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParamSet::new(vec![
            ParamSpec::optional(
                POSITION,
                "How to position the camera: center (coordinates, zoom, pitch and bearing), \
                 bounding box (frame four coordinates) or auto (fit the overlays).",
            )
            .with_default("center")
            .with_rule(rules::text_one_of(POSITIONS)),
            token(),
            style(),
            ParamSpec::required(WIDTH, "Width of the image; a number between 1 and 1280 pixels.")
                .with_default(DEFAULT_WIDTH)
                .with_rule(rules::number_between(1.0, 1280.0))
                .with_formatter(rules::truncate),
            ParamSpec::required(
                HEIGHT,
                "Height of the image; a number between 1 and 1280 pixels.",
            )
            .with_default(DEFAULT_HEIGHT)
            .with_rule(rules::number_between(1.0, 1280.0))
            .with_formatter(rules::truncate),
            ParamSpec::optional(
                TWO_X,
                "Render the static map at a @2x scale factor for high-density displays.",
            )
            .with_default(false)
            .with_rule(rules::is_bool)
            .with_formatter(two_x),
            ParamSpec::optional(
                ATTRIBUTION,
                "Controls whether there is attribution on the image. Defaults to true.",
            )
            .keyed()
            .with_default(true)
            .with_rule(rules::is_bool),
            ParamSpec::optional(
                LOGO,
                "Controls whether there is a Mapbox logo on the image. Defaults to true.",
            )
            .keyed()
            .with_default(true)
            .with_rule(rules::is_bool),
            common::longitude(),
            common::latitude(),
            zoom(),
            bearing(),
            pitch(),
            ParamSpec::optional(
                BBOX,
                "Four numbers in minLon,minLat,maxLon,maxLat order framing the image.",
            )
            .with_rule(rules::is_number_list)
            .with_rule(rules::list_len_between(4, 4))
            .with_formatter(rules::join),
            ParamSpec::optional(GEOJSON, "GeoJSON features or collections to draw on the map.")
                .with_rule(rules::list_all(is_json_text))
                .with_formatter(geojson_overlays),
            ParamSpec::optional(MARKERS, "Marker overlays produced by MarkerOverlay.")
                .with_rule(rules::list_all(|v| {
                    v.as_str()
                        .is_some_and(|s| s.starts_with("pin-") || s.starts_with("url-"))
                })),
            ParamSpec::optional(PATHS, "Path overlays produced by PathOverlay.")
                .with_rule(rules::list_all(|v| {
                    v.as_str().is_some_and(|s| s.starts_with("path"))
                })),
            ParamSpec::optional(
                BEFORE_LAYER,
                "Controls where the overlay is inserted in the style. All overlays will be \
                 inserted before the specified layer.",
            )
            .keyed()
            .with_rule(rules::is_text),
            ParamSpec::optional(
                PADDING,
                "Minimum padding per side of the image, as 1 to 4 integers in CSS order. Only \
                 used with auto or bounding box.",
            )
            .keyed()
            .with_rule(rules::list_len_between(1, 4))
            .with_rule(rules::list_all(rules::number_at_least(0.0)))
            .with_formatter(rules::join),
        ])
    })
}

/// Descriptors for the embeddable map URL, in positional order.
pub fn embed_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParamSet::new(vec![
            style(),
            search(),
            zoom(),
            common::latitude(),
            common::longitude(),
            bearing(),
            pitch(),
            token(),
            ParamSpec::optional(
                ZOOMWHEEL,
                "Whether a viewer can zoom the map with the mouse wheel (true, default) or not.",
            )
            .keyed()
            .with_default(true)
            .with_rule(rules::is_bool),
            ParamSpec::optional(
                TITLE,
                "Display a title box: copy (offers a Copy button) or view (offers a Sign Up \
                 button).",
            )
            .keyed()
            .with_rule(rules::text_one_of(TITLES)),
            ParamSpec::optional(DRAFT, "Retrieve the draft version of a style.")
                .with_default(false)
                .with_rule(rules::is_bool),
            ParamSpec::optional(
                FALLBACK,
                "Serve a fallback raster map (true) or not (false, default).",
            )
            .keyed()
            .with_default(false)
            .with_rule(rules::is_bool),
            ParamSpec::optional(GL_VERSION, "Version of Mapbox GL JS used to render the map.")
                .keyed()
                .with_rule(rules::is_text),
            ParamSpec::optional(
                GEOCODER_VERSION,
                "Version of the Mapbox GL geocoder plugin used for the search box.",
            )
            .keyed()
            .with_rule(rules::is_text),
        ])
    })
}

/// Descriptors for the Tilequery endpoint, in positional order.
pub fn tilequery_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParamSet::new(vec![
            ParamSpec::optional(TILESET, "The ID of the tileset being queried.")
                .with_default(DEFAULT_TILESET)
                .with_rule(rules::is_text),
            search(),
            common::latitude(),
            common::longitude(),
            ParamSpec::optional(
                RADIUS,
                "The approximate distance to query for features, in meters. Defaults to 0, \
                 which performs a point-in-polygon query.",
            )
            .keyed()
            .with_default(0)
            .with_rule(rules::number_at_least(0.0)),
            ParamSpec::optional(
                LIMIT,
                "The number of features between 1 and 50 to return. Defaults to 5.",
            )
            .keyed()
            .with_default(5)
            .with_rule(rules::number_between(0.0, 50.0))
            .with_formatter(rules::truncate),
            ParamSpec::optional(
                DEDUPE,
                "Whether the features in the result will be deduplicated (true, default) or not.",
            )
            .keyed()
            .with_default(true)
            .with_rule(rules::is_bool),
            ParamSpec::optional(
                GEOMETRY,
                "Return only a specific geometry type: polygon, linestring, or point.",
            )
            .keyed()
            .with_rule(rules::text_one_of(GEOMETRIES)),
            ParamSpec::optional(LAYERS, "Layers to query, rather than querying all layers.")
                .keyed()
                .with_rule(rules::is_text_list)
                .with_formatter(rules::join),
        ])
    })
}

/// Descriptors for inserting or replacing a dataset feature.
pub fn put_feature_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParamSet::new(vec![
            dataset_id(),
            feature_id(),
            ParamSpec::required(
                GEOJSON_FEATURE,
                "One individual GeoJSON feature, not a FeatureCollection.",
            )
            .with_rule(is_json_object_text),
        ])
    })
}

/// Descriptors for deleting a dataset feature.
pub fn delete_feature_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| ParamSet::new(vec![dataset_id(), feature_id()]))
}

/// Typed static image request. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticImageRequest {
    /// Camera positioning method
    #[serde(default)]
    pub position: Position,
    /// Public token to embed in the URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Style, `owner/id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Render at @2x
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_x: Option<bool>,
    /// Show attribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<bool>,
    /// Show the Mapbox logo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<bool>,
    /// Centre longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Centre latitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Zoom level for centre positioning, defaults to 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    /// Bearing in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    /// Pitch in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    /// `[minLon, minLat, maxLon, maxLat]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    /// GeoJSON overlays
    #[serde(default, rename = "geoJSON", skip_serializing_if = "Option::is_none")]
    pub geojson: Option<Vec<String>>,
    /// Formatted marker overlays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markers: Option<Vec<String>>,
    /// Formatted path overlays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
    /// Insert overlays before this layer
    #[serde(default, rename = "before_layer", skip_serializing_if = "Option::is_none")]
    pub before_layer: Option<String>,
    /// Padding in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Vec<u32>>,
}

impl StaticImageRequest {
    /// Request an image of the given size.
    #[must_use]
    pub fn new(position: Position, width: u32, height: u32) -> Self {
        Self {
            position,
            width,
            height,
            ..Self::default()
        }
    }

    /// Positional arguments in descriptor order.
    #[must_use]
    pub fn into_args(self) -> Vec<Option<ParamValue>> {
        vec![
            Some(self.position.as_str().into()),
            self.token.map(Into::into),
            self.style.map(Into::into),
            Some(self.width.into()),
            Some(self.height.into()),
            self.two_x.map(Into::into),
            self.attribution.map(Into::into),
            self.logo.map(Into::into),
            self.longitude.map(Into::into),
            self.latitude.map(Into::into),
            self.zoom.map(Into::into),
            self.bearing.map(Into::into),
            self.pitch.map(Into::into),
            self.bbox.map(ParamValue::list),
            self.geojson.map(Into::into),
            self.markers.map(Into::into),
            self.paths.map(Into::into),
            self.before_layer.map(Into::into),
            self.padding.map(Into::into),
        ]
    }
}

/// Typed embeddable map request. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedRequest {
    /// Style, `owner/id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Place name or `latitude,longitude` pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Zoom level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    /// Centre latitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Centre longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Bearing in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    /// Pitch in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    /// Public token to embed in the URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Mouse wheel zoom
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoomwheel: Option<bool>,
    /// `copy` or `view`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Draft style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Raster fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    /// Mapbox GL JS version
    #[serde(default, rename = "mapboxGLVersion", skip_serializing_if = "Option::is_none")]
    pub gl_version: Option<String>,
    /// Geocoder plugin version
    #[serde(
        default,
        rename = "mapboxGLGeocoderVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub geocoder_version: Option<String>,
}

impl EmbedRequest {
    /// Positional arguments in descriptor order.
    #[must_use]
    pub fn into_args(self) -> Vec<Option<ParamValue>> {
        vec![
            self.style.map(Into::into),
            self.search.map(Into::into),
            self.zoom.map(Into::into),
            self.latitude.map(Into::into),
            self.longitude.map(Into::into),
            self.bearing.map(Into::into),
            self.pitch.map(Into::into),
            self.token.map(Into::into),
            self.zoomwheel.map(Into::into),
            self.title.map(Into::into),
            self.draft.map(Into::into),
            self.fallback.map(Into::into),
            self.gl_version.map(Into::into),
            self.geocoder_version.map(Into::into),
        ]
    }
}

/// Typed tilequery request. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TilequeryRequest {
    /// Tileset ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tileset: Option<String>,
    /// Place name or `latitude,longitude` pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Query latitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Query longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Radius in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Maximum features
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Deduplicate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedupe: Option<bool>,
    /// `polygon`, `linestring` or `point`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
    /// Layers to query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<String>>,
}

impl TilequeryRequest {
    /// Query a point.
    #[must_use]
    pub fn at(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude: Some(longitude),
            latitude: Some(latitude),
            ..Self::default()
        }
    }

    /// Positional arguments in descriptor order.
    #[must_use]
    pub fn into_args(self) -> Vec<Option<ParamValue>> {
        vec![
            self.tileset.map(Into::into),
            self.search.map(Into::into),
            self.latitude.map(Into::into),
            self.longitude.map(Into::into),
            self.radius.map(Into::into),
            self.limit.map(Into::into),
            self.dedupe.map(Into::into),
            self.geometry.map(Into::into),
            self.layers.map(Into::into),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_are_well_formed() {
        for set in [
            path_overlay_params(),
            marker_overlay_params(),
            static_image_params(),
            embed_params(),
            tilequery_params(),
            put_feature_params(),
            delete_feature_params(),
        ] {
            set.check_dependencies().unwrap();
        }
    }

    #[test]
    fn typed_requests_match_descriptor_order() {
        assert_eq!(
            StaticImageRequest::new(Position::Auto, 300, 200).into_args().len(),
            static_image_params().len()
        );
        assert_eq!(EmbedRequest::default().into_args().len(), embed_params().len());
        assert_eq!(
            TilequeryRequest::at(-122.42, 37.76).into_args().len(),
            tilequery_params().len()
        );
    }

    #[test]
    fn static_image_query_defaults() {
        let bindings = static_image_params()
            .bind_args(StaticImageRequest::new(Position::Center, 300, 200).into_args())
            .unwrap();
        let params = bindings.assemble(None).unwrap();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![ATTRIBUTION, LOGO]);
        assert_eq!(bindings.require(TWO_X).unwrap(), ParamValue::from(""));
    }

    #[test]
    fn two_x_suffix() {
        let request = StaticImageRequest {
            two_x: Some(true),
            ..StaticImageRequest::new(Position::Auto, 300, 200)
        };
        let bindings = static_image_params().bind_args(request.into_args()).unwrap();
        assert_eq!(bindings.require(TWO_X).unwrap(), ParamValue::from("@2x"));
    }

    #[test]
    fn geojson_overlays_are_stripped_and_encoded() {
        let request = StaticImageRequest {
            geojson: Some(vec![r#"{"type": "Point", "coordinates": [-122.4, 37.7]}"#.into()]),
            ..StaticImageRequest::new(Position::Auto, 300, 200)
        };
        let bindings = static_image_params().bind_args(request.into_args()).unwrap();
        assert_eq!(
            bindings.require(GEOJSON).unwrap().to_string(),
            "geojson(%7B%22type%22%3A%22Point%22%2C%22coordinates%22%3A%5B-122.4%2C37.7%5D%7D)"
        );
    }

    #[test]
    fn invalid_geojson_is_rejected() {
        let request = StaticImageRequest {
            geojson: Some(vec!["{not json".into()]),
            ..StaticImageRequest::new(Position::Auto, 300, 200)
        };
        let bindings = static_image_params().bind_args(request.into_args()).unwrap();
        let err = bindings.require(GEOJSON).unwrap_err();
        assert!(err.to_string().starts_with("Entered {not json..."));
    }

    #[test]
    fn padding_is_joined() {
        let request = StaticImageRequest {
            padding: Some(vec![5, 8, 10, 7]),
            ..StaticImageRequest::new(Position::Auto, 300, 200)
        };
        let bindings = static_image_params().bind_args(request.into_args()).unwrap();
        let params = bindings.assemble(None).unwrap();
        assert_eq!(params.get(PADDING), Some(&ParamValue::from("5,8,10,7")));
    }

    #[test]
    fn image_size_is_bounded() {
        let bindings = static_image_params()
            .bind_args(StaticImageRequest::new(Position::Auto, 2000, 200).into_args())
            .unwrap();
        assert!(bindings.require(WIDTH).is_err());
    }

    #[test]
    fn embed_query_defaults() {
        let bindings = embed_params()
            .bind_args(EmbedRequest::default().into_args())
            .unwrap();
        let params = bindings.assemble(None).unwrap();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![ZOOMWHEEL, FALLBACK]);
        assert_eq!(bindings.require(STYLE).unwrap(), ParamValue::from(DEFAULT_STYLE));
    }

    #[test]
    fn embed_title_is_restricted() {
        let request = EmbedRequest {
            title: Some("hide".into()),
            ..EmbedRequest::default()
        };
        let bindings = embed_params().bind_args(request.into_args()).unwrap();
        assert!(bindings.assemble(None).is_err());
    }

    #[test]
    fn tilequery_layers_are_joined() {
        let request = TilequeryRequest {
            layers: Some(vec!["poi_label".into(), "building".into()]),
            limit: Some(10),
            ..TilequeryRequest::at(-122.42, 37.76)
        };
        let bindings = tilequery_params().bind_args(request.into_args()).unwrap();
        let params = bindings.assemble(None).unwrap();
        assert_eq!(params.get(LAYERS), Some(&ParamValue::from("poi_label,building")));
        assert_eq!(params.get(LIMIT), Some(&ParamValue::Number(10.0)));
        assert_eq!(params.get(RADIUS), Some(&ParamValue::Number(0.0)));
    }

    #[test]
    fn unbound_sets_start_from_suggested_values() {
        let image = static_image_params().bind();
        assert_eq!(image.require(ZOOM).unwrap(), ParamValue::Number(10.0));
        assert_eq!(image.require(WIDTH).unwrap(), ParamValue::Number(300.0));
        assert_eq!(image.require(HEIGHT).unwrap(), ParamValue::Number(200.0));
        assert_eq!(image.require(BEARING).unwrap(), ParamValue::Number(0.0));

        let embed = embed_params().bind();
        assert_eq!(embed.require(ZOOM).unwrap(), ParamValue::Number(10.0));

        let params = tilequery_params().bind().assemble(None).unwrap();
        assert_eq!(params.get(RADIUS), Some(&ParamValue::Number(0.0)));
        assert_eq!(params.get(LIMIT), Some(&ParamValue::Number(5.0)));
        assert_eq!(params.get(DEDUPE), Some(&ParamValue::Bool(true)));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn located_sets_take_latitude_before_longitude() {
        let embed = embed_params()
            .bind_args(vec![
                None,
                None,
                None,
                Some(ParamValue::from(40.73)),
                Some(ParamValue::from(-73.99)),
            ])
            .unwrap();
        assert_eq!(embed.require(LATITUDE).unwrap(), ParamValue::Number(40.73));
        assert_eq!(embed.require(LONGITUDE).unwrap(), ParamValue::Number(-73.99));

        let tilequery = tilequery_params()
            .bind_args(TilequeryRequest::at(-122.42, 37.76).into_args())
            .unwrap();
        assert_eq!(tilequery.require(LATITUDE).unwrap(), ParamValue::Number(37.76));
        assert_eq!(tilequery.require(LONGITUDE).unwrap(), ParamValue::Number(-122.42));
    }

    #[test]
    fn marker_labels() {
        assert!(is_marker_label(&"embassy".into()));
        assert!(is_marker_label(&"a".into()));
        assert!(is_marker_label(&"42".into()));
        assert!(is_marker_label(&ParamValue::Number(7.0)));
        assert!(!is_marker_label(&"100".into()));
        assert!(!is_marker_label(&"not-an-icon".into()));
    }

    #[test]
    fn feature_text_must_be_an_object() {
        let mut bindings = put_feature_params().bind();
        bindings.set_value(DATASET_ID, Some("ds".into())).unwrap();
        bindings.set_value(FEATURE_ID, Some("f1".into())).unwrap();
        bindings
            .set_value(GEOJSON_FEATURE, Some("[1, 2]".into()))
            .unwrap();
        assert!(bindings.require(GEOJSON_FEATURE).is_err());

        bindings
            .set_value(GEOJSON_FEATURE, Some(r#"{"type":"Feature"}"#.into()))
            .unwrap();
        assert!(bindings.require(GEOJSON_FEATURE).is_ok());
    }
}
