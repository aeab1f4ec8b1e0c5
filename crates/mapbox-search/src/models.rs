//! Geocoding response models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of a forward or reverse geocode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodingResponse {
    /// Always `FeatureCollection`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Tokens of the search text, or the coordinates of a reverse query.
    #[serde(default)]
    pub query: Vec<Value>,
    /// Matching features, most relevant first.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Attribution notice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl GeocodingResponse {
    /// Centre of the first feature as `(longitude, latitude)`.
    #[must_use]
    pub fn first_center(&self) -> Option<(f64, f64)> {
        self.features.first().and_then(Feature::center_pair)
    }
}

/// A single geocoding result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Feature identifier.
    pub id: String,
    /// Always `Feature`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Feature types, e.g. `poi` or `place`.
    #[serde(default)]
    pub place_type: Vec<String>,
    /// Relevance score between 0 and 1.
    #[serde(default)]
    pub relevance: f64,
    /// House number for address features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Additional properties.
    #[serde(default)]
    pub properties: PlaceProperties,
    /// Feature name.
    #[serde(default)]
    pub text: String,
    /// Full place name.
    #[serde(default)]
    pub place_name: String,
    /// Matched text, when it differs from `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_text: Option<String>,
    /// Matched place name, when it differs from `place_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_place_name: Option<String>,
    /// Language of `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Bounding box `[minLon, minLat, maxLon, maxLat]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    /// Centre `[longitude, latitude]`.
    #[serde(default)]
    pub center: Vec<f64>,
    /// GeoJSON geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    /// Parent features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<Value>>,
    /// Routable points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routable_points: Option<Value>,
}

impl Feature {
    /// Centre as `(longitude, latitude)`.
    #[must_use]
    pub fn center_pair(&self) -> Option<(f64, f64)> {
        match self.center.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        }
    }
}

/// Extra feature properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaceProperties {
    /// Address accuracy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
    /// Street address of a POI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// POI categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Maki icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maki: Option<String>,
    /// Wikidata identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikidata: Option<String>,
    /// ISO 3166 code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_code: Option<String>,
}

/// GeoJSON geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Geometry {
    /// Geometry type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Coordinates, shape depends on the type.
    #[serde(default)]
    pub coordinates: Value,
}

/// Autocomplete entry produced from a forward search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    /// Display name.
    pub place_name: String,
    /// Centre as `longitude,latitude`.
    pub center: String,
}

impl From<&Feature> for Suggestion {
    fn from(feature: &Feature) -> Self {
        let center = feature
            .center
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            place_name: feature.place_name.clone(),
            center,
        }
    }
}
