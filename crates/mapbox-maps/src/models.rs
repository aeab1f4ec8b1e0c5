//! Response models for the map endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A style owned by the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Style {
    /// Style identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Owning username.
    #[serde(default)]
    pub owner: String,
    /// Style specification version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// `public` or `private`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Layers, present when a single style is fetched.
    #[serde(default)]
    pub layers: Vec<StyleLayer>,
}

impl Style {
    /// `owner/id`, the form accepted by the style parameters.
    #[must_use]
    pub fn style_ref(&self) -> String {
        format!("{}/{}", self.owner, self.id)
    }
}

/// One layer of a style.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleLayer {
    /// Layer identifier.
    pub id: String,
    /// Layer type, e.g. `fill` or `symbol`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Source name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Layer within a vector source.
    #[serde(
        rename = "source-layer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_layer: Option<String>,
}

/// A tileset owned by the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tileset {
    /// Tileset identifier, `username.id`.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// `vector` or `raster`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `public` or `private`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

/// A dataset owned by the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    /// Dataset identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Owning username.
    #[serde(default)]
    pub owner: String,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of features.
    #[serde(default)]
    pub features: u64,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Extent `[minLon, minLat, maxLon, maxLat]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Vec<f64>>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

/// A GeoJSON feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoJsonFeature {
    /// Feature identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Always `Feature`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Arbitrary properties.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// GeoJSON geometry.
    #[serde(default)]
    pub geometry: Value,
}

impl GeoJsonFeature {
    /// Distance from the query point, for tilequery results.
    #[must_use]
    pub fn tilequery_distance(&self) -> Option<f64> {
        self.properties
            .get("tilequery")
            .and_then(|t| t.get("distance"))
            .and_then(Value::as_f64)
    }

    /// Source layer, for tilequery results.
    #[must_use]
    pub fn tilequery_layer(&self) -> Option<&str> {
        self.properties
            .get("tilequery")
            .and_then(|t| t.get("layer"))
            .and_then(Value::as_str)
    }
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Always `FeatureCollection`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Member features.
    #[serde(default)]
    pub features: Vec<GeoJsonFeature>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn style_with_layers() {
        let style: Style = serde_json::from_value(json!({
            "id": "cjabc",
            "name": "Basic",
            "owner": "alice",
            "version": 8,
            "visibility": "private",
            "created": "2021-05-12T16:23:59.112Z",
            "modified": "2021-05-13T09:00:00.000Z",
            "layers": [
                {"id": "water", "type": "fill", "source": "composite", "source-layer": "water"}
            ]
        }))
        .unwrap();
        assert_eq!(style.style_ref(), "alice/cjabc");
        assert_eq!(style.layers[0].source_layer.as_deref(), Some("water"));
        assert!(style.created.is_some());
    }

    #[test]
    fn tileset_minimal() {
        let tileset: Tileset =
            serde_json::from_value(json!({"id": "alice.abc", "type": "vector"})).unwrap();
        assert_eq!(tileset.kind, "vector");
        assert!(tileset.filesize.is_none());
    }

    #[test]
    fn dataset_counts() {
        let dataset: Dataset = serde_json::from_value(json!({
            "id": "ds1",
            "name": "Parks",
            "owner": "alice",
            "features": 12,
            "size": 4096,
            "bounds": [-10.0, -10.0, 10.0, 10.0]
        }))
        .unwrap();
        assert_eq!(dataset.features, 12);
        assert_eq!(dataset.bounds.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn tilequery_helpers() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": 42,
                "geometry": {"type": "Point", "coordinates": [-122.42, 37.76]},
                "properties": {"tilequery": {"distance": 12.5, "geometry": "point", "layer": "poi_label"}}
            }]
        }))
        .unwrap();
        let feature = &collection.features[0];
        assert_eq!(feature.tilequery_distance(), Some(12.5));
        assert_eq!(feature.tilequery_layer(), Some("poi_label"));
        assert_eq!(feature.id, Some(json!(42)));
    }
}
