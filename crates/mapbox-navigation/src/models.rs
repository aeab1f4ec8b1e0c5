//! Directions and isochrone response models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of the Directions API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionsResponse {
    /// `Ok` on success.
    pub code: String,
    /// Routes, fastest first.
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Snapped input waypoints.
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    /// Request identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// A route through all waypoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    /// Estimated travel time in seconds.
    pub duration: f64,
    /// Distance in meters.
    pub distance: f64,
    /// Weight in units of `weight_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Name of the weight profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_name: Option<String>,
    /// Polyline string or GeoJSON line, depending on `geometries`.
    #[serde(default)]
    pub geometry: Value,
    /// One leg between each pair of waypoints.
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// Route between two waypoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteLeg {
    /// Estimated travel time in seconds.
    pub duration: f64,
    /// Distance in meters.
    pub distance: f64,
    /// Weight of the leg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Summary of the most significant roads.
    #[serde(default)]
    pub summary: String,
    /// Turn-by-turn steps, when requested.
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

/// One maneuver along a leg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteStep {
    /// The maneuver starting the step.
    pub maneuver: StepManeuver,
    /// Estimated travel time in seconds.
    pub duration: f64,
    /// Distance in meters.
    pub distance: f64,
    /// Step geometry.
    #[serde(default)]
    pub geometry: Value,
    /// Road name.
    #[serde(default)]
    pub name: String,
    /// Mode of transport.
    #[serde(default)]
    pub mode: String,
}

/// Maneuver details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepManeuver {
    /// Bearing before the maneuver.
    #[serde(default)]
    pub bearing_before: f64,
    /// Bearing after the maneuver.
    #[serde(default)]
    pub bearing_after: f64,
    /// Human readable instruction.
    #[serde(default)]
    pub instruction: String,
    /// `[longitude, latitude]` of the maneuver.
    #[serde(default)]
    pub location: Vec<f64>,
    /// Direction modifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    /// Maneuver type.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Snapped waypoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    /// Street name at the snapped location.
    #[serde(default)]
    pub name: String,
    /// `[longitude, latitude]`.
    pub location: Vec<f64>,
}

/// GeoJSON feature collection returned by the Isochrone API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IsochroneResponse {
    /// Always `FeatureCollection`.
    #[serde(rename = "type")]
    pub kind: String,
    /// One feature per contour.
    #[serde(default)]
    pub features: Vec<IsochroneFeature>,
}

/// A single contour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IsochroneFeature {
    /// Contour properties such as `contour`, `color` and `metric`.
    #[serde(default)]
    pub properties: Value,
    /// Polygon or line geometry.
    #[serde(default)]
    pub geometry: Value,
}
