//! Marker and path overlays for static images.
//!
//! Both produce the overlay strings accepted by the Static Images API:
//! `path{-width}{+color}{-opacity}{+fill}{-fillOpacity}(polyline)` and
//! `pin-{s|l}{-label}{+color}(lon,lat)` or `url-{encoded url}(lon,lat)`.

use crate::params::{marker_overlay_params, path_overlay_params};
use crate::Result;
use mapbox_core::param::Bindings;
use mapbox_core::ParamValue;
use serde::{Deserialize, Serialize};

/// Styled path overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathOverlay {
    /// Encoded polyline, unescaped
    pub polyline: String,
    /// Stroke width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Stroke hex colour without `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Stroke opacity, 0 to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    /// Fill hex colour without `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Fill opacity, 0 to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

impl PathOverlay {
    /// Overlay for an encoded polyline.
    pub fn new(polyline: impl Into<String>) -> Self {
        Self {
            polyline: polyline.into(),
            ..Self::default()
        }
    }

    /// Positional arguments in descriptor order.
    #[must_use]
    pub fn into_args(self) -> Vec<Option<ParamValue>> {
        vec![
            Some(self.polyline.into()),
            self.stroke_width.map(Into::into),
            self.stroke_color.map(Into::into),
            self.stroke_opacity.map(Into::into),
            self.fill_color.map(Into::into),
            self.fill_opacity.map(Into::into),
        ]
    }

    /// Format as an overlay string.
    ///
    /// # Errors
    ///
    /// Returns [`mapbox_core::Error::InvalidParameter`] for a missing polyline or an invalid style.
    pub fn format(self) -> Result<String> {
        path_overlay(self.into_args())
    }
}

/// Pin or custom image marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerOverlay {
    /// Marker longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Marker latitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Large pin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<bool>,
    /// Maki icon, letter or number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Pin hex colour without `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Custom marker image URL, unescaped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_marker: Option<String>,
}

impl MarkerOverlay {
    /// Marker at a point.
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
            self.longitude.map(Into::into),
            self.latitude.map(Into::into),
            self.large.map(Into::into),
            self.label.map(Into::into),
            self.color.map(Into::into),
            self.custom_marker.map(Into::into),
        ]
    }

    /// Format as an overlay string.
    ///
    /// # Errors
    ///
    /// Returns [`mapbox_core::Error::InvalidParameter`] for an invalid coordinate or style.
    pub fn format(self) -> Result<String> {
        marker_overlay(self.into_args())
    }
}

/// Style segments of a path overlay, without the polyline.
fn path_style(bindings: &Bindings<'_>) -> Result<String> {
    let mut style = String::new();
    for (name, prefix) in [
        ("strokeWidth", '-'),
        ("strokeColor", '+'),
        ("strokeOpacity", '-'),
        ("fillColor", '+'),
        ("fillOpacity", '-'),
    ] {
        if let Some(value) = bindings.checked(name)? {
            style.push(prefix);
            style.push_str(&value.to_string());
        }
    }
    Ok(style)
}

/// Format a path overlay from positional arguments.
///
/// # Errors
///
/// Returns [`mapbox_core::Error::InvalidParameter`] for a missing polyline or an invalid style.
pub fn path_overlay(args: Vec<Option<ParamValue>>) -> Result<String> {
    let bindings = path_overlay_params().bind_args(args)?;
    let polyline = bindings.require("polyline")?;
    let style = path_style(&bindings)?;
    Ok(format!("path{style}({polyline})"))
}

/// Format a marker overlay from positional arguments.
///
/// A custom marker URL replaces the pin size, label and colour.
///
/// # Errors
///
/// Returns [`mapbox_core::Error::InvalidParameter`] for an invalid coordinate or style.
pub fn marker_overlay(args: Vec<Option<ParamValue>>) -> Result<String> {
    let bindings = marker_overlay_params().bind_args(args)?;
    let position = format!(
        "({},{})",
        bindings.require("longitude")?,
        bindings.require("latitude")?
    );

    if let Some(url) = bindings.checked("customMarker")? {
        return Ok(format!("url-{url}{position}"));
    }

    let mut marker = bindings.require("large")?.to_string();
    if let Some(label) = bindings.checked("label")? {
        marker.push('-');
        marker.push_str(&label.to_string());
    }
    if let Some(color) = bindings.checked("color")? {
        marker.push('+');
        marker.push_str(&color.to_string());
    }
    Ok(format!("{marker}{position}"))
}
