//! Maps client for Mapbox.
//!
//! Formats static image overlays, builds static image and embeddable map
//! URLs, and wraps the Tilequery, Styles, Tilesets and Datasets APIs.

#![deny(missing_docs)]

pub mod client;
mod data;
pub mod models;
pub mod options;
pub mod overlays;
pub mod params;
pub mod polyline;

pub use client::MapsClient;
pub use models::{Dataset, FeatureCollection, GeoJsonFeature, Style, StyleLayer, Tileset};
pub use options::{get_options, OptionList};
pub use overlays::{marker_overlay, path_overlay, MarkerOverlay, PathOverlay};
pub use params::{EmbedRequest, StaticImageRequest, TilequeryRequest};

/// Convenient result alias that reuses the shared Mapbox error type.
pub type Result<T> = mapbox_core::Result<T>;
