//! Geocoding client for Mapbox.
//!
//! Provides the geocoding descriptor set, typed request and response models
//! and an asynchronous client for forward and reverse lookups.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod options;
pub mod params;

pub use client::GeocodingClient;
pub use models::{Feature, GeocodingResponse, Suggestion};
pub use params::{geocode_params, GeocodeRequest};

/// Convenient result alias that reuses the shared Mapbox error type.
pub type Result<T> = mapbox_core::Result<T>;
