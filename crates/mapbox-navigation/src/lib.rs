//! Directions and isochrone client for Mapbox.
//!
//! Provides the navigation descriptor sets, typed requests and response
//! models, and an asynchronous client.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod params;

pub use client::NavigationClient;
pub use models::{DirectionsResponse, IsochroneResponse, Route, RouteLeg, RouteStep, Waypoint};
pub use params::{directions_params, isochrone_params, DirectionsRequest, IsochroneRequest};

/// Convenient result alias that reuses the shared Mapbox error type.
pub type Result<T> = mapbox_core::Result<T>;
