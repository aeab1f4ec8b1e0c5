//! # mapbox-core
//!
//! Core types and utilities for working with the Mapbox web APIs.
//!
//! This crate provides the parameter validation and formatting framework,
//! request assembly, error handling and the HTTP transport shared by the
//! endpoint crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`config`] - Credentials and endpoint configuration
//! - [`client`] - HTTP client tuning and the request builder
//! - [`transport`] - The fetch primitive and its `reqwest` implementation
//! - [`param`] - Parameter descriptors, descriptor sets and request-scoped bindings
//! - [`geo`] - Coordinate-pair classification and geocode-mode gating
//! - [`query`] - Assembled key/value parameters
//! - [`encoding`] - URL component encoding helpers

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod geo;
pub mod param;
pub mod query;
pub mod transport;

// Re-export commonly used types
pub use client::{MapboxClient, RequestBuilder};
pub use config::MapboxConfig;
pub use error::{Error, Result};
pub use geo::{GeoScope, GeocodeMode};
pub use param::{Bindings, OutputKey, ParamSet, ParamSpec, ParamValue};
pub use query::QueryParams;
