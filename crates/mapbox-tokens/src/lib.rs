//! Access token utilities for Mapbox.
//!
//! Validates client-exposed tokens, looks up the account's default public
//! token and creates short-lived temporary tokens.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod params;

pub use client::TokensClient;
pub use models::{TemporaryToken, TokenCheck, TokenInfo, TokenRecord};
pub use params::{temporary_token_params, TemporaryTokenRequest};

/// Convenient result alias that reuses the shared Mapbox error type.
pub type Result<T> = mapbox_core::Result<T>;
