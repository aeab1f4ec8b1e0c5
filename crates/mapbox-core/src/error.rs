//! Error types for Mapbox operations.
//!
//! The parameter layer raises a single kind of error, [`Error::InvalidParameter`].
//! Everything else originates in the transport or the remote service.

use thiserror::Error;

/// Main error type for Mapbox operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A supplied parameter value is missing or fails validation.
    ///
    /// The message embeds the offending value and the parameter description.
    #[error("{0}")]
    InvalidParameter(String),

    /// The remote API rejected the request and returned a message.
    #[error("{message}")]
    Api {
        /// HTTP status code returned by the API
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// Lookup of a parameter name that is not declared in the set
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Mapbox is unavailable or overloaded
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Access token missing, invalid or lacking scopes
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint or URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for Mapbox operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::Api { .. } => "API_ERROR",
            Self::UnknownParameter(_) => "UNKNOWN_PARAMETER",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// Returns true if the message is meant to be shown to the end user as is.
    #[must_use]
    pub const fn is_user_visible(&self) -> bool {
        matches!(self, Self::InvalidParameter(_) | Self::Api { .. })
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::UnknownParameter(_) | Self::ConfigError(_) | Self::ParseError(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
