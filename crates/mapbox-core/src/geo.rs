//! Coordinate-pair classification and geocode-mode gating.
//!
//! A search text that is a strict `latitude,longitude` pair makes the request
//! a reverse geocode; anything else is a forward geocode. Descriptors carry a
//! [`GeoScope`] saying which of the two modes they take part in.

use lazy_regex::regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a geocoding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocodeMode {
    /// Free-text search
    Forward,
    /// Coordinate-pair lookup
    Reverse,
}

impl GeocodeMode {
    /// Classify a search text.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let mode = if is_coordinate_pair(text) {
            Self::Reverse
        } else {
            Self::Forward
        };
        tracing::debug!(?mode, "classified geocode request");
        mode
    }

    /// Returns true for reverse geocoding.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::Reverse)
    }
}

impl fmt::Display for GeocodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Reverse => write!(f, "reverse"),
        }
    }
}

/// Returns true if `text` is a strict `latitude,longitude` pair.
///
/// Latitude must lie in [-90, 90] and longitude in [-180, 180], with at most
/// nine decimals and no whitespace anywhere.
#[must_use]
pub fn is_coordinate_pair(text: &str) -> bool {
    regex!(
        r"^((-?([1-8])?\d(\.\d{0,9})?)|(-?90(\.0+)?)),((-?((1[0-7])|\d)?\d(\.\d{0,9})?)|(-?180(\.0+)?))$"
    )
    .is_match(text)
}

/// Parse a strict coordinate pair into `(latitude, longitude)`.
#[must_use]
pub fn parse_coordinate_pair(text: &str) -> Option<(f64, f64)> {
    if !is_coordinate_pair(text) {
        return None;
    }
    let (lat, lon) = text.split_once(',')?;
    Some((lat.parse().ok()?, lon.parse().ok()?))
}

/// Returns true if `text` is a 3 or 6 digit hexadecimal colour without `#`.
#[must_use]
pub fn is_hex_color(text: &str) -> bool {
    regex!(r"^([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").is_match(text)
}

/// Geocode modes a descriptor takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoScope {
    /// Included in forward (free-text) requests
    pub forward: bool,
    /// Included in reverse (coordinate-pair) requests
    pub reverse: bool,
}

impl GeoScope {
    /// Participates in both modes.
    pub const BOTH: Self = Self {
        forward: true,
        reverse: true,
    };

    /// Forward geocoding only.
    pub const FORWARD_ONLY: Self = Self {
        forward: true,
        reverse: false,
    };

    /// Reverse geocoding only.
    pub const REVERSE_ONLY: Self = Self {
        forward: false,
        reverse: true,
    };

    /// Returns true if a descriptor with this scope is kept for `mode`.
    #[must_use]
    pub const fn participates(self, mode: GeocodeMode) -> bool {
        match mode {
            GeocodeMode::Forward => self.forward,
            GeocodeMode::Reverse => self.reverse,
        }
    }
}

impl Default for GeoScope {
    fn default() -> Self {
        Self::BOTH
    }
}
