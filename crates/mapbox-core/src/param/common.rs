//! Descriptors shared by several endpoints.

use super::{rules, ParamSpec};

/// Default longitude for map centre points.
pub const DEFAULT_LONGITUDE: f64 = 119.784_129_756_764_17;

/// Default latitude for map centre points.
pub const DEFAULT_LATITUDE: f64 = 36.740_225_461_844_59;

/// Maximum latitude representable in Web Mercator.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.0511;

/// Optional `bbox` filter: four numbers in `minLon,minLat,maxLon,maxLat` order.
#[must_use]
pub fn bbox() -> ParamSpec {
    ParamSpec::optional(
        "bbox",
        "Limit results to only those contained within the supplied bounding box. Bounding boxes \
         should be supplied as four numbers separated by commas, in minLon,minLat,maxLon,maxLat \
         order. The bounding box cannot cross the 180th meridian.",
    )
    .keyed()
    .with_rule(rules::is_number_list)
    .with_rule(rules::list_len_between(4, 4))
    .with_formatter(rules::join)
}

/// Keyless longitude in [-180, 180].
#[must_use]
pub fn longitude() -> ParamSpec {
    ParamSpec::optional(
        "longitude",
        "Longitude for the center point of the static map; a number between -180 and 180.",
    )
    .with_default(DEFAULT_LONGITUDE)
    .with_rule(rules::number_between(-180.0, 180.0))
}

/// Keyless latitude in Web Mercator range.
#[must_use]
pub fn latitude() -> ParamSpec {
    ParamSpec::optional(
        "latitude",
        "Latitude for the center point of the static map; a number between -85.0511 and 85.0511.",
    )
    .with_default(DEFAULT_LATITUDE)
    .with_rule(rules::number_between(
        -MAX_MERCATOR_LATITUDE,
        MAX_MERCATOR_LATITUDE,
    ))
}
