//! Geocoding descriptor set and typed request.

use crate::options::{is_country_code, PLACE_TYPES, REVERSE_MODES, WORLDVIEWS};
use mapbox_core::param::{common, rules};
use mapbox_core::{ParamSet, ParamSpec, ParamValue};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Search text, sent in the path.
pub const QUERY: &str = "query";
/// Autocomplete flag.
pub const AUTOCOMPLETE: &str = "autocomplete";
/// Bounding box filter.
pub const BBOX: &str = "bbox";
/// Country filter.
pub const COUNTRY: &str = "country";
/// Fuzzy matching flag.
pub const FUZZY_MATCH: &str = "fuzzyMatch";
/// Response languages.
pub const LANGUAGE: &str = "language";
/// Result limit.
pub const LIMIT: &str = "limit";
/// Proximity bias.
pub const PROXIMITY: &str = "proximity";
/// Routing metadata flag.
pub const ROUTING: &str = "routing";
/// Feature type filter.
pub const TYPES: &str = "types";
/// Worldview.
pub const WORLDVIEW: &str = "worldview";
/// Reverse geocode sort order.
pub const REVERSE_MODE: &str = "reverseMode";

/// Longest search text forwarded to the API.
pub const MAX_QUERY_CHARS: usize = 256;

/// Descriptors for the geocoding endpoint, in positional order.
pub fn geocode_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParamSet::new(vec![
            ParamSpec::required(
                QUERY,
                "The feature you're trying to look up. This could be an address, a point of \
                 interest name, a city name, etc.",
            )
            .with_rule(rules::is_text)
            .with_formatter(rules::truncate_text(MAX_QUERY_CHARS)),
            ParamSpec::optional(
                AUTOCOMPLETE,
                "Specify whether to return autocomplete results (true, default) or not (false).",
            )
            .keyed()
            .with_default(true)
            .with_rule(rules::is_bool)
            .forward_only(),
            common::bbox().forward_only(),
            ParamSpec::optional(
                COUNTRY,
                "Limit results to one or more countries. GetOptions with the country_codes \
                 argument returns permitted values.",
            )
            .keyed()
            .with_rule(rules::list_all(|v| v.as_str().is_some_and(is_country_code)))
            .with_formatter(rules::join),
            ParamSpec::optional(
                FUZZY_MATCH,
                "Specify whether to attempt approximate as well as exact matching (true, \
                 default) or only exact matching (false).",
            )
            .keyed()
            .with_default(true)
            .with_rule(rules::is_bool)
            .forward_only(),
            ParamSpec::optional(
                LANGUAGE,
                "Specify the user's language as IETF language tags.",
            )
            .keyed()
            .with_rule(rules::is_text_list)
            .with_formatter(rules::join),
            ParamSpec::optional(
                LIMIT,
                "Specify the maximum number of results to return. The default is 5 and the \
                 maximum supported is 10.",
            )
            .keyed()
            .with_default(5)
            .with_rule(|v| v.as_f64().is_some_and(|n| (1.0..=10.0).contains(&n.trunc())))
            .with_formatter(rules::truncate),
            ParamSpec::optional(
                PROXIMITY,
                "Bias the response to favor results that are closer to this location. Provided \
                 as a coordinate pair, or the string ip to bias based on reverse IP lookup.",
            )
            .keyed()
            .with_default("ip")
            .with_rule(|v| v.as_str() == Some("ip") || rules::is_coordinate_pair(v))
            .forward_only(),
            ParamSpec::optional(
                ROUTING,
                "Specify whether to request additional metadata about the recommended \
                 navigation destination (true) or not (false, default).",
            )
            .keyed()
            .with_default(false)
            .with_rule(rules::is_bool),
            ParamSpec::optional(
                TYPES,
                "Filter results to a subset of feature types: country, region, postcode, \
                 district, place, locality, neighborhood, address, and poi.",
            )
            .keyed()
            .with_rule(rules::list_subset_of(PLACE_TYPES))
            .with_formatter(rules::join),
            ParamSpec::optional(
                WORLDVIEW,
                "Available worldviews are cn (China), in (India), jp (Japan), and us (United \
                 States).",
            )
            .keyed()
            .with_default("us")
            .with_rule(rules::text_one_of(WORLDVIEWS)),
            ParamSpec::optional(
                REVERSE_MODE,
                "Decides how results are sorted in a reverse geocoding query: distance or score.",
            )
            .keyed()
            .with_default("distance")
            .with_rule(rules::text_one_of(REVERSE_MODES))
            .reverse_only(),
        ])
    })
}

/// Typed geocoding request. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeRequest {
    /// Search text or `latitude,longitude` pair
    pub query: String,
    /// Return partial matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<bool>,
    /// `[minLon, minLat, maxLon, maxLat]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    /// Country codes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Vec<String>>,
    /// Approximate matching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_match: Option<bool>,
    /// Language tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Vec<String>>,
    /// Result limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// `ip` or a coordinate pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity: Option<String>,
    /// Routing metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<bool>,
    /// Feature types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Worldview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worldview: Option<String>,
    /// Reverse geocode sort order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_mode: Option<String>,
}

impl GeocodeRequest {
    /// Request for the given search text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Positional arguments in descriptor order.
    #[must_use]
    pub fn into_args(self) -> Vec<Option<ParamValue>> {
        vec![
            Some(self.query.into()),
            self.autocomplete.map(Into::into),
            self.bbox.map(ParamValue::list),
            self.country.map(Into::into),
            self.fuzzy_match.map(Into::into),
            self.language.map(Into::into),
            self.limit.map(Into::into),
            self.proximity.map(Into::into),
            self.routing.map(Into::into),
            self.types.map(Into::into),
            self.worldview.map(Into::into),
            self.reverse_mode.map(Into::into),
        ]
    }
}
