//! Directions and isochrone descriptor sets and typed requests.

use mapbox_core::encoding::strip_whitespace;
use mapbox_core::param::{common, rules};
use mapbox_core::{ParamSet, ParamSpec, ParamValue};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Routing profile, sent in the path.
pub const PROFILE: &str = "profile";
/// Waypoints, sent in the path.
pub const COORDINATES: &str = "coordinates";
/// Alternative routes flag.
pub const ALTERNATIVES: &str = "alternatives";
/// Road types to avoid.
pub const EXCLUDE: &str = "exclude";
/// Geometry format.
pub const GEOMETRIES: &str = "geometries";
/// Overview geometry detail.
pub const OVERVIEW: &str = "overview";
/// Origin longitude, sent in the path.
pub const LONGITUDE: &str = "longitude";
/// Origin latitude, sent in the path.
pub const LATITUDE: &str = "latitude";
/// Contour unit.
pub const CONTOUR_TYPE: &str = "contourType";
/// Contour values.
pub const CONTOURS: &str = "contours";
/// Contour colours.
pub const CONTOURS_COLORS: &str = "contoursColors";
/// Polygon output flag.
pub const POLYGONS: &str = "polygons";
/// Contour noise filter.
pub const DENOISE: &str = "denoise";
/// Generalization tolerance in meters.
pub const GENERALIZE: &str = "generalize";

/// Profiles accepted by the Directions API.
pub const DIRECTIONS_PROFILES: &[&str] = &["driving", "walking", "cycling", "driving-traffic"];

/// Profiles accepted by the Isochrone API.
pub const ISOCHRONE_PROFILES: &[&str] = &["driving", "walking", "cycling"];

/// Every road type that can be excluded.
pub const EXCLUDABLE: &[&str] = &["motorway", "toll", "ferry", "unpaved", "cash_only_tolls"];

/// Contour units.
pub const CONTOUR_TYPES: &[&str] = &["minutes", "meters"];

/// Upper bound of a contour in minutes.
pub const MAX_CONTOUR_MINUTES: f64 = 60.0;

/// Upper bound of a contour in meters.
pub const MAX_CONTOUR_METERS: f64 = 100_000.0;

/// Road types the given profile can exclude.
#[must_use]
pub fn excludable_for(profile: &str) -> &'static [&'static str] {
    match profile {
        "walking" => &["motorway", "toll", "unpaved"],
        "cycling" => &["motorway", "toll", "ferry", "unpaved"],
        _ => EXCLUDABLE,
    }
}

fn is_lon_lat(text: &str) -> bool {
    let compact = strip_whitespace(text);
    let Some((lon, lat)) = compact.split_once(',') else {
        return false;
    };
    match (lon.parse::<f64>(), lat.parse::<f64>()) {
        (Ok(lon), Ok(lat)) => (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat),
        _ => false,
    }
}

fn profile(options: &'static [&'static str]) -> ParamSpec {
    ParamSpec::required(PROFILE, "A Mapbox routing profile ID.")
        .with_default("driving")
        .with_rule(rules::text_one_of(options))
}

/// Descriptors for the Directions API, in positional order.
pub fn directions_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParamSet::new(vec![
            profile(DIRECTIONS_PROFILES),
            ParamSpec::required(
                COORDINATES,
                "Between 2 and 25 waypoints, each as longitude,latitude.",
            )
            .with_rule(rules::list_len_between(2, 25))
            .with_rule(rules::list_all(|v| v.as_str().is_some_and(is_lon_lat)))
            .with_formatter(|v| {
                let joined = v
                    .as_list()
                    .unwrap_or_default()
                    .iter()
                    .map(|c| strip_whitespace(&c.to_string()))
                    .collect::<Vec<_>>()
                    .join(";");
                ParamValue::Text(joined)
            }),
            ParamSpec::optional(
                ALTERNATIVES,
                "Whether to try to return alternative routes (true) or not (false, default).",
            )
            .keyed()
            .with_default(false)
            .with_rule(rules::is_bool),
            ParamSpec::optional(
                EXCLUDE,
                "Exclude certain road types from routing: motorway, toll, ferry, unpaved, \
                 cash_only_tolls.",
            )
            .keyed()
            .depends_on(PROFILE)
            .with_rule(rules::is_text_list)
            .with_dependent_formatter(|v, profile| {
                let allowed = excludable_for(profile.and_then(ParamValue::as_str).unwrap_or(""));
                let kept = v
                    .as_list()
                    .unwrap_or_default()
                    .iter()
                    .filter_map(ParamValue::as_str)
                    .filter(|road| allowed.contains(road))
                    .collect::<Vec<_>>()
                    .join(",");
                ParamValue::Text(kept)
            }),
            ParamSpec::optional(
                GEOMETRIES,
                "The format of the returned geometry: geojson, polyline (default) or polyline6.",
            )
            .keyed()
            .with_default("polyline")
            .with_rule(rules::text_one_of(&["geojson", "polyline", "polyline6"])),
            ParamSpec::optional(
                OVERVIEW,
                "The type of overview geometry: full, simplified (default) or false.",
            )
            .keyed()
            .with_default("simplified")
            .with_rule(rules::text_one_of(&["full", "simplified", "false"])),
        ])
    })
}

fn contour_limit(unit: Option<&ParamValue>) -> f64 {
    if unit.and_then(ParamValue::as_str) == Some("meters") {
        MAX_CONTOUR_METERS
    } else {
        MAX_CONTOUR_MINUTES
    }
}

/// Descriptors for the Isochrone API, in positional order.
pub fn isochrone_params() -> &'static ParamSet {
    static PARAMS: OnceLock<ParamSet> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParamSet::new(vec![
            profile(ISOCHRONE_PROFILES),
            common::longitude(),
            common::latitude(),
            ParamSpec::optional(
                CONTOUR_TYPE,
                "Specify whether to define contours in minutes or meters.",
            )
            .with_default("minutes")
            .with_rule(rules::text_one_of(CONTOUR_TYPES)),
            ParamSpec::optional(
                CONTOURS,
                "Define up to four contours either as times in minutes (at most 60) or as \
                 distances in meters (at most 100000), in increasing order.",
            )
            .depends_on(CONTOUR_TYPE)
            .with_derived_key(|unit| {
                let unit = unit.and_then(ParamValue::as_str).unwrap_or("minutes");
                Some(format!("contours_{unit}"))
            })
            .with_default(vec![15])
            .with_rule(rules::is_number_list)
            .with_rule(rules::list_len_between(1, 4))
            .with_dependent_rule(|v, unit| {
                let max = contour_limit(unit);
                v.as_list().is_some_and(|items| {
                    items
                        .iter()
                        .filter_map(ParamValue::as_f64)
                        .all(|n| (0.0..=max).contains(&n))
                })
            })
            .with_formatter(rules::join),
            ParamSpec::optional(
                CONTOURS_COLORS,
                "The colors to use for each contour, as hex values without a leading #.",
            )
            .with_key("contours_colors")
            .with_rule(rules::list_all(|v| {
                v.as_str().is_some_and(|s| s.len() == 6) && rules::is_hex_color(v)
            }))
            .with_formatter(rules::join),
            ParamSpec::optional(
                POLYGONS,
                "Whether to return the contours as GeoJSON polygons (true) or linestrings (false).",
            )
            .keyed()
            .with_default(true)
            .with_rule(rules::is_bool),
            ParamSpec::optional(
                DENOISE,
                "A floating point value from 0.0 to 1.0 that can be used to remove smaller \
                 contours. The default is 1.0.",
            )
            .keyed()
            .with_default(1)
            .with_rule(rules::number_between(0.0, 1.0))
            .with_formatter(rules::fixed_decimals(1)),
            ParamSpec::optional(
                GENERALIZE,
                "A positive value, in meters, used as the tolerance for Douglas-Peucker \
                 generalization.",
            )
            .keyed()
            .with_rule(rules::number_at_least(0.0))
            .with_formatter(rules::truncate),
        ])
    })
}

/// Typed directions request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    /// Routing profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Waypoints as `longitude,latitude`
    pub coordinates: Vec<String>,
    /// Alternative routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<bool>,
    /// Road types to avoid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    /// Geometry format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometries: Option<String>,
    /// Overview detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl DirectionsRequest {
    /// Request between the given waypoints with the default profile.
    pub fn new<I, S>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            coordinates: coordinates.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Positional arguments in descriptor order.
    #[must_use]
    pub fn into_args(self) -> Vec<Option<ParamValue>> {
        vec![
            self.profile.map(Into::into),
            Some(self.coordinates.into()),
            self.alternatives.map(Into::into),
            self.exclude.map(Into::into),
            self.geometries.map(Into::into),
            self.overview.map(Into::into),
        ]
    }
}

/// Typed isochrone request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsochroneRequest {
    /// Routing profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Origin longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Origin latitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// `minutes` or `meters`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contour_type: Option<String>,
    /// Contour values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contours: Option<Vec<f64>>,
    /// Contour colours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contours_colors: Option<Vec<String>>,
    /// Polygon output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygons: Option<bool>,
    /// Noise filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denoise: Option<f64>,
    /// Generalization tolerance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generalize: Option<f64>,
}

impl IsochroneRequest {
    /// Request around the given origin.
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
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
            self.profile.map(Into::into),
            self.longitude.map(Into::into),
            self.latitude.map(Into::into),
            self.contour_type.map(Into::into),
            self.contours.map(Into::into),
            self.contours_colors.map(Into::into),
            self.polygons.map(Into::into),
            self.denoise.map(Into::into),
            self.generalize.map(Into::into),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_are_well_formed() {
        directions_params().check_dependencies().unwrap();
        isochrone_params().check_dependencies().unwrap();
        assert_eq!(
            DirectionsRequest::default().into_args().len(),
            directions_params().len()
        );
        assert_eq!(
            IsochroneRequest::default().into_args().len(),
            isochrone_params().len()
        );
    }

    #[test]
    fn coordinates_are_compacted_and_joined() {
        let request = DirectionsRequest::new(["-71.9866, 40.7306", " -73.754968,42.651167"]);
        let bindings = directions_params().bind_args(request.into_args()).unwrap();
        assert_eq!(
            bindings.require(COORDINATES).unwrap(),
            "-71.9866,40.7306;-73.754968,42.651167".into()
        );
    }

    #[test]
    fn coordinates_need_two_valid_waypoints() {
        let one = DirectionsRequest::new(["-71.9866,40.7306"]);
        let bindings = directions_params().bind_args(one.into_args()).unwrap();
        assert!(bindings.require(COORDINATES).is_err());

        let bad = DirectionsRequest::new(["-71.9866,40.7306", "somewhere"]);
        let bindings = directions_params().bind_args(bad.into_args()).unwrap();
        assert!(bindings.require(COORDINATES).is_err());
    }

    #[test]
    fn exclude_is_filtered_by_profile() {
        let request = DirectionsRequest {
            profile: Some("walking".into()),
            exclude: Some(vec!["ferry".into(), "toll".into(), "motorway".into()]),
            ..DirectionsRequest::new(["0,0", "1,1"])
        };
        let bindings = directions_params().bind_args(request.into_args()).unwrap();
        let params = bindings.assemble(None).unwrap();
        assert_eq!(params.get(EXCLUDE), Some(&"toll,motorway".into()));

        let request = DirectionsRequest {
            profile: Some("cycling".into()),
            exclude: Some(vec!["ferry".into(), "cash_only_tolls".into()]),
            ..DirectionsRequest::new(["0,0", "1,1"])
        };
        let bindings = directions_params().bind_args(request.into_args()).unwrap();
        assert_eq!(
            bindings.assemble(None).unwrap().get(EXCLUDE),
            Some(&"ferry".into())
        );

        let request = DirectionsRequest {
            exclude: Some(vec!["cash_only_tolls".into()]),
            ..DirectionsRequest::new(["0,0", "1,1"])
        };
        let bindings = directions_params().bind_args(request.into_args()).unwrap();
        assert_eq!(
            bindings.assemble(None).unwrap().get(EXCLUDE),
            Some(&"cash_only_tolls".into())
        );
    }

    #[test]
    fn directions_defaults() {
        let bindings = directions_params()
            .bind_args(DirectionsRequest::new(["0,0", "1,1"]).into_args())
            .unwrap();
        let params = bindings.assemble(None).unwrap();
        assert_eq!(params.get(ALTERNATIVES), Some(&false.into()));
        assert_eq!(params.get(GEOMETRIES), Some(&"polyline".into()));
        assert_eq!(params.get(OVERVIEW), Some(&"simplified".into()));
        assert!(params.get(PROFILE).is_none());
        assert!(params.get(EXCLUDE).is_none());
        assert_eq!(bindings.require(PROFILE).unwrap(), "driving".into());
    }

    #[test]
    fn contour_key_follows_contour_type() {
        let bindings = isochrone_params()
            .bind_args(IsochroneRequest::new(-73.99, 40.73).into_args())
            .unwrap();
        let params = bindings.assemble(None).unwrap();
        assert_eq!(params.get("contours_minutes"), Some(&"15".into()));
        assert!(params.get("contours_meters").is_none());

        let request = IsochroneRequest {
            contour_type: Some("meters".into()),
            contours: Some(vec![1000.0, 5000.0]),
            ..IsochroneRequest::new(-73.99, 40.73)
        };
        let bindings = isochrone_params().bind_args(request.into_args()).unwrap();
        let params = bindings.assemble(None).unwrap();
        assert_eq!(params.get("contours_meters"), Some(&"1000,5000".into()));
        assert!(params.get("contours_minutes").is_none());
    }

    #[test]
    fn contour_limits_depend_on_unit() {
        let request = IsochroneRequest {
            contours: Some(vec![90.0]),
            ..IsochroneRequest::new(-73.99, 40.73)
        };
        let bindings = isochrone_params().bind_args(request.into_args()).unwrap();
        assert!(bindings.assemble(None).is_err());

        let request = IsochroneRequest {
            contours: Some(vec![5.0, 10.0, 15.0, 20.0, 25.0]),
            ..IsochroneRequest::new(-73.99, 40.73)
        };
        let bindings = isochrone_params().bind_args(request.into_args()).unwrap();
        assert!(bindings.assemble(None).is_err());

        let request = IsochroneRequest {
            contour_type: Some("meters".into()),
            contours: Some(vec![90.0]),
            ..IsochroneRequest::new(-73.99, 40.73)
        };
        let bindings = isochrone_params().bind_args(request.into_args()).unwrap();
        assert!(bindings.assemble(None).is_ok());
    }

    #[test]
    fn isochrone_formatting() {
        let request = IsochroneRequest {
            denoise: Some(0.5),
            generalize: Some(250.7),
            contours_colors: Some(vec!["ff0000".into()]),
            ..IsochroneRequest::new(-73.99, 40.73)
        };
        let bindings = isochrone_params().bind_args(request.into_args()).unwrap();
        let params = bindings.assemble(None).unwrap();
        assert_eq!(params.get(DENOISE), Some(&"0.5".into()));
        assert_eq!(params.get(GENERALIZE), Some(&ParamValue::Number(250.0)));
        assert_eq!(params.get("contours_colors"), Some(&"ff0000".into()));
        assert_eq!(params.get(POLYGONS), Some(&true.into()));

        let bad = IsochroneRequest {
            contours_colors: Some(vec!["f00".into()]),
            ..IsochroneRequest::new(-73.99, 40.73)
        };
        let bindings = isochrone_params().bind_args(bad.into_args()).unwrap();
        assert!(bindings.assemble(None).is_err());
    }

    #[test]
    fn lon_lat_parsing() {
        assert!(is_lon_lat("-73.99, 40.73"));
        assert!(!is_lon_lat("40.73"));
        assert!(!is_lon_lat("200,0"));
    }
}
