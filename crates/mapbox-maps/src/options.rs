//! Option lists for parameters that accept a fixed vocabulary.

use mapbox_core::Error;
use mapbox_search::options::{COUNTRY_CODES, PLACE_TYPES};
use std::fmt;
use std::str::FromStr;

/// Maki icon names usable as marker labels.
pub const MAKI_ICONS: &[&str] = &[
    "aerialway", "airfield", "airport", "alcohol-shop", "american-football",
    "amusement-park", "animal-shelter", "aquarium", "arrow", "art-gallery", "attraction",
    "bakery", "bank", "bank-JP", "bar", "barrier", "baseball", "basketball", "bbq", "beach",
    "beer", "bicycle", "bicycle-share", "blood-bank", "bowling-alley", "bridge", "building",
    "building-alt1", "bus", "cafe", "campsite", "car", "car-rental", "car-repair", "casino",
    "castle", "castle-JP", "caution", "cemetery", "cemetery-JP", "charging-station",
    "cinema", "circle", "circle-stroked", "city", "clothing-store", "college", "college-JP",
    "commercial", "communications-tower", "confectionery", "construction", "convenience",
    "cricket", "cross", "dam", "danger", "defibrillator", "dentist", "diamond", "doctor",
    "dog-park", "drinking-water", "elevator", "embassy", "emergency-phone", "entrance",
    "entrance-alt1", "farm", "fast-food", "fence", "ferry", "ferry-JP", "fire-station",
    "fire-station-JP", "fitness-centre", "florist", "fuel", "furniture", "gaming", "garden",
    "garden-centre", "gift", "globe", "golf", "grocery", "hairdresser", "harbor", "hardware",
    "heart", "heliport", "highway-rest-area", "historic", "home", "horse-riding", "hospital",
    "hospital-JP", "hot-spring", "ice-cream", "industry", "information", "jewelry-store",
    "karaoke", "landmark", "landmark-JP", "landuse", "laundry", "library", "lighthouse",
    "lighthouse-JP", "lodging", "logging", "marker", "marker-stroked", "mobile-phone",
    "monument", "monument-JP", "mountain", "museum", "music", "natural", "nightclub",
    "observation-tower", "optician", "paint", "park", "park-alt1", "parking",
    "parking-garage", "parking-paid", "pharmacy", "picnic-site", "pitch", "place-of-worship",
    "playground", "police", "police-JP", "post", "post-JP", "prison", "racetrack",
    "racetrack-boat", "racetrack-cycling", "racetrack-horse", "rail", "rail-light",
    "rail-metro", "ranger-station", "recycling", "religious-buddhist", "religious-christian",
    "religious-jewish", "religious-muslim", "religious-shinto", "residential-community",
    "restaurant", "restaurant-bbq", "restaurant-noodle", "restaurant-pizza",
    "restaurant-seafood", "restaurant-sushi", "road-accident", "roadblock", "rocket",
    "school", "school-JP", "scooter", "shelter", "shoe", "shop", "skateboard", "skiing",
    "slaughterhouse", "slipway", "snowmobile", "soccer", "square", "square-stroked",
    "stadium", "star", "star-stroked", "suitcase", "swimming", "table-tennis", "taxi",
    "teahouse", "telephone", "tennis", "theatre", "toilet", "toll", "town", "town-hall",
    "triangle", "triangle-stroked", "tunnel", "veterinary", "viewpoint", "village", "volcano",
    "volleyball", "warehouse", "waste-basket", "watch", "water", "waterfall", "watermill",
    "wetland", "wheelchair", "windmill", "zoo",
];

/// Built-in Mapbox styles.
pub const MAPBOX_STYLES: &[&str] = &[
    "mapbox/streets-v11",
    "mapbox/outdoors-v11",
    "mapbox/light-v10",
    "mapbox/dark-v10",
    "mapbox/satellite-v9",
    "mapbox/satellite-streets-v11",
    "mapbox/navigation-day-v1",
    "mapbox/navigation-night-v1",
];

/// Style used when none is given.
pub const DEFAULT_STYLE: &str = "mapbox/streets-v11";

/// Returns true for a Maki icon name.
#[must_use]
pub fn is_maki_icon(name: &str) -> bool {
    MAKI_ICONS.contains(&name)
}

/// Parameters whose options can be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionList {
    /// Geocoding feature types
    PlaceType,
    /// Maki marker icons
    MakiIcons,
    /// ISO 3166 alpha-2 country codes
    CountryCodes,
}

impl OptionList {
    /// The permitted values.
    #[must_use]
    pub const fn values(self) -> &'static [&'static str] {
        match self {
            Self::PlaceType => PLACE_TYPES,
            Self::MakiIcons => MAKI_ICONS,
            Self::CountryCodes => COUNTRY_CODES,
        }
    }
}

impl FromStr for OptionList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "place_type" => Ok(Self::PlaceType),
            "maki_icons" | "icons" => Ok(Self::MakiIcons),
            "country_codes" => Ok(Self::CountryCodes),
            other => Err(Error::InvalidParameter(format!(
                "Entered {other}...Select the parameter to fetch possible options for: \
                 place_type, maki_icons or country_codes."
            ))),
        }
    }
}

impl fmt::Display for OptionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PlaceType => "place_type",
            Self::MakiIcons => "maki_icons",
            Self::CountryCodes => "country_codes",
        };
        f.write_str(name)
    }
}

/// Options for the named parameter.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for an unknown parameter name.
pub fn get_options(parameter: &str) -> Result<&'static [&'static str], Error> {
    Ok(parameter.parse::<OptionList>()?.values())
}
