//! Place records.

use nearby_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag of a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Cafe,
    Restaurant,
    Park,
    Gym,
    Library,
    Shopping,
    Entertainment,
    Service,
    Health,
    Education,
    Bank,
    Pharmacy,
    Hotel,
}

impl PlaceCategory {
    /// The wire tag, e.g. `"cafe"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Restaurant => "restaurant",
            Self::Park => "park",
            Self::Gym => "gym",
            Self::Library => "library",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Service => "service",
            Self::Health => "health",
            Self::Education => "education",
            Self::Bank => "bank",
            Self::Pharmacy => "pharmacy",
            Self::Hotel => "hotel",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of interest near a lookup origin.
///
/// `id` is only unique within the result it came from. Serializes as
/// `{id, name, latitude, longitude, distance, type}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometers from the lookup origin
    pub distance: f64,
    #[serde(rename = "type")]
    pub category: PlaceCategory,
}

impl Place {
    /// Position of the place
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}",
            self.name,
            self.category,
            format_distance(self.distance)
        )
    }
}

/// Orders places nearest first. Lookups return generation order; this is for display.
pub fn sort_by_distance(places: &mut [Place]) {
    places.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// Human-readable distance, e.g. `"0.42 km away"`.
pub fn format_distance(km: f64) -> String {
    format!("{:.2} km away", km)
}
