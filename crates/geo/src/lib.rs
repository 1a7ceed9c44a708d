//! Geospatial primitives for nearby place lookups.
//!
//! This crate provides:
//! - A validated latitude/longitude [`Coordinate`]
//! - Haversine great-circle distance in kilometers
//! - Degree-offset bounding boxes around an origin
//!
//! # Example
//!
//! ```
//! use nearby_geo::{haversine_distance, Coordinate};
//!
//! let coord1 = Coordinate::new(52.5200, 13.4050); // Berlin
//! let coord2 = Coordinate::new(48.8566, 2.3522);  // Paris
//!
//! let distance_km = haversine_distance(&coord1, &coord2);
//! assert!((distance_km - 878.0).abs() < 10.0); // ~878 km
//! ```

mod bbox;
mod error;
mod haversine;

pub use bbox::BoundingBox;
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{haversine_distance, EARTH_RADIUS_KM};

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate without checking its range.
    ///
    /// Use [`Coordinate::try_new`] for values that come from outside the process.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Example
    /// ```
    /// use nearby_geo::Coordinate;
    ///
    /// assert!(Coordinate::try_new(37.7749, -122.4194).is_ok());
    /// assert!(Coordinate::try_new(91.0, 0.0).is_err());
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        coord.validate()?;
        Ok(coord)
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks that both components are finite and within range.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !LATITUDE_RANGE.contains(&self.latitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !LONGITUDE_RANGE.contains(&self.longitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Returns a coordinate shifted by the given degree offsets.
    ///
    /// The shift is applied in plain degrees; longitude is not scaled by
    /// `cos(latitude)`, so an equal offset covers less ground toward the poles.
    #[inline]
    #[must_use]
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> Self {
        Self::new(self.latitude + d_lat, self.longitude + d_lon)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
