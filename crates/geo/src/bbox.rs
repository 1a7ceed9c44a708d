//! Degree-offset bounding boxes.
//!
//! Nearby places are scattered inside a square of equal latitude and
//! longitude half-spans around the origin. This module describes that square.

use crate::error::{GeoError, Result};
use crate::{haversine_distance, Coordinate};

/// An axis-aligned box in degree space, centered on an origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Center of the box
    pub center: Coordinate,
    /// Half of the box's side, in degrees
    pub half_span: f64,
}

impl BoundingBox {
    /// Creates a box of `half_span` degrees on each side of `center`.
    pub fn around(center: Coordinate, half_span: f64) -> Result<Self> {
        if !half_span.is_finite() || half_span <= 0.0 {
            return Err(GeoError::InvalidSpan(format!(
                "half span must be a positive number of degrees, got {half_span}"
            )));
        }
        Ok(Self { center, half_span })
    }

    /// Southern edge latitude.
    pub fn min_latitude(&self) -> f64 {
        self.center.latitude - self.half_span
    }

    /// Northern edge latitude.
    pub fn max_latitude(&self) -> f64 {
        self.center.latitude + self.half_span
    }

    /// Western edge longitude.
    pub fn min_longitude(&self) -> f64 {
        self.center.longitude - self.half_span
    }

    /// Eastern edge longitude.
    pub fn max_longitude(&self) -> f64 {
        self.center.longitude + self.half_span
    }

    /// Returns true if `coord` lies within the box, edges included.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.min_latitude()..=self.max_latitude()).contains(&coord.latitude)
            && (self.min_longitude()..=self.max_longitude()).contains(&coord.longitude)
    }

    /// Great-circle distance from the center to the farthest corner, in kilometers.
    ///
    /// Every point inside the box is at most this far from the center.
    pub fn half_diagonal_km(&self) -> f64 {
        let corners = [
            self.center.offset(self.half_span, self.half_span),
            self.center.offset(-self.half_span, self.half_span),
        ];
        corners
            .iter()
            .map(|corner| haversine_distance(&self.center, corner))
            .fold(0.0, f64::max)
    }
}
