//! Seams to the platform: the location provider and the permission check.

use nearby_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// A device position as reported by the location provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters
    pub accuracy: f64,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
        }
    }

    /// Position without the accuracy
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// An error raised by a platform service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PlatformError {
    pub message: String,
}

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Source of the device's last known position.
pub trait LocationProvider: Send + Sync {
    /// Resolves with the provider's cached fix, `None` if it has none.
    ///
    /// This never asks for a fresh fix.
    fn last_location(&self)
        -> impl Future<Output = Result<Option<LocationFix>, PlatformError>> + Send;
}

/// Answers whether fine location permission is granted.
pub trait PermissionChecker: Send + Sync {
    /// Must not block or prompt the user.
    fn has_fine_location(&self) -> Result<bool, PlatformError>;
}
