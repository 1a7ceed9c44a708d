//! Error types for place lookups.

use nearby_geo::GeoError;
use thiserror::Error;

/// Result type alias for place operations.
pub type Result<T> = std::result::Result<T, PlacesError>;

/// Errors that can occur while looking up places.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// The lookup origin is not a valid coordinate
    #[error(transparent)]
    InvalidOrigin(#[from] GeoError),

    /// Generator settings are inconsistent
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    /// A backing places source failed
    #[error("Places source failed: {0}")]
    Source(String),
}

impl From<nearby_core::Error> for PlacesError {
    fn from(err: nearby_core::Error) -> Self {
        Self::InvalidConfig(err.message)
    }
}
