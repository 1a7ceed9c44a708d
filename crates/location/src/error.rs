//! Failures reported by the location façade.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for façade operations
pub type LocationResult<T> = Result<T, LocationError>;

/// Message for [`LocationError::PermissionDenied`]
pub const PERMISSION_DENIED_MESSAGE: &str = "Location permission not granted";

/// Message for [`LocationError::Unavailable`]
pub const LOCATION_UNAVAILABLE_MESSAGE: &str = "Unable to retrieve location";

/// A tagged, terminal failure of one façade operation.
///
/// Nothing is retried. Platform and generation messages are carried
/// verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// Checking the permission itself failed
    #[error("{0}")]
    Permission(String),

    /// Fine location permission is not granted
    #[error("{}", PERMISSION_DENIED_MESSAGE)]
    PermissionDenied,

    /// The provider has no cached fix
    #[error("{}", LOCATION_UNAVAILABLE_MESSAGE)]
    Unavailable,

    /// The provider reported an error (services disabled, timeout, ...)
    #[error("{0}")]
    Provider(String),

    /// Nearby place lookup failed
    #[error("{0}")]
    Fetch(String),
}

impl LocationError {
    /// Stable tag a caller can switch on
    pub fn code(&self) -> &'static str {
        match self {
            Self::Permission(_) => "PERMISSION_ERROR",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::Unavailable => "LOCATION_NULL",
            Self::Provider(_) => "LOCATION_ERROR",
            Self::Fetch(_) => "FETCH_ERROR",
        }
    }

    /// The rejection a bridge would hand back to the UI runtime
    pub fn to_rejection(&self) -> Rejection {
        Rejection {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<LocationError> for nearby_core::Error {
    fn from(err: LocationError) -> Self {
        use nearby_core::ErrorCode;

        let code = match err {
            LocationError::Permission(_) => ErrorCode::PermissionError,
            LocationError::PermissionDenied => ErrorCode::PermissionDenied,
            LocationError::Unavailable => ErrorCode::LocationUnavailable,
            LocationError::Provider(_) => ErrorCode::LocationError,
            LocationError::Fetch(_) => ErrorCode::FetchError,
        };
        let suggestion = match err {
            LocationError::PermissionDenied => Some("Grant fine location access and try again"),
            LocationError::Unavailable => Some("Open a maps app once so the device caches a fix"),
            _ => None,
        };

        let mut core = nearby_core::Error::new(code, err.to_string()).with_context(err.code());
        if let Some(suggestion) = suggestion {
            core = core.with_suggestion(suggestion);
        }
        core
    }
}

/// Serializable `{code, message}` failure payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(LocationError::Permission("boom".into()).code(), "PERMISSION_ERROR");
        assert_eq!(LocationError::PermissionDenied.code(), "PERMISSION_DENIED");
        assert_eq!(LocationError::Unavailable.code(), "LOCATION_NULL");
        assert_eq!(LocationError::Provider("off".into()).code(), "LOCATION_ERROR");
        assert_eq!(LocationError::Fetch("bad".into()).code(), "FETCH_ERROR");
    }

    #[test]
    fn test_messages_pass_through() {
        assert_eq!(
            LocationError::Provider("Location services are disabled".into()).to_string(),
            "Location services are disabled"
        );
        assert_eq!(
            LocationError::PermissionDenied.to_string(),
            "Location permission not granted"
        );
        assert_eq!(LocationError::Unavailable.to_string(), "Unable to retrieve location");
    }

    #[test]
    fn test_rejection_json() {
        let json = serde_json::to_value(LocationError::PermissionDenied.to_rejection()).unwrap();
        assert_eq!(json["code"], "PERMISSION_DENIED");
        assert_eq!(json["message"], "Location permission not granted");
    }

    #[test]
    fn test_into_core_error() {
        let core: nearby_core::Error = LocationError::Unavailable.into();
        assert_eq!(core.code, nearby_core::ErrorCode::LocationUnavailable);
        assert_eq!(core.context.as_deref(), Some("LOCATION_NULL"));
        assert!(core.suggestion.is_some());

        let core: nearby_core::Error = LocationError::Fetch("worker panicked".into()).into();
        assert_eq!(core.code, nearby_core::ErrorCode::FetchError);
        assert!(core.suggestion.is_none());
    }
}
