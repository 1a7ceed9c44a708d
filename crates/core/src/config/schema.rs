//! Configuration schema definitions
//!
//! Every section has defaults, so an empty file (or no file) is a valid
//! configuration.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.generator.validate().context("In the [generator] section")?;
        self.location.validate().context("In the [location] section")?;
        self.device.validate().context("In the [device] section")?;
        Ok(())
    }
}

/// Mock place generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Fewest places returned per lookup
    #[serde(default = "default_min_places")]
    pub min_places: usize,

    /// Most places returned per lookup (inclusive)
    #[serde(default = "default_max_places")]
    pub max_places: usize,

    /// Largest latitude/longitude offset from the origin, in degrees
    #[serde(default = "default_max_offset_degrees")]
    pub max_offset_degrees: f64,

    /// Fixed RNG seed; every lookup draws from entropy when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_places: default_min_places(),
            max_places: default_max_places(),
            max_offset_degrees: default_max_offset_degrees(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Builder-style method to set the seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check count range and offset
    pub fn validate(&self) -> Result<()> {
        if self.min_places == 0 {
            return Err(Error::config_invalid("generator.min_places must be at least 1"));
        }
        if self.min_places > self.max_places {
            return Err(Error::config_invalid(format!(
                "generator.min_places ({}) is greater than generator.max_places ({})",
                self.min_places, self.max_places
            )));
        }
        if !self.max_offset_degrees.is_finite() || self.max_offset_degrees <= 0.0 {
            return Err(Error::config_invalid(format!(
                "generator.max_offset_degrees must be positive, got {}",
                self.max_offset_degrees
            )));
        }
        Ok(())
    }
}

fn default_min_places() -> usize {
    10
}

fn default_max_places() -> usize {
    15
}

fn default_max_offset_degrees() -> f64 {
    0.01
}

/// Location façade configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationConfig {
    /// Place lookups allowed to run on the blocking pool at once
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,

    /// Give up on the location provider after this many milliseconds.
    /// Unset means wait for as long as the provider takes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_timeout_ms: Option<u64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: default_max_concurrent_lookups(),
            provider_timeout_ms: None,
        }
    }
}

impl LocationConfig {
    /// Provider timeout as a duration
    pub fn provider_timeout(&self) -> Option<std::time::Duration> {
        self.provider_timeout_ms.map(std::time::Duration::from_millis)
    }

    /// Check limits
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_lookups == 0 {
            return Err(Error::config_invalid(
                "location.max_concurrent_lookups must be at least 1",
            ));
        }
        if self.provider_timeout_ms == Some(0) {
            return Err(Error::config_invalid("location.provider_timeout_ms cannot be zero"));
        }
        Ok(())
    }
}

fn default_max_concurrent_lookups() -> usize {
    4
}

/// Simulated device state used when no platform location service is attached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// Last known latitude
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Last known longitude
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Horizontal accuracy of the last fix, in meters
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,

    /// Whether fine location permission is granted
    #[serde(default = "default_true")]
    pub permission_granted: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            accuracy: default_accuracy(),
            permission_granted: true,
        }
    }
}

impl DeviceConfig {
    /// Check the simulated fix
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(Error::invalid_coordinate(self.latitude, self.longitude));
        }
        if !self.accuracy.is_finite() || self.accuracy < 0.0 {
            return Err(Error::config_invalid(format!(
                "device.accuracy must be a non-negative number of meters, got {}",
                self.accuracy
            )));
        }
        Ok(())
    }
}

fn default_latitude() -> f64 {
    37.7749
}

fn default_longitude() -> f64 {
    -122.4194
}

fn default_accuracy() -> f64 {
    12.0
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let schema = ConfigSchema::default();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.generator.min_places, 10);
        assert_eq!(schema.generator.max_places, 15);
        assert_eq!(schema.generator.max_offset_degrees, 0.01);
        assert!(schema.location.provider_timeout().is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [generator]
            seed = 7

            [location]
            provider_timeout_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(schema.generator.seed, Some(7));
        assert_eq!(schema.generator.max_places, 15);
        assert_eq!(
            schema.location.provider_timeout(),
            Some(std::time::Duration::from_millis(1500))
        );
        assert_eq!(schema.location.max_concurrent_lookups, 4);
        assert!(schema.device.permission_granted);
    }

    #[test]
    fn test_inverted_count_range_rejected() {
        let config = GeneratorConfig {
            min_places: 20,
            max_places: 15,
            ..GeneratorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigValidationError);
    }

    #[test]
    fn test_zero_limits_rejected() {
        let generator = GeneratorConfig {
            min_places: 0,
            ..GeneratorConfig::default()
        };
        assert!(generator.validate().is_err());

        let location = LocationConfig {
            max_concurrent_lookups: 0,
            ..LocationConfig::default()
        };
        assert!(location.validate().is_err());
    }

    #[test]
    fn test_schema_errors_name_their_section() {
        let mut schema = ConfigSchema::default();
        schema.location.provider_timeout_ms = Some(0);
        let err = schema.validate().unwrap_err();
        assert_eq!(err.context.as_deref(), Some("In the [location] section"));

        let mut schema = ConfigSchema::default();
        schema.device.longitude = -190.0;
        let err = schema.validate().unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InvalidCoordinate);
        assert_eq!(err.context.as_deref(), Some("In the [device] section"));
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_device_out_of_range() {
        let device = DeviceConfig {
            latitude: 123.0,
            ..DeviceConfig::default()
        };
        let err = device.validate().unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InvalidCoordinate);
    }
}
