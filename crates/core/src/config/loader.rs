//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding `logging.level`
pub const ENV_LOG_LEVEL: &str = "NEARBY_LOG_LEVEL";

/// Environment variable overriding `generator.seed`
pub const ENV_SEED: &str = "NEARBY_SEED";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations.
    ///
    /// An explicit path that does not exist is an error; a missing file in the
    /// standard locations just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let mut schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        apply_env_overrides(&mut schema)?;
        schema.validate()?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file, no environment)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        ".nearby-places.toml",
        "nearby-places.toml",
        ".config/nearby-places.toml",
    ];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
            .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })
}

fn apply_env_overrides(schema: &mut ConfigSchema) -> Result<()> {
    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        if !level.trim().is_empty() {
            schema.logging.level = level;
        }
    }

    if let Ok(seed) = std::env::var(ENV_SEED) {
        let seed = seed.trim().parse::<u64>().map_err(|e| {
            Error::config_invalid(format!("{ENV_SEED} must be an unsigned integer, got {seed:?}"))
                .with_source(e)
        })?;
        schema.generator.seed = Some(seed);
    }

    Ok(())
}
