//! Core utilities for the nearby places tools
//!
//! This crate provides shared functionality used across the workspace:
//!
//! - **Error handling**: Coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults and validation
//!
//! # Example
//!
//! ```rust,no_run
//! use nearby_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("Up to {} places per lookup", config.schema.generator.max_places);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, DeviceConfig, GeneratorConfig, LocationConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
