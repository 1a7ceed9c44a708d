//! Configuration loading and schema definitions
//!
//! Shared configuration types used by the generator, the location façade
//! and the CLI.

mod loader;
mod schema;

pub use loader::{Config, ENV_LOG_LEVEL, ENV_SEED};
pub use schema::*;
