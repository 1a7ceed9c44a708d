//! Terminal helpers for the nearby places tools
//!
//! Provides shared CLI functionality:
//! - Status messages and error reports
//! - Place tables
//! - Spinners for lookups

pub mod output;
pub mod progress;
