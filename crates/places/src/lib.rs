//! Nearby place records and the mock place generator.
//!
//! This crate provides:
//! - The [`Place`] record returned by nearby lookups
//! - The fixed name/category [`catalog`]
//! - A [`PlaceGenerator`] that scatters catalog entries around an origin
//! - The [`PlacesRepository`] seam, with [`MockPlacesRepository`] standing in
//!   for a real places search API
//!
//! # Example
//!
//! ```
//! use nearby_geo::Coordinate;
//! use nearby_places::{MockPlacesRepository, PlacesRepository};
//!
//! let repository = MockPlacesRepository::with_seed(42);
//! let places = repository
//!     .fetch_nearby(Coordinate::new(37.7749, -122.4194))
//!     .unwrap();
//!
//! assert!((10..=15).contains(&places.len()));
//! ```

pub mod catalog;
mod error;
pub mod generator;
mod model;
mod repository;

pub use catalog::{CatalogEntry, CATALOG};
pub use error::{PlacesError, Result};
pub use generator::PlaceGenerator;
pub use model::{format_distance, sort_by_distance, Place, PlaceCategory};
pub use repository::{MockPlacesRepository, PlacesRepository};
