//! Permission-gated location retrieval and nearby place lookups
//!
//! The platform location provider and permission check sit behind the
//! [`LocationProvider`] and [`PermissionChecker`] traits. [`LocationService`]
//! exposes three operations to the UI side:
//!
//! | Operation | Success | Failure tags |
//! |---|---|---|
//! | `check_permission` | `bool` | `PERMISSION_ERROR` |
//! | `get_current_location` | [`LocationFix`] | `PERMISSION_DENIED`, `LOCATION_NULL`, `LOCATION_ERROR` |
//! | `get_nearby_places` | `Vec<Place>` | `FETCH_ERROR` |
//!
//! # Example
//!
//! ```rust,no_run
//! use nearby_location::{LocationFix, LocationService, StaticLocationProvider, StaticPermission};
//! use nearby_places::MockPlacesRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = LocationService::new(
//!         StaticLocationProvider::with_fix(LocationFix::new(37.7749, -122.4194, 10.0)),
//!         StaticPermission::granted(),
//!         MockPlacesRepository::new(),
//!     );
//!
//!     let fix = service.get_current_location().await?;
//!     let places = service.get_nearby_places(fix.latitude, fix.longitude).await?;
//!     println!("{} places nearby", places.len());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod fixed;
pub mod provider;
pub mod service;
pub mod view_model;

pub use error::{LocationError, LocationResult, Rejection};
pub use fixed::{StaticLocationProvider, StaticPermission};
pub use provider::{LocationFix, LocationProvider, PermissionChecker, PlatformError};
pub use service::LocationService;
pub use view_model::PlacesViewModel;
