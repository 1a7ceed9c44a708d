//! Observable lookup state for a UI layer.
//!
//! The view model owns no UI. It publishes `places`, `error`, `loading` and
//! the last `location` on watch channels and drives the façade from spawned
//! tasks, so callers never wait on a lookup.

use crate::provider::{LocationFix, LocationProvider, PermissionChecker};
use crate::service::LocationService;
use nearby_places::{Place, PlacesRepository};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Shown when a location failure carries no message of its own
pub const LOCATION_FAILED_MESSAGE: &str = "Unable to get location";

/// Shown when the place lookup after a refresh fails
pub const PLACES_FAILED_MESSAGE: &str = "Failed to fetch nearby places";

struct ViewState {
    places: watch::Sender<Vec<Place>>,
    error: watch::Sender<Option<String>>,
    loading: watch::Sender<bool>,
    location: watch::Sender<Option<LocationFix>>,
}

/// Drives a [`LocationService`] and exposes the results as observable state.
pub struct PlacesViewModel<P, C, R> {
    service: Arc<LocationService<P, C, R>>,
    state: Arc<ViewState>,
}

impl<P, C, R> PlacesViewModel<P, C, R>
where
    P: LocationProvider + 'static,
    C: PermissionChecker + 'static,
    R: PlacesRepository + 'static,
{
    pub fn new(service: Arc<LocationService<P, C, R>>) -> Self {
        let state = ViewState {
            places: watch::channel(Vec::new()).0,
            error: watch::channel(None).0,
            loading: watch::channel(false).0,
            location: watch::channel(None).0,
        };
        Self {
            service,
            state: Arc::new(state),
        }
    }

    pub fn places(&self) -> watch::Receiver<Vec<Place>> {
        self.state.places.subscribe()
    }

    pub fn error(&self) -> watch::Receiver<Option<String>> {
        self.state.error.subscribe()
    }

    pub fn loading(&self) -> watch::Receiver<bool> {
        self.state.loading.subscribe()
    }

    pub fn location(&self) -> watch::Receiver<Option<LocationFix>> {
        self.state.location.subscribe()
    }

    /// Looks up places around a position the caller already has.
    ///
    /// On success the places are published and the error cleared; on failure
    /// only the error is published, so the previous places stay visible.
    /// `loading` is true until the lookup settles either way.
    pub fn fetch_nearby_places(&self, latitude: f64, longitude: f64) -> JoinHandle<()> {
        self.state.loading.send_replace(true);

        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            match service.get_nearby_places(latitude, longitude).await {
                Ok(places) => {
                    state.places.send_replace(places);
                    state.error.send_replace(None);
                }
                Err(e) => {
                    state.error.send_replace(Some(e.to_string()));
                }
            }
            state.loading.send_replace(false);
        })
    }

    /// Re-reads the device location, then looks up places around it.
    pub fn refresh(&self) -> JoinHandle<()> {
        self.state.loading.send_replace(true);
        self.state.error.send_replace(None);

        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            match service.get_current_location().await {
                Ok(fix) => {
                    state.location.send_replace(Some(fix));
                    match service.get_nearby_places(fix.latitude, fix.longitude).await {
                        Ok(places) => {
                            state.places.send_replace(places);
                        }
                        Err(e) => {
                            debug!(error = %e, "Refresh lookup failed");
                            state.error.send_replace(Some(PLACES_FAILED_MESSAGE.to_string()));
                        }
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    let message = if message.is_empty() {
                        LOCATION_FAILED_MESSAGE.to_string()
                    } else {
                        message
                    };
                    state.error.send_replace(Some(message));
                }
            }
            state.loading.send_replace(false);
        })
    }

    /// Dismisses the current error
    pub fn clear_error(&self) {
        self.state.error.send_replace(None);
    }
}
