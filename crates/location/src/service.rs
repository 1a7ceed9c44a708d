//! The location query façade.
//!
//! Three operations, each resolving to a value or a tagged [`LocationError`]:
//! permission check, current location, and nearby places.

use crate::error::{LocationError, LocationResult};
use crate::provider::{LocationFix, LocationProvider, PermissionChecker};
use nearby_core::config::LocationConfig;
use nearby_geo::Coordinate;
use nearby_places::{MockPlacesRepository, Place, PlacesRepository};
use nearby_telemetry::{failure_counter, metrics, success_counter, Timer};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, instrument, warn};

const CURRENT_LOCATION: &str = "current_location";
const NEARBY_PLACES: &str = "nearby_places";

/// Gates location access behind a permission check and runs place lookups
/// off the caller's task.
///
/// Lookups run on tokio's blocking pool, at most `max_concurrent_lookups`
/// at a time. A lookup that has started keeps running even if the caller
/// stops waiting for it.
pub struct LocationService<P, C, R = MockPlacesRepository> {
    provider: P,
    permission: C,
    repository: Arc<R>,
    lookup_slots: Arc<Semaphore>,
    provider_timeout: Option<Duration>,
}

impl<P, C, R> LocationService<P, C, R>
where
    P: LocationProvider,
    C: PermissionChecker,
    R: PlacesRepository + 'static,
{
    /// Creates a façade with default [`LocationConfig`]
    pub fn new(provider: P, permission: C, repository: R) -> Self {
        Self::with_config(provider, permission, repository, &LocationConfig::default())
    }

    /// Creates a façade with explicit limits
    pub fn with_config(provider: P, permission: C, repository: R, config: &LocationConfig) -> Self {
        Self {
            provider,
            permission,
            repository: Arc::new(repository),
            lookup_slots: Arc::new(Semaphore::new(config.max_concurrent_lookups.max(1))),
            provider_timeout: config.provider_timeout(),
        }
    }

    /// The location provider in use
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The permission checker in use
    pub fn permission(&self) -> &C {
        &self.permission
    }

    /// Whether fine location permission is currently granted.
    pub async fn check_permission(&self) -> LocationResult<bool> {
        self.permission.has_fine_location().map_err(|e| {
            error!(error = %e, "Permission check failed");
            LocationError::Permission(e.message)
        })
    }

    /// Resolves with the provider's last cached fix.
    ///
    /// Fails with `PermissionDenied` before touching the provider when
    /// permission is missing.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_current_location(&self) -> LocationResult<LocationFix> {
        let result = self.current_location().await;
        record_outcome(CURRENT_LOCATION, &result);
        result
    }

    async fn current_location(&self) -> LocationResult<LocationFix> {
        let granted = self
            .permission
            .has_fine_location()
            .map_err(|e| LocationError::Permission(e.message))?;
        if !granted {
            warn!("Location requested without permission");
            return Err(LocationError::PermissionDenied);
        }

        let request = self.provider.last_location();
        let outcome = match self.provider_timeout {
            Some(limit) => tokio::time::timeout(limit, request).await.map_err(|_| {
                LocationError::Provider(format!(
                    "Location request timed out after {}ms",
                    limit.as_millis()
                ))
            })?,
            None => request.await,
        };

        match outcome {
            Ok(Some(fix)) => {
                fix.coordinate().validate().map_err(|e| {
                    LocationError::Provider(format!("Provider returned an invalid fix: {e}"))
                })?;
                debug!(latitude = fix.latitude, longitude = fix.longitude, accuracy = fix.accuracy, "Got location");
                Ok(fix)
            }
            Ok(None) => Err(LocationError::Unavailable),
            Err(e) => {
                error!("Location error: {}", e);
                Err(LocationError::Provider(e.message))
            }
        }
    }

    /// Looks up places around the given position on a blocking worker.
    ///
    /// Results come back in the order the repository produced them.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_nearby_places(&self, latitude: f64, longitude: f64) -> LocationResult<Vec<Place>> {
        let result = self.nearby_places(latitude, longitude).await;
        record_outcome(NEARBY_PLACES, &result);
        result
    }

    async fn nearby_places(&self, latitude: f64, longitude: f64) -> LocationResult<Vec<Place>> {
        let origin = Coordinate::try_new(latitude, longitude)
            .map_err(|e| LocationError::Fetch(e.to_string()))?;

        let permit = Arc::clone(&self.lookup_slots)
            .acquire_owned()
            .await
            .map_err(|e| LocationError::Fetch(e.to_string()))?;

        let repository = Arc::clone(&self.repository);
        let timer = Timer::start("nearby_places.duration_ms");
        let worker = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let _timer = timer;
            repository.fetch_nearby(origin)
        });
        debug!("Dispatched nearby places lookup");

        match worker.await {
            Ok(Ok(places)) => {
                info!(count = places.len(), "Nearby places ready");
                Ok(places)
            }
            Ok(Err(e)) => {
                error!("Places fetch error: {}", e);
                Err(LocationError::Fetch(e.to_string()))
            }
            Err(join_error) => {
                let message = if join_error.is_panic() {
                    panic_message(join_error.into_panic())
                } else {
                    join_error.to_string()
                };
                error!("Places fetch error: {}", message);
                Err(LocationError::Fetch(message))
            }
        }
    }
}

fn record_outcome<T>(operation: &str, result: &LocationResult<T>) {
    match result {
        Ok(_) => metrics().increment(&success_counter(operation)),
        Err(e) => metrics().increment(&failure_counter(operation, e.code())),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map_or_else(|| "Places lookup panicked".to_string(), |s| (*s).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::{StaticLocationProvider, StaticPermission};
    use crate::provider::PlatformError;
    use nearby_places::PlacesError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SAN_FRANCISCO: LocationFix = LocationFix {
        latitude: 37.7749,
        longitude: -122.4194,
        accuracy: 12.5,
    };

    fn service(
        provider: StaticLocationProvider,
        permission: StaticPermission,
    ) -> LocationService<StaticLocationProvider, StaticPermission> {
        LocationService::new(provider, permission, MockPlacesRepository::with_seed(42))
    }

    struct PanickingRepository;

    impl PlacesRepository for PanickingRepository {
        fn fetch_nearby(&self, _origin: Coordinate) -> nearby_places::Result<Vec<Place>> {
            panic!("catalog index out of range");
        }
    }

    struct FailingRepository;

    impl PlacesRepository for FailingRepository {
        fn fetch_nearby(&self, _origin: Coordinate) -> nearby_places::Result<Vec<Place>> {
            Err(PlacesError::Source("quota exceeded".into()))
        }
    }

    struct CountingRepository {
        calls: AtomicUsize,
    }

    impl PlacesRepository for CountingRepository {
        fn fetch_nearby(&self, origin: Coordinate) -> nearby_places::Result<Vec<Place>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            MockPlacesRepository::new().fetch_nearby(origin)
        }
    }

    struct HangingProvider;

    impl LocationProvider for HangingProvider {
        async fn last_location(&self) -> Result<Option<LocationFix>, PlatformError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_check_permission() {
        let granted = service(StaticLocationProvider::without_fix(), StaticPermission::granted());
        assert_eq!(granted.check_permission().await, Ok(true));

        let denied = service(StaticLocationProvider::without_fix(), StaticPermission::denied());
        assert_eq!(denied.check_permission().await, Ok(false));
    }

    #[tokio::test]
    async fn test_check_permission_failure() {
        let svc = service(
            StaticLocationProvider::without_fix(),
            StaticPermission::failing("activity destroyed"),
        );
        let err = svc.check_permission().await.unwrap_err();
        assert_eq!(err, LocationError::Permission("activity destroyed".into()));
        assert_eq!(err.code(), "PERMISSION_ERROR");
    }

    #[tokio::test]
    async fn test_denied_permission_skips_provider() {
        let svc = service(StaticLocationProvider::with_fix(SAN_FRANCISCO), StaticPermission::denied());

        let err = svc.get_current_location().await.unwrap_err();
        assert_eq!(err, LocationError::PermissionDenied);
        assert_eq!(svc.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_permission_failure_skips_provider() {
        let svc = service(
            StaticLocationProvider::with_fix(SAN_FRANCISCO),
            StaticPermission::failing("boom"),
        );

        let err = svc.get_current_location().await.unwrap_err();
        assert_eq!(err.code(), "PERMISSION_ERROR");
        assert_eq!(svc.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_current_location_resolves_fix() {
        let svc = service(StaticLocationProvider::with_fix(SAN_FRANCISCO), StaticPermission::granted());

        let fix = svc.get_current_location().await.unwrap();
        assert_eq!(fix.latitude, 37.7749);
        assert_eq!(fix.longitude, -122.4194);
        assert_eq!(fix.accuracy, 12.5);
        assert_eq!(svc.provider().calls(), 1);
    }

    #[tokio::test]
    async fn test_permission_granted_later() {
        let svc = service(StaticLocationProvider::with_fix(SAN_FRANCISCO), StaticPermission::denied());
        assert!(svc.get_current_location().await.is_err());

        svc.permission().set_granted(true);
        assert!(svc.get_current_location().await.is_ok());
    }

    #[tokio::test]
    async fn test_no_cached_fix() {
        let svc = service(StaticLocationProvider::without_fix(), StaticPermission::granted());
        let err = svc.get_current_location().await.unwrap_err();
        assert_eq!(err, LocationError::Unavailable);
        assert_eq!(err.code(), "LOCATION_NULL");
    }

    #[tokio::test]
    async fn test_provider_error_passes_message() {
        let svc = service(
            StaticLocationProvider::failing("Location services are disabled"),
            StaticPermission::granted(),
        );
        let err = svc.get_current_location().await.unwrap_err();
        assert_eq!(err, LocationError::Provider("Location services are disabled".into()));
    }

    #[tokio::test]
    async fn test_invalid_fix_rejected() {
        let svc = service(
            StaticLocationProvider::with_fix(LocationFix::new(200.0, 0.0, 5.0)),
            StaticPermission::granted(),
        );
        let err = svc.get_current_location().await.unwrap_err();
        assert_eq!(err.code(), "LOCATION_ERROR");
    }

    #[tokio::test]
    async fn test_provider_timeout() {
        let config = LocationConfig {
            provider_timeout_ms: Some(20),
            ..LocationConfig::default()
        };
        let svc = LocationService::with_config(
            HangingProvider,
            StaticPermission::granted(),
            MockPlacesRepository::new(),
            &config,
        );

        let err = svc.get_current_location().await.unwrap_err();
        assert_eq!(err.code(), "LOCATION_ERROR");
        assert!(err.to_string().contains("timed out after 20ms"));
    }

    #[tokio::test]
    async fn test_hanging_provider_without_timeout_never_resolves() {
        let svc = LocationService::new(HangingProvider, StaticPermission::granted(), MockPlacesRepository::new());
        let waited =
            tokio::time::timeout(Duration::from_millis(30), svc.get_current_location()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_nearby_places() {
        let svc = service(StaticLocationProvider::without_fix(), StaticPermission::granted());
        let places = svc.get_nearby_places(37.7749, -122.4194).await.unwrap();

        assert!((10..=15).contains(&places.len()));
        for place in &places {
            assert!((place.latitude - 37.7749).abs() <= 0.01);
            assert!((place.longitude - -122.4194).abs() <= 0.01);
        }
    }

    #[tokio::test]
    async fn test_nearby_places_does_not_need_permission() {
        let svc = service(StaticLocationProvider::without_fix(), StaticPermission::denied());
        assert!(svc.get_nearby_places(0.0, 0.0).await.is_ok());
    }

    #[tokio::test]
    async fn test_nearby_places_invalid_coordinate() {
        let repository = CountingRepository {
            calls: AtomicUsize::new(0),
        };
        let svc = LocationService::new(
            StaticLocationProvider::without_fix(),
            StaticPermission::granted(),
            repository,
        );

        let err = svc.get_nearby_places(95.0, 0.0).await.unwrap_err();
        assert_eq!(err.code(), "FETCH_ERROR");
        assert!(err.to_string().contains("latitude"));
        assert_eq!(svc.repository.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repository_error_becomes_fetch_error() {
        let svc = LocationService::new(
            StaticLocationProvider::without_fix(),
            StaticPermission::granted(),
            FailingRepository,
        );
        let err = svc.get_nearby_places(1.0, 1.0).await.unwrap_err();
        assert_eq!(err, LocationError::Fetch("Places source failed: quota exceeded".into()));
    }

    #[tokio::test]
    async fn test_panicking_worker_becomes_fetch_error() {
        let svc = LocationService::new(
            StaticLocationProvider::without_fix(),
            StaticPermission::granted(),
            PanickingRepository,
        );
        let err = svc.get_nearby_places(1.0, 1.0).await.unwrap_err();
        assert_eq!(err, LocationError::Fetch("catalog index out of range".into()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_lookups_are_independent() {
        let config = LocationConfig {
            max_concurrent_lookups: 2,
            ..LocationConfig::default()
        };
        let svc = Arc::new(LocationService::with_config(
            StaticLocationProvider::without_fix(),
            StaticPermission::granted(),
            MockPlacesRepository::new(),
            &config,
        ));

        let lookups: Vec<_> = (0..8_i32)
            .map(|i| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move { svc.get_nearby_places(10.0 + f64::from(i), 20.0).await })
            })
            .collect();

        for (i, lookup) in lookups.into_iter().enumerate() {
            let places = lookup.await.unwrap().unwrap();
            let origin_lat = 10.0 + i as f64;
            assert!(places.iter().all(|p| (p.latitude - origin_lat).abs() <= 0.01));
        }
        assert_eq!(svc.lookup_slots.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_outcomes_are_counted() {
        let svc = service(StaticLocationProvider::without_fix(), StaticPermission::denied());
        let before = metrics().counter("current_location.failure.PERMISSION_DENIED");
        let _ = svc.get_current_location().await;
        let after = metrics().counter("current_location.failure.PERMISSION_DENIED");
        assert!(after > before);
    }
}
