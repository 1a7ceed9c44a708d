//! Subcommand implementations.
//!
//! Each command returns the process exit code. Tagged façade failures are
//! reported and mapped to `exit_codes::FAILURE`; anything else bubbles up
//! through `anyhow`.

use anyhow::Result;
use clap::Args;
use nearby_cli::output::{
    format_coordinate, format_count, format_duration, print_places, Status,
};
use nearby_cli::progress;
use nearby_core::config::{Config, DeviceConfig};
use nearby_core::error::exit_codes;
use nearby_location::view_model::LOCATION_FAILED_MESSAGE;
use nearby_location::{
    LocationError, LocationFix, LocationService, PlacesViewModel, StaticLocationProvider,
    StaticPermission,
};
use nearby_places::{sort_by_distance, MockPlacesRepository, Place};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

type Service = LocationService<StaticLocationProvider, StaticPermission, MockPlacesRepository>;

/// Simulated device state, defaulting to the `[device]` config section
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Latitude reported by the device
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude reported by the device
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Accuracy of the fix in meters
    #[arg(long)]
    pub accuracy: Option<f64>,

    /// Simulate a device without location permission
    #[arg(long)]
    pub deny: bool,

    /// Simulate a device with no cached fix
    #[arg(long)]
    pub no_fix: bool,
}

impl DeviceArgs {
    fn provider(&self, device: &DeviceConfig) -> StaticLocationProvider {
        if self.no_fix {
            return StaticLocationProvider::without_fix();
        }
        StaticLocationProvider::with_fix(LocationFix::new(
            self.lat.unwrap_or(device.latitude),
            self.lon.unwrap_or(device.longitude),
            self.accuracy.unwrap_or(device.accuracy),
        ))
    }
}

/// Options for place lookups
#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    /// Seed the generator for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Order places nearest first
    #[arg(long)]
    pub sort: bool,
}

/// Shared state for one invocation
pub struct Context {
    config: Config,
    json: bool,
}

impl Context {
    pub fn new(config: Config, json: bool) -> Self {
        Self { config, json }
    }

    fn device(&self) -> &DeviceConfig {
        &self.config.schema.device
    }

    fn permission(&self, deny: bool) -> StaticPermission {
        if deny || !self.device().permission_granted {
            StaticPermission::denied()
        } else {
            StaticPermission::granted()
        }
    }

    fn service(
        &self,
        provider: StaticLocationProvider,
        permission: StaticPermission,
        lookup: Option<&LookupArgs>,
    ) -> Result<Service> {
        let mut generator = self.config.schema.generator.clone();
        if let Some(seed) = lookup.and_then(|l| l.seed) {
            generator = generator.with_seed(seed);
        }
        let repository = MockPlacesRepository::from_config(generator)?;
        Ok(LocationService::with_config(
            provider,
            permission,
            repository,
            &self.config.schema.location,
        ))
    }

    fn fail(&self, err: LocationError) -> Result<i32> {
        debug!(code = err.code(), "Operation rejected");
        if self.json {
            print_json(&err.to_rejection())?;
        } else {
            Status::report(&nearby_core::Error::from(err));
        }
        Ok(exit_codes::FAILURE)
    }

    fn show_places(&self, latitude: f64, longitude: f64, places: &[Place], elapsed: Duration) {
        Status::header(&format!(
            "{} near {}",
            format_count(places.len(), "place", "places"),
            format_coordinate(latitude, longitude)
        ));
        print_places(places);
        Status::info(&format!("Lookup took {}", format_duration(elapsed)));
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct PermissionOutput {
    granted: bool,
}

#[derive(Serialize)]
struct ScanOutput<'a> {
    location: Option<LocationFix>,
    places: &'a [Place],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// `permission`: report whether fine location is granted
pub async fn permission(ctx: &Context, deny: bool) -> Result<i32> {
    let service = ctx.service(StaticLocationProvider::without_fix(), ctx.permission(deny), None)?;

    match service.check_permission().await {
        Ok(granted) => {
            if ctx.json {
                print_json(&PermissionOutput { granted })?;
            } else if granted {
                Status::success("Location permission granted");
            } else {
                Status::warning("Location permission not granted");
            }
            Ok(exit_codes::SUCCESS)
        }
        Err(e) => ctx.fail(e),
    }
}

/// `locate`: read the device's last known fix
pub async fn locate(ctx: &Context, device: &DeviceArgs) -> Result<i32> {
    let service = ctx.service(device.provider(ctx.device()), ctx.permission(device.deny), None)?;

    match service.get_current_location().await {
        Ok(fix) => {
            if ctx.json {
                print_json(&fix)?;
            } else {
                Status::success(&format!(
                    "Located at {} (±{:.0} m)",
                    format_coordinate(fix.latitude, fix.longitude),
                    fix.accuracy
                ));
            }
            Ok(exit_codes::SUCCESS)
        }
        Err(e) => ctx.fail(e),
    }
}

/// `places`: list places around an explicit position
pub async fn places(ctx: &Context, latitude: f64, longitude: f64, lookup: &LookupArgs) -> Result<i32> {
    let service = ctx.service(
        StaticLocationProvider::without_fix(),
        StaticPermission::granted(),
        Some(lookup),
    )?;

    let spinner = progress::spinner("Looking up nearby places...", ctx.json);
    let started = Instant::now();

    match service.get_nearby_places(latitude, longitude).await {
        Ok(mut places) => {
            progress::finish_success(&spinner, &format_count(places.len(), "place", "places"));
            if lookup.sort {
                sort_by_distance(&mut places);
            }
            if ctx.json {
                print_json(&places)?;
            } else {
                ctx.show_places(latitude, longitude, &places, started.elapsed());
            }
            Ok(exit_codes::SUCCESS)
        }
        Err(e) => {
            progress::finish_error(&spinner, "Lookup failed");
            ctx.fail(e)
        }
    }
}

/// `scan`: locate the device, then list places around the fix
pub async fn scan(ctx: &Context, device: &DeviceArgs, lookup: &LookupArgs) -> Result<i32> {
    let service = ctx.service(
        device.provider(ctx.device()),
        ctx.permission(device.deny),
        Some(lookup),
    )?;
    let view_model = PlacesViewModel::new(Arc::new(service));
    let error = view_model.error();
    let location = view_model.location();
    let places = view_model.places();

    let spinner = progress::spinner("Scanning...", ctx.json);
    let started = Instant::now();
    view_model.refresh().await?;

    let error = error.borrow().clone();
    let location = *location.borrow();
    let mut places = places.borrow().clone();
    if lookup.sort {
        sort_by_distance(&mut places);
    }

    match (&error, location) {
        (None, Some(fix)) => {
            progress::finish_success(&spinner, "Scan complete");
            if ctx.json {
                print_json(&ScanOutput { location, places: &places, error: None })?;
            } else {
                Status::success(&format!(
                    "Located at {} (±{:.0} m)",
                    format_coordinate(fix.latitude, fix.longitude),
                    fix.accuracy
                ));
                ctx.show_places(fix.latitude, fix.longitude, &places, started.elapsed());
            }
            Ok(exit_codes::SUCCESS)
        }
        _ => {
            progress::finish_error(&spinner, "Scan failed");
            let message = error.as_deref().unwrap_or(LOCATION_FAILED_MESSAGE);
            if ctx.json {
                print_json(&ScanOutput { location, places: &places, error: Some(message) })?;
            } else {
                Status::error(message);
            }
            Ok(exit_codes::FAILURE)
        }
    }
}
