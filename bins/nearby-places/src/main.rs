//! nearby-places CLI
//!
//! Checks location permission, reads the device position and lists the
//! places around it. Without a platform location service the device is
//! simulated from the `[device]` config section.

use anyhow::Result;
use clap::{Parser, Subcommand};
use nearby_cli::output::Status;
use nearby_core::config::Config;
use nearby_core::error::exit_codes;
use nearby_telemetry::TelemetryConfig;
use std::path::PathBuf;

mod commands;

use commands::{Context, DeviceArgs, LookupArgs};

#[derive(Parser)]
#[command(name = "nearby-places")]
#[command(about = "Locate the device and list nearby places")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether fine location permission is granted
    Permission {
        /// Simulate a device without location permission
        #[arg(long)]
        deny: bool,
    },

    /// Read the device's last known location
    Locate {
        #[command(flatten)]
        device: DeviceArgs,
    },

    /// List places around a position
    Places {
        /// Latitude of the lookup origin
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude of the lookup origin
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Locate the device, then list places around it
    Scan {
        #[command(flatten)]
        device: DeviceArgs,
        #[command(flatten)]
        lookup: LookupArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&e.to_report())?);
            } else {
                Status::report(&e);
            }
            std::process::exit(exit_codes::CONFIG_ERROR);
        }
    };

    let telemetry =
        TelemetryConfig::from(&config.schema.logging).with_verbosity(cli.verbose);
    nearby_telemetry::init_with_config(telemetry)?;
    tracing::debug!(
        session = nearby_telemetry::session_id(),
        config = ?config.path,
        "Starting nearby-places"
    );

    let ctx = Context::new(config, cli.json);
    let exit_code = match cli.command {
        Commands::Permission { deny } => commands::permission(&ctx, deny).await?,
        Commands::Locate { device } => commands::locate(&ctx, &device).await?,
        Commands::Places { lat, lon, lookup } => {
            commands::places(&ctx, lat, lon, &lookup).await?
        }
        Commands::Scan { device, lookup } => commands::scan(&ctx, &device, &lookup).await?,
    };

    if cli.verbose >= 2 {
        tracing::debug!(
            metrics = %nearby_telemetry::metrics().export_json(),
            "Lookup metrics"
        );
    }

    std::process::exit(exit_code);
}
