//! fleetctl - Entry Point
//!
//! Interactive command-line client for a device fleet management service.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use fleetctl::app::args::Args;
use fleetctl::app::options::AppOptions;
use fleetctl::app::run::run;
use fleetctl::errors::FleetError;
use fleetctl::filesys::file::File;
use fleetctl::logs::init_logging;
use fleetctl::storage::settings::Settings;
use fleetctl::utils::version_info;

#[tokio::main]
async fn main() -> ExitCode {
    match start(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("fleetctl failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            if matches!(
                e.downcast_ref::<FleetError>(),
                Some(FleetError::ConnectError { .. })
            ) {
                eprintln!("Make sure the server is running and reachable.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn start(args: Args) -> anyhow::Result<()> {
    let settings = match &args.config {
        Some(path) => Settings::load(&File::new(path))
            .await
            .context("Unable to load settings")?,
        None => Settings::default(),
    };

    let options = AppOptions::resolve(args, settings).context("Invalid options")?;

    // Held until exit so buffered file logs are flushed
    let _log_guard = match init_logging(options.logs.clone()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    let version = version_info();
    info!(
        "Running fleetctl {} ({}) with options: {:?}",
        version.version, version.git_hash, options
    );

    run(options).await?;
    Ok(())
}
