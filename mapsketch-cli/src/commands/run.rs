//! `mapsketch run`: the interactive map.

use tokio::sync::mpsc;
use tracing::{info, warn};

use mapsketch::location::GeolocationError;
use mapsketch::session::AnnotationSession;

use crate::error::CliError;
use crate::runner::CliRunner;
use crate::tui_app::{run_tui, TuiAppConfig};

/// Capacity of the device-location channel.
const LOCATION_CHANNEL_CAPACITY: usize = 8;

/// Start the session and hand the terminal to the map UI.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    if !atty::is(atty::Stream::Stdout) {
        return Err(CliError::Terminal(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "the interactive map needs a terminal; use 'area', 'lookup' or 'search' instead",
        )));
    }

    runner.log_startup("run");
    let runtime = runner.create_runtime()?;
    let geocoder = runner.create_geocoder()?;
    let config = runner.config();

    let session = AnnotationSession::new(geocoder, config.view_config(), runtime.handle().clone());

    let (location_tx, location_rx) = mpsc::channel(LOCATION_CHANNEL_CAPACITY);
    let watch = {
        let _enter = runtime.enter();
        match runner.location_source().watch(location_tx) {
            Ok(watch) => Some(watch),
            Err(GeolocationError::Unsupported) => None,
            Err(e) => {
                warn!(error = %e, "Geolocation unavailable, keeping default camera");
                None
            }
        }
    };

    let result = run_tui(TuiAppConfig {
        session,
        runtime: &runtime,
        location_rx,
    });

    if let Some(watch) = watch {
        runtime.block_on(watch.clear());
    }
    info!("Interactive session ended");
    result
}
