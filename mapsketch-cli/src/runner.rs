//! CLI runner for common setup and operations.
//!
//! Encapsulates configuration loading, logging initialization and creation
//! of the runtime and geocoder shared by the command handlers.

use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::info;

use mapsketch::config::ConfigFile;
use mapsketch::geocode::{GoogleGeocoder, ReqwestClient};
use mapsketch::location::{self, LocationSource};
use mapsketch::logging::{init_logging, LoggingGuard, LoggingOptions};

use crate::error::CliError;

/// Geocoder used by every command.
pub type CliGeocoder = GoogleGeocoder<ReqwestClient>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Keeps logging active while the runner exists
    _logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// When stdout is a TTY, stdout logging is disabled so log lines cannot
    /// corrupt the interactive map.
    pub fn with_debug(debug_mode: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?.with_env_overrides();

        let stdout_enabled = !atty::is(atty::Stream::Stdout);
        let options = LoggingOptions {
            file: config.logging.file.clone(),
            stdout: stdout_enabled,
            debug: debug_mode,
        };

        let logging_guard =
            init_logging(&options).map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("mapsketch v{}", mapsketch::VERSION);
        info!(command, "mapsketch CLI command started");
        if self.config.geocoder.api_key.is_none() {
            info!("No geocoder API key configured; lookups will be rejected by the service");
        }
    }

    /// Build the multi-threaded runtime lookups run on.
    pub fn create_runtime(&self) -> Result<Runtime, CliError> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("mapsketch-worker")
            .build()
            .map_err(CliError::Runtime)
    }

    /// Build the geocoder from `[geocoder]` settings.
    pub fn create_geocoder(&self) -> Result<Arc<CliGeocoder>, CliError> {
        let http_client = ReqwestClient::with_timeout(self.config.geocoder.timeout_secs)?;
        let geocoder = GoogleGeocoder::new(http_client, self.config.geocoder_config());
        info!(base_url = %self.config.geocoder.base_url, "Geocoder created");
        Ok(Arc::new(geocoder))
    }

    /// Device position source from `[location]` settings.
    pub fn location_source(&self) -> Box<dyn LocationSource> {
        location::source_for(
            self.config.location.position,
            self.config.location_interval(),
        )
    }
}
