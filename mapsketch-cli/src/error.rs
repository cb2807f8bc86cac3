//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use mapsketch::config::ConfigFileError;
use mapsketch::geocode::GeocodeError;
use mapsketch::view::SearchError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Geocoding request failed
    Geocode(GeocodeError),
    /// Search did not produce a location
    Search(SearchError),
    /// Terminal setup or drawing failed
    Terminal(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Geocode(GeocodeError::Status { status, .. })
            | CliError::Search(SearchError::Geocoder(GeocodeError::Status { status, .. }))
                if status == "REQUEST_DENIED" =>
            {
                eprintln!();
                eprintln!("Make sure:");
                eprintln!("  1. Geocoding API is enabled in Google Cloud Console");
                eprintln!("  2. Billing is enabled for your project");
                eprintln!("  3. api_key is set in config.ini or MAPSKETCH_API_KEY is exported");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Run 'mapsketch config path' to locate the configuration file.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start runtime: {}", e),
            CliError::Geocode(e) => write!(f, "Geocoding failed: {}", e),
            CliError::Search(e) => write!(f, "{}", e),
            CliError::Terminal(e) => write!(f, "Terminal error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) | CliError::Terminal(e) => Some(e),
            CliError::Geocode(e) => Some(e),
            CliError::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<GeocodeError> for CliError {
    fn from(e: GeocodeError) -> Self {
        CliError::Geocode(e)
    }
}

impl From<SearchError> for CliError {
    fn from(e: SearchError) -> Self {
        CliError::Search(e)
    }
}
