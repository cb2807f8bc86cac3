//! Configuration file handling.
//!
//! Settings live in `~/.mapsketch/config.ini`:
//!
//! ```ini
//! [geocoder]
//! api_key = ...
//! base_url = https://maps.googleapis.com/maps/api/geocode/json
//! timeout_secs = 10
//!
//! [map]
//! default_zoom = 20
//! search_zoom = 15
//! satellite = false
//!
//! [location]
//! latitude = 51.5
//! longitude = -0.12
//!
//! [logging]
//! file = ~/.mapsketch/mapsketch.log
//! ```
//!
//! Missing keys fall back to [`defaults`]. The `MAPSKETCH_API_KEY`
//! environment variable overrides `geocoder.api_key`.

pub mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, GeocoderSettings, LocationSettings, LoggingSettings, MapSettings};
