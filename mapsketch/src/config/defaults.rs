//! Default values for every setting.

use crate::geocode::{DEFAULT_GEOCODE_URL, DEFAULT_TIMEOUT_SECS};
use crate::location::DEFAULT_REPORT_INTERVAL;
use crate::view::{DEFAULT_ZOOM, SEARCH_ZOOM};

use super::file::config_directory;
use super::settings::*;

/// Environment variable overriding `geocoder.api_key`.
pub const API_KEY_ENV: &str = "MAPSKETCH_API_KEY";

/// Config directory name under the home directory.
pub const CONFIG_DIR_NAME: &str = ".mapsketch";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "mapsketch.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            geocoder: GeocoderSettings {
                api_key: None,
                base_url: DEFAULT_GEOCODE_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                language: None,
            },
            map: MapSettings {
                default_zoom: DEFAULT_ZOOM,
                search_zoom: SEARCH_ZOOM,
                satellite: false,
            },
            location: LocationSettings {
                position: None,
                interval_secs: DEFAULT_REPORT_INTERVAL.as_secs(),
            },
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE),
            },
        }
    }
}
