//! Settings structs, one per `[section]` of the INI file.

use std::path::PathBuf;
use std::time::Duration;

use crate::coord::LatLng;
use crate::geocode::GeocoderConfig;
use crate::view::ViewConfig;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub geocoder: GeocoderSettings,
    pub map: MapSettings,
    pub location: LocationSettings,
    pub logging: LoggingSettings,
}

/// Geocoding service settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderSettings {
    /// Google Maps Platform API key. Not validated; requests without it fail
    /// at the service.
    pub api_key: Option<String>,
    /// Geocoding endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Preferred result language (e.g. "en")
    pub language: Option<String>,
}

/// Camera settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub default_zoom: f64,
    pub search_zoom: f64,
    /// Start in satellite view
    pub satellite: bool,
}

/// Device position settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSettings {
    /// Fixed device position; `None` means geolocation is unsupported.
    pub position: Option<LatLng>,
    /// How often the position is re-reported
    pub interval_secs: u64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl ConfigFile {
    /// Geocoder configuration derived from `[geocoder]`.
    pub fn geocoder_config(&self) -> GeocoderConfig {
        GeocoderConfig {
            api_key: self.geocoder.api_key.clone(),
            base_url: self.geocoder.base_url.clone(),
            language: self.geocoder.language.clone(),
        }
    }

    /// Camera configuration derived from `[map]`.
    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            default_center: LatLng::default(),
            default_zoom: self.map.default_zoom,
            search_zoom: self.map.search_zoom,
            satellite: self.map.satellite,
        }
    }

    pub fn location_interval(&self) -> Duration {
        Duration::from_secs(self.location.interval_secs.max(1))
    }

    /// Replace the API key when `key` holds a non-blank value.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.geocoder.api_key = Some(key);
        }
        self
    }

    /// Apply the `MAPSKETCH_API_KEY` environment override.
    pub fn with_env_overrides(self) -> Self {
        let key = std::env::var(super::defaults::API_KEY_ENV).ok();
        self.with_api_key_override(key)
    }
}
