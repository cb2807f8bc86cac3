//! INI parsing: the single place where INI key names map to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::{LatLng, MAX_ZOOM, MIN_ZOOM};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [geocoder] section
    if let Some(section) = ini.section(Some("geocoder")) {
        if let Some(v) = section.get("api_key") {
            let v = v.trim();
            if !v.is_empty() {
                config.geocoder.api_key = Some(v.to_string());
            }
        }
        if let Some(v) = section.get("base_url") {
            let v = v.trim();
            if !v.is_empty() {
                if reqwest::Url::parse(v).is_err() {
                    return Err(invalid("geocoder", "base_url", v, "must be an absolute URL"));
                }
                config.geocoder.base_url = v.to_string();
            }
        }
        if let Some(v) = section.get("timeout_secs") {
            config.geocoder.timeout_secs = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "geocoder",
                        "timeout_secs",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
        if let Some(v) = section.get("language") {
            let v = v.trim();
            if !v.is_empty() {
                config.geocoder.language = Some(v.to_string());
            }
        }
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = section.get("default_zoom") {
            config.map.default_zoom = parse_zoom("default_zoom", v)?;
        }
        if let Some(v) = section.get("search_zoom") {
            config.map.search_zoom = parse_zoom("search_zoom", v)?;
        }
        if let Some(v) = section.get("satellite") {
            config.map.satellite = parse_bool("map", "satellite", v)?;
        }
    }

    // [location] section
    if let Some(section) = ini.section(Some("location")) {
        let latitude = non_empty(section.get("latitude"));
        let longitude = non_empty(section.get("longitude"));

        config.location.position = match (latitude, longitude) {
            (Some(lat), Some(lng)) => Some(parse_position(lat, lng)?),
            (None, None) => None,
            (Some(lat), None) => {
                return Err(invalid(
                    "location",
                    "longitude",
                    "",
                    &format!("required when latitude is set ({})", lat),
                ))
            }
            (None, Some(lng)) => {
                return Err(invalid(
                    "location",
                    "latitude",
                    "",
                    &format!("required when longitude is set ({})", lng),
                ))
            }
        };

        if let Some(v) = section.get("interval_secs") {
            config.location.interval_secs = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "location",
                        "interval_secs",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_zoom(key: &str, v: &str) -> Result<f64, ConfigFileError> {
    match v.trim().parse::<f64>() {
        Ok(zoom) if (MIN_ZOOM..=MAX_ZOOM).contains(&zoom) => Ok(zoom),
        _ => Err(invalid("map", key, v, "must be a number between 0 and 22")),
    }
}

fn parse_bool(section: &str, key: &str, v: &str) -> Result<bool, ConfigFileError> {
    match v.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(section, key, v, "must be true or false")),
    }
}

fn parse_position(lat: &str, lng: &str) -> Result<LatLng, ConfigFileError> {
    let latitude = lat
        .parse::<f64>()
        .map_err(|_| invalid("location", "latitude", lat, "must be a number"))?;
    let longitude = lng
        .parse::<f64>()
        .map_err(|_| invalid("location", "longitude", lng, "must be a number"))?;

    LatLng::new(latitude, longitude).map_err(|e| ConfigFileError::InvalidValue {
        section: "location".to_string(),
        key: "latitude/longitude".to_string(),
        value: format!("{}, {}", lat, lng),
        reason: e.to_string(),
    })
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
