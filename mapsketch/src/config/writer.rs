//! INI serialization: produces the commented `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let api_key = config.geocoder.api_key.as_deref().unwrap_or("");
    let language = config.geocoder.language.as_deref().unwrap_or("");
    let (latitude, longitude) = config
        .location
        .position
        .map(|p| (p.lat.to_string(), p.lng.to_string()))
        .unwrap_or_default();

    format!(
        r#"[geocoder]
; Google Maps Platform API key (Geocoding API must be enabled)
; The MAPSKETCH_API_KEY environment variable takes precedence
api_key = {}
; Geocoding endpoint
base_url = {}
; Request timeout in seconds (default: 10)
timeout_secs = {}
; Preferred result language, e.g. en, fr (empty: service default)
language = {}

[map]
; Initial zoom level, 0-22 (default: 20)
default_zoom = {}
; Zoom level after a search (default: 15)
search_zoom = {}
; Start in satellite view (default: false)
satellite = {}

[location]
; Device position used to centre the map on start-up
; Leave both empty if unknown; the map then starts at 0, 0
latitude = {}
longitude = {}
; Seconds between position reports (default: 30)
interval_secs = {}

[logging]
; Log file path (default: ~/.mapsketch/mapsketch.log)
file = {}
"#,
        api_key,
        config.geocoder.base_url,
        config.geocoder.timeout_secs,
        language,
        config.map.default_zoom,
        config.map.search_zoom,
        config.map.satellite,
        latitude,
        longitude,
        config.location.interval_secs,
        path_to_string(&config.logging.file),
    )
}

/// Render a path, abbreviating the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_config_parses_back() {
        let mut config = ConfigFile::default();
        config.geocoder.language = Some("de".to_string());
        config.map.default_zoom = 17.5;

        let text = to_config_string(&config);
        let ini = ini::Ini::load_from_str(&text).unwrap();
        let parsed = super::super::parser::parse_ini(&ini).unwrap();

        assert_eq!(parsed.geocoder.language.as_deref(), Some("de"));
        assert_eq!(parsed.map.default_zoom, 17.5);
        assert!(parsed.location.position.is_none());
    }

    #[test]
    fn test_api_key_is_blank_by_default() {
        let text = to_config_string(&ConfigFile::default());
        assert!(text.contains("api_key = \n"));
    }
}
