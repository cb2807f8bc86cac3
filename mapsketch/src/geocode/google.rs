//! Google Maps Platform Geocoding API client.
//!
//! # API Endpoint
//!
//! - Reverse: `GET {base}?latlng={lat},{lng}&key={API_KEY}`
//! - Forward: `GET {base}?address={query}&key={API_KEY}`
//!
//! Both answer with `{"status": "...", "results": [...]}`. `OK` carries at
//! least one result; `ZERO_RESULTS` is a successful "no match". Any other
//! status (`REQUEST_DENIED`, `OVER_QUERY_LIMIT`, `INVALID_REQUEST`, ...) is an
//! error.
//!
//! # Authentication
//!
//! The API key is passed through as-is. A missing key is not rejected here;
//! the request goes out without one and the service answers
//! `REQUEST_DENIED`.

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http::HttpClient;
use super::types::{GeocodeError, Geocoder};
use crate::coord::LatLng;

/// Default Geocoding API endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Connection settings for [`GoogleGeocoder`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderConfig {
    /// Google Maps Platform API key.
    pub api_key: Option<String>,
    /// Endpoint URL (overridable for proxies and tests).
    pub base_url: String,
    /// Preferred result language (e.g. "en").
    pub language: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEOCODE_URL.to_string(),
            language: None,
        }
    }
}

impl GeocoderConfig {
    /// Default endpoint with the given key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Geocoder backed by the Google Geocoding API.
pub struct GoogleGeocoder<C: HttpClient> {
    http_client: C,
    config: GeocoderConfig,
}

impl<C: HttpClient> GoogleGeocoder<C> {
    /// Create a geocoder using `http_client` for transport.
    pub fn new(http_client: C, config: GeocoderConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Access the configuration.
    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    /// Build a request URL with `params` plus key and language.
    fn build_url(&self, params: &[(&str, String)]) -> Result<Url, GeocodeError> {
        let mut all: Vec<(&str, String)> = params.to_vec();
        if let Some(language) = &self.config.language {
            all.push(("language", language.clone()));
        }
        if let Some(key) = &self.config.api_key {
            all.push(("key", key.clone()));
        }

        Url::parse_with_params(&self.config.base_url, &all).map_err(|e| {
            GeocodeError::InvalidResponse(format!(
                "Invalid geocoder URL '{}': {}",
                self.config.base_url, e
            ))
        })
    }

    /// Perform a request and return the results of an `OK` answer.
    ///
    /// `ZERO_RESULTS` yields an empty list.
    async fn fetch(&self, url: Url) -> Result<Vec<GeocodeResult>, GeocodeError> {
        let body = self.http_client.get(url.as_str()).await?;

        let response: GeocodeResponse = serde_json::from_slice(&body)
            .map_err(|e| GeocodeError::InvalidResponse(format!("Malformed JSON: {}", e)))?;

        match response.status.as_str() {
            "OK" => Ok(response.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => {
                warn!(
                    status = %response.status,
                    message = response.error_message.as_deref().unwrap_or(""),
                    "Geocoder rejected request"
                );
                Err(GeocodeError::Status {
                    status: response.status,
                    message: response.error_message,
                })
            }
        }
    }
}

impl<C: HttpClient> Geocoder for GoogleGeocoder<C> {
    async fn reverse(&self, coord: LatLng) -> Result<Option<String>, GeocodeError> {
        let url = self.build_url(&[("latlng", format!("{},{}", coord.lat, coord.lng))])?;
        let results = self.fetch(url).await?;

        let address = results
            .into_iter()
            .next()
            .and_then(|r| r.formatted_address)
            .filter(|a| !a.is_empty());

        debug!(
            lat = coord.lat,
            lng = coord.lng,
            found = address.is_some(),
            "Reverse geocode complete"
        );
        Ok(address)
    }

    async fn search(&self, query: &str) -> Result<Option<LatLng>, GeocodeError> {
        let url = self.build_url(&[("address", query.to_string())])?;
        let results = self.fetch(url).await?;

        let Some(location) = results
            .into_iter()
            .next()
            .and_then(|r| r.geometry)
            .map(|g| g.location)
        else {
            debug!(query, "Search returned no results");
            return Ok(None);
        };

        let coord = LatLng::new(location.lat, location.lng).map_err(|e| {
            GeocodeError::InvalidResponse(format!("Geocoder returned bad coordinate: {}", e))
        })?;

        debug!(query, lat = coord.lat, lng = coord.lng, "Search resolved");
        Ok(Some(coord))
    }

    fn name(&self) -> &str {
        "Google Geocoding"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::MockHttpClient;

    const REVERSE_OK: &str = r#"{
        "status": "OK",
        "results": [
            {
                "formatted_address": "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
                "geometry": { "location": { "lat": 37.4224, "lng": -122.0842 } }
            },
            { "formatted_address": "Mountain View, CA, USA" }
        ]
    }"#;

    fn geocoder(mock: MockHttpClient) -> GoogleGeocoder<MockHttpClient> {
        GoogleGeocoder::new(mock, GeocoderConfig::with_api_key("test-key"))
    }

    #[tokio::test]
    async fn test_reverse_returns_first_formatted_address() {
        let mock = MockHttpClient::ok(REVERSE_OK);
        let geocoder = geocoder(mock.clone());

        let address = geocoder
            .reverse(LatLng::new_unchecked(37.4224, -122.0842))
            .await
            .unwrap();

        assert_eq!(
            address.as_deref(),
            Some("1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA")
        );
        let url = mock.last_url().unwrap();
        assert!(url.starts_with(DEFAULT_GEOCODE_URL));
        assert!(url.contains("latlng=37.4224%2C-122.0842"));
        assert!(url.contains("key=test-key"));
    }

    #[tokio::test]
    async fn test_reverse_zero_results_is_none() {
        let geocoder = geocoder(MockHttpClient::ok(r#"{"status":"ZERO_RESULTS","results":[]}"#));

        let address = geocoder.reverse(LatLng::default()).await.unwrap();
        assert!(address.is_none());
    }

    #[tokio::test]
    async fn test_denied_request_is_error() {
        let geocoder = geocoder(MockHttpClient::ok(
            r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid."}"#,
        ));

        let result = geocoder.reverse(LatLng::default()).await;
        assert!(matches!(
            result,
            Err(GeocodeError::Status { ref status, .. }) if status == "REQUEST_DENIED"
        ));
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_response() {
        let geocoder = geocoder(MockHttpClient::ok("<html>"));

        let result = geocoder.search("anywhere").await;
        assert!(matches!(result, Err(GeocodeError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_http_error_propagates() {
        let geocoder = geocoder(MockHttpClient::err(GeocodeError::Http("HTTP 500".into())));

        let result = geocoder.search("anywhere").await;
        assert_eq!(result, Err(GeocodeError::Http("HTTP 500".into())));
    }

    #[tokio::test]
    async fn test_search_returns_first_location_and_encodes_query() {
        let mock = MockHttpClient::ok(REVERSE_OK);
        let geocoder = geocoder(mock.clone());

        let coord = geocoder.search("Mountain View & Co").await.unwrap();

        assert_eq!(coord, Some(LatLng::new_unchecked(37.4224, -122.0842)));
        let url = mock.last_url().unwrap();
        assert!(url.contains("address=Mountain+View+%26+Co"));
    }

    #[tokio::test]
    async fn test_missing_key_is_not_validated() {
        let mock = MockHttpClient::ok(r#"{"status":"ZERO_RESULTS"}"#);
        let geocoder = GoogleGeocoder::new(mock.clone(), GeocoderConfig::default());

        assert!(geocoder.search("nowhere").await.unwrap().is_none());
        assert!(!mock.last_url().unwrap().contains("key="));
    }
}
