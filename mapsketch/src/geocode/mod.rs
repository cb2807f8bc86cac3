//! Geocoding service abstraction.
//!
//! The map service is an external collaborator. This module defines what the
//! rest of the crate needs from it, forward geocoding (free text to
//! coordinate) and reverse geocoding (coordinate to address), behind the
//! [`Geocoder`] trait, and provides a Google Geocoding API implementation.
//!
//! ```ignore
//! use mapsketch::geocode::{GeocoderConfig, GoogleGeocoder, ReqwestClient};
//!
//! let client = ReqwestClient::new()?;
//! let geocoder = GoogleGeocoder::new(client, GeocoderConfig::with_api_key(key));
//! let address = geocoder.reverse(coord).await?;
//! ```

mod google;
mod http;
mod types;

pub use google::{GeocoderConfig, GoogleGeocoder, DEFAULT_GEOCODE_URL};
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use types::{GeocodeError, Geocoder};

#[cfg(test)]
pub use http::tests::MockHttpClient;
