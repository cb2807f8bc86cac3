//! Geocoder trait and error types.

use std::future::Future;

use thiserror::Error;

use crate::coord::LatLng;

/// Errors that can occur while talking to the geocoding service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// HTTP request failed (connection, timeout, non-2xx status).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service answered with something we could not interpret.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The service rejected the request (e.g. `REQUEST_DENIED`).
    #[error("Geocoder returned {status}{}", detail(.message))]
    Status {
        status: String,
        message: Option<String>,
    },
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Forward and reverse geocoding.
///
/// `Ok(None)` means the service answered but had no match; `Err` means the
/// lookup itself failed.
pub trait Geocoder: Send + Sync {
    /// Resolve a coordinate to a formatted address.
    fn reverse(
        &self,
        coord: LatLng,
    ) -> impl Future<Output = Result<Option<String>, GeocodeError>> + Send;

    /// Resolve a free-text query to a coordinate.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<LatLng>, GeocodeError>> + Send;

    /// Name for logging.
    fn name(&self) -> &str;
}
