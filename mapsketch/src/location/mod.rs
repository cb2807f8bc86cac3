//! Device geolocation.
//!
//! A [`LocationSource`] starts a long-lived position watch that pushes
//! [`LocationUpdate`]s into a channel. The returned [`LocationWatch`] is the
//! subscription handle: dropping it (or calling [`LocationWatch::clear`])
//! stops the watch.
//!
//! A terminal has no positioning hardware, so the sources here are a fixed
//! position taken from configuration and an explicit "unsupported" source
//! used when none is configured.

mod fixed;
mod watch;

pub use fixed::{FixedLocationSource, DEFAULT_REPORT_INTERVAL};
pub use watch::LocationWatch;

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::warn;

use crate::coord::LatLng;

/// Errors starting a position watch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// One message from a position watch.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    Position(LatLng),
    Error(String),
}

/// A provider of device positions.
pub trait LocationSource: Send + Sync {
    /// Start watching. Updates are sent to `tx` until the watch is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    fn watch(&self, tx: mpsc::Sender<LocationUpdate>) -> Result<LocationWatch, GeolocationError>;
}

/// A source for devices without positioning.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedLocationSource;

impl LocationSource for UnsupportedLocationSource {
    fn watch(&self, _tx: mpsc::Sender<LocationUpdate>) -> Result<LocationWatch, GeolocationError> {
        warn!("Geolocation is not supported, keeping the default camera position");
        Err(GeolocationError::Unsupported)
    }
}

/// Build the source for an optional configured position.
pub fn source_for(position: Option<LatLng>, interval: Duration) -> Box<dyn LocationSource> {
    match position {
        Some(position) => Box::new(FixedLocationSource::with_interval(position, interval)),
        None => Box::new(UnsupportedLocationSource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_source_errors() {
        let (tx, _rx) = mpsc::channel(1);
        let result = UnsupportedLocationSource.watch(tx);
        assert_eq!(result.err(), Some(GeolocationError::Unsupported));
    }

    #[tokio::test]
    async fn test_source_for_configured_position() {
        let (tx, mut rx) = mpsc::channel(4);
        let position = LatLng::new_unchecked(51.5, -0.12);

        let _watch = source_for(Some(position), DEFAULT_REPORT_INTERVAL).watch(tx).unwrap();

        assert_eq!(rx.recv().await, Some(LocationUpdate::Position(position)));
    }

    #[tokio::test]
    async fn test_source_for_nothing_is_unsupported() {
        let (tx, _rx) = mpsc::channel(1);
        assert!(source_for(None, DEFAULT_REPORT_INTERVAL).watch(tx).is_err());
    }
}
