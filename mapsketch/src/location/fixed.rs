//! Position source backed by a configured coordinate.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{GeolocationError, LocationSource, LocationUpdate, LocationWatch};
use crate::coord::LatLng;

/// How often the fixed position is re-reported.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(30);

/// Reports the same position immediately and then on every interval tick,
/// the way a position watch keeps reporting a stationary device.
#[derive(Debug, Clone)]
pub struct FixedLocationSource {
    position: LatLng,
    interval: Duration,
}

impl FixedLocationSource {
    pub fn new(position: LatLng) -> Self {
        Self::with_interval(position, DEFAULT_REPORT_INTERVAL)
    }

    pub fn with_interval(position: LatLng, interval: Duration) -> Self {
        Self { position, interval }
    }
}

impl LocationSource for FixedLocationSource {
    fn watch(&self, tx: mpsc::Sender<LocationUpdate>) -> Result<LocationWatch, GeolocationError> {
        if self.interval.is_zero() {
            return Err(GeolocationError::Unavailable(
                "report interval must be positive".to_string(),
            ));
        }
        if tx.is_closed() {
            return Err(GeolocationError::Unavailable(
                "nobody is listening for positions".to_string(),
            ));
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let position = self.position;
        let period = self.interval;

        let handle = tokio::spawn(async move {
            info!(lat = position.lat, lng = position.lng, "Location watch started");
            let mut interval = tokio::time::interval(period);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(LocationUpdate::Position(position)).await.is_err() {
                            debug!("Location channel closed, stopping watch");
                            break;
                        }
                    }
                }
            }

            debug!("Location watch stopped");
        });

        Ok(LocationWatch::new(cancel, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> LatLng {
        LatLng::new_unchecked(-33.86, 151.2)
    }

    #[tokio::test(start_paused = true)]
    async fn test_reports_on_interval() {
        let (tx, mut rx) = mpsc::channel(8);
        let source = FixedLocationSource::with_interval(position(), Duration::from_secs(1));

        let _watch = source.watch(tx).unwrap();

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(LocationUpdate::Position(position())));
        }
    }

    #[tokio::test]
    async fn test_clear_stops_watch() {
        let (tx, mut rx) = mpsc::channel(8);
        let source = FixedLocationSource::with_interval(position(), Duration::from_millis(10));

        let watch = source.watch(tx).unwrap();
        assert!(rx.recv().await.is_some());

        watch.clear().await;

        // Sender dropped with the task; drain then observe close
        while rx.recv().await.is_some() {}
    }

    #[tokio::test]
    async fn test_drop_cancels_watch() {
        let (tx, mut rx) = mpsc::channel(8);
        let source = FixedLocationSource::with_interval(position(), Duration::from_millis(10));

        let watch = source.watch(tx).unwrap();
        drop(watch);

        let drained = tokio::time::timeout(Duration::from_secs(5), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }

    #[tokio::test]
    async fn test_zero_interval_is_unavailable() {
        let (tx, _rx) = mpsc::channel(1);
        let source = FixedLocationSource::with_interval(position(), Duration::ZERO);

        assert!(matches!(
            source.watch(tx),
            Err(GeolocationError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_closed_channel_is_unavailable() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let result = FixedLocationSource::new(position()).watch(tx);

        assert!(matches!(result, Err(GeolocationError::Unavailable(_))));
    }
}
