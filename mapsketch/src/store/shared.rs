//! Shared, read-only access to the annotation store.
//!
//! - [`AnnotationProvider`] - Query API (pull)
//! - [`AnnotationBroadcaster`] - Subscription API (push)
//! - [`SharedAnnotation`] - Thread-safe wrapper combining both, plus the
//!   mutation entry points used by the owning session

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use super::annotation::AnnotationStore;
use super::error::StoreError;
use super::types::{Action, LocationStatus, LookupTicket, PointId, Snapshot};
use crate::coord::LatLng;

/// Default capacity of the snapshot broadcast channel.
pub const DEFAULT_SNAPSHOT_CHANNEL_CAPACITY: usize = 32;

/// Trait for querying annotation state (pull API).
pub trait AnnotationProvider: Send + Sync {
    /// Get a read-only copy of the full state.
    fn snapshot(&self) -> Snapshot;

    /// Number of placed points.
    fn point_count(&self) -> usize;

    /// Polygon area in m² (`0.0` without a polygon).
    fn area(&self) -> f64;
}

/// Trait for subscribing to annotation changes (push API).
pub trait AnnotationBroadcaster: Send + Sync {
    /// Subscribe to snapshots published after every change.
    fn subscribe(&self) -> broadcast::Receiver<Snapshot>;
}

/// Shared annotation state.
///
/// Cloning is cheap; all clones see the same store. Every successful
/// mutation publishes a fresh [`Snapshot`] to subscribers. Sending never
/// fails the mutation: with no subscribers the snapshot is simply dropped.
#[derive(Clone)]
pub struct SharedAnnotation {
    inner: Arc<RwLock<AnnotationStore>>,
    snapshot_tx: broadcast::Sender<Snapshot>,
}

impl Default for SharedAnnotation {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedAnnotation {
    /// Create an empty shared store.
    pub fn new() -> Self {
        Self::with_store(AnnotationStore::new())
    }

    /// Wrap an existing store.
    pub fn with_store(store: AnnotationStore) -> Self {
        let (snapshot_tx, _) = broadcast::channel(DEFAULT_SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(store)),
            snapshot_tx,
        }
    }

    /// Append a point.
    pub fn add_point(&self, coord: LatLng) -> Action {
        self.mutate(|store| store.add_point(coord))
    }

    /// Commit a settled coordinate at `index`.
    pub fn move_point(&self, index: usize, coord: LatLng) -> Result<Action, StoreError> {
        self.try_mutate(|store| store.move_point(index, coord))
    }

    /// Clear all points.
    pub fn reset(&self) -> Action {
        self.mutate(AnnotationStore::reset)
    }

    /// Issue a lookup ticket for `id`.
    pub fn begin_lookup(&self, id: PointId) -> Result<LookupTicket, StoreError> {
        self.inner.write().begin_lookup(id)
    }

    /// Apply a lookup result; publishes only if it was accepted.
    pub fn set_location(&self, id: PointId, generation: u64, status: LocationStatus) -> bool {
        let snapshot = {
            let mut store = self.inner.write();
            if !store.set_location(id, generation, status) {
                return false;
            }
            store.snapshot()
        };
        self.publish(snapshot);
        true
    }

    /// Index of point `id`.
    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.inner.read().index_of(id)
    }

    /// Id of the point at `index`.
    pub fn id_at(&self, index: usize) -> Option<PointId> {
        self.inner.read().id_at(index)
    }

    /// Coordinates in ring order.
    pub fn points(&self) -> Vec<LatLng> {
        self.inner.read().points()
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut AnnotationStore) -> R) -> R {
        let (result, snapshot) = {
            let mut store = self.inner.write();
            let result = f(&mut *store);
            (result, store.snapshot())
        };
        self.publish(snapshot);
        result
    }

    fn try_mutate<R, E>(
        &self,
        f: impl FnOnce(&mut AnnotationStore) -> Result<R, E>,
    ) -> Result<R, E> {
        let (result, snapshot) = {
            let mut store = self.inner.write();
            let result = f(&mut *store)?;
            (result, store.snapshot())
        };
        self.publish(snapshot);
        Ok(result)
    }

    fn publish(&self, snapshot: Snapshot) {
        // No receivers is not an error
        let _ = self.snapshot_tx.send(snapshot);
    }
}

impl AnnotationProvider for SharedAnnotation {
    fn snapshot(&self) -> Snapshot {
        self.inner.read().snapshot()
    }

    fn point_count(&self) -> usize {
        self.inner.read().len()
    }

    fn area(&self) -> f64 {
        self.inner.read().area()
    }
}

impl AnnotationBroadcaster for SharedAnnotation {
    fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> LatLng {
        LatLng::new_unchecked(lat, lng)
    }

    #[test]
    fn test_shared_starts_empty() {
        let shared = SharedAnnotation::new();

        assert_eq!(shared.point_count(), 0);
        assert_eq!(shared.area(), 0.0);
        assert!(shared.snapshot().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let shared = SharedAnnotation::new();
        let reader = shared.clone();

        shared.add_point(p(1.0, 1.0));

        assert_eq!(reader.point_count(), 1);
    }

    #[test]
    fn test_subscribe_receives_snapshot_per_change() {
        let shared = SharedAnnotation::new();
        let mut rx = shared.subscribe();

        shared.add_point(p(0.0, 0.0));
        shared.add_point(p(0.0, 1.0));

        let first = rx.try_recv().expect("snapshot after first add");
        let second = rx.try_recv().expect("snapshot after second add");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert!(second.revision > first.revision);
    }

    #[test]
    fn test_failed_move_publishes_nothing() {
        let shared = SharedAnnotation::new();
        let mut rx = shared.subscribe();

        assert!(shared.move_point(3, p(0.0, 0.0)).is_err());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_rejected_lookup_publishes_nothing() {
        let shared = SharedAnnotation::new();
        shared.add_point(p(0.0, 0.0));
        let id = shared.id_at(0).unwrap();
        let mut rx = shared.subscribe();

        assert!(!shared.set_location(id, 99, LocationStatus::Failed));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_accepted_lookup_publishes_snapshot() {
        let shared = SharedAnnotation::new();
        shared.add_point(p(0.0, 0.0));
        let id = shared.id_at(0).unwrap();
        let ticket = shared.begin_lookup(id).unwrap();
        let mut rx = shared.subscribe();

        assert!(shared.set_location(id, ticket.generation, LocationStatus::NotFound));

        let snapshot = rx.try_recv().expect("snapshot after lookup");
        assert_eq!(snapshot.points[0].location, LocationStatus::NotFound);
    }
}
