//! The owned annotation store.

use tracing::{debug, trace};

use super::error::StoreError;
use super::generation::GenerationTracker;
use super::types::{Action, LocationStatus, LookupTicket, PointId, Snapshot, SnapshotPoint};
use crate::coord::LatLng;
use crate::geometry::{self, Polygon};

/// A placed point with its address state.
#[derive(Debug, Clone)]
struct StoredPoint {
    id: PointId,
    coord: LatLng,
    location: LocationStatus,
}

/// Ordered point list plus derived geometry and per-point addresses.
///
/// Invariants held after every public call:
/// - one location entry per point (they live in the same record)
/// - `polygon.is_some()` iff `len() >= 3`
/// - `area() == 0.0` whenever there is no polygon
#[derive(Debug)]
pub struct AnnotationStore {
    points: Vec<StoredPoint>,
    polygon: Option<Polygon>,
    generations: GenerationTracker,
    next_id: u64,
    revision: u64,
    last_action: Option<Action>,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            polygon: None,
            generations: GenerationTracker::new(),
            next_id: 1,
            revision: 0,
            last_action: None,
        }
    }

    /// Append a point. Its address starts out pending.
    pub fn add_point(&mut self, coord: LatLng) -> Action {
        let id = PointId(self.next_id);
        self.next_id += 1;

        self.points.push(StoredPoint {
            id,
            coord,
            location: LocationStatus::Pending,
        });
        let index = self.points.len() - 1;

        let action = Action::Appended { id, index };
        self.commit(action);
        debug!(%id, index, lat = coord.lat, lng = coord.lng, "Point appended");
        action
    }

    /// Commit a settled coordinate for the point at `index`.
    ///
    /// The point's address goes back to pending until a new lookup lands.
    pub fn move_point(&mut self, index: usize, coord: LatLng) -> Result<Action, StoreError> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;

        point.coord = coord;
        point.location = LocationStatus::Pending;
        let id = point.id;
        // In-flight lookups describe the old coordinate
        self.generations.bump(id);

        let action = Action::Moved { id, index };
        self.commit(action);
        debug!(%id, index, lat = coord.lat, lng = coord.lng, "Point moved");
        Ok(action)
    }

    /// Remove every point and all derived state.
    pub fn reset(&mut self) -> Action {
        let removed = self.points.len();
        self.points.clear();
        self.generations.clear();

        let action = Action::Reset;
        self.commit(action);
        debug!(removed, "Point store reset");
        action
    }

    /// Issue a lookup ticket for point `id`, superseding earlier ones.
    pub fn begin_lookup(&mut self, id: PointId) -> Result<LookupTicket, StoreError> {
        let index = self.index_of(id).ok_or(StoreError::UnknownPoint(id))?;
        let generation = self.generations.bump(id);

        let point = &mut self.points[index];
        point.location = LocationStatus::Pending;

        Ok(LookupTicket {
            id,
            index,
            generation,
            coord: point.coord,
        })
    }

    /// Write a lookup result if it is still current.
    ///
    /// Returns false (and changes nothing) when the point was removed or a
    /// newer lookup has been issued for it since.
    pub fn set_location(&mut self, id: PointId, generation: u64, status: LocationStatus) -> bool {
        if !self.generations.is_current(id, generation) {
            trace!(%id, generation, "Discarding stale lookup result");
            return false;
        }

        let Some(index) = self.index_of(id) else {
            trace!(%id, "Discarding lookup result for removed point");
            return false;
        };

        self.points[index].location = status;
        self.revision += 1;
        true
    }

    /// Index of point `id`, if present.
    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    /// Id of the point at `index`, if present.
    pub fn id_at(&self, index: usize) -> Option<PointId> {
        self.points.get(index).map(|p| p.id)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no points are placed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coordinates in ring order.
    pub fn points(&self) -> Vec<LatLng> {
        self.points.iter().map(|p| p.coord).collect()
    }

    /// Address state per point, parallel to [`points`](Self::points).
    pub fn locations(&self) -> Vec<LocationStatus> {
        self.points.iter().map(|p| p.location.clone()).collect()
    }

    /// Derived polygon, if at least three points exist.
    pub fn polygon(&self) -> Option<&Polygon> {
        self.polygon.as_ref()
    }

    /// Polygon area in m², `0.0` without a polygon.
    pub fn area(&self) -> f64 {
        self.polygon.as_ref().map_or(0.0, |p| p.area_m2)
    }

    /// Most recent structural mutation.
    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Current revision number.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Take a read-only copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            points: self
                .points
                .iter()
                .map(|p| SnapshotPoint {
                    id: p.id,
                    coord: p.coord,
                    location: p.location.clone(),
                })
                .collect(),
            polygon: self.polygon.clone(),
            area_m2: self.area(),
            last_action: self.last_action,
        }
    }

    /// Record a structural change and recompute derived geometry.
    fn commit(&mut self, action: Action) {
        self.polygon = geometry::derive_polygon(&self.points());
        self.last_action = Some(action);
        self.revision += 1;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn latlng() -> impl Strategy<Value = LatLng> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| LatLng::new_unchecked(lat, lng))
    }

    proptest! {
        /// Every append grows the store by one pending point and keeps the
        /// location list in step with the point list.
        #[test]
        fn add_point_grows_by_one(points in prop::collection::vec(latlng(), 1..16)) {
            let mut store = AnnotationStore::new();

            for (i, coord) in points.iter().enumerate() {
                let before = store.len();
                let action = store.add_point(*coord);

                prop_assert_eq!(store.len(), before + 1);
                prop_assert_eq!(store.locations().len(), store.len());
                prop_assert!(store.locations()[i].is_pending());
                prop_assert!(matches!(action, Action::Appended { index, .. } if index == i), "expected Action::Appended at index {}", i);
            }
            prop_assert_eq!(store.points(), points);
        }
    }
}
