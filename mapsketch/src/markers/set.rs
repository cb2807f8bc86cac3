//! The marker set and its reconciliation against store snapshots.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, trace};

use super::style::MarkerStyle;
use crate::coord::{self, LatLng};
use crate::store::{Action, PointId, SnapshotPoint};

/// Interaction state of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    /// Just created; the drop animation (if any) has not played yet.
    Created,
    /// At rest.
    Normal,
    /// Pointer is over the marker.
    Hovered,
    /// Being dragged; position is live and not yet committed.
    Dragging,
    /// Drag released; waiting for the committed coordinate to come back.
    Settled,
}

impl MarkerState {
    /// Returns true if the marker is drawn highlighted.
    pub fn is_highlighted(&self) -> bool {
        matches!(self, MarkerState::Hovered | MarkerState::Dragging)
    }
}

/// One visual marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: PointId,
    pub position: LatLng,
    pub state: MarkerState,
    /// Play the drop animation on first render.
    pub animate_drop: bool,
}

impl Marker {
    fn new(id: PointId, position: LatLng, animate_drop: bool) -> Self {
        Self {
            id,
            position,
            state: MarkerState::Created,
            animate_drop,
        }
    }

    /// Style for the current state.
    pub fn style(&self) -> MarkerStyle {
        if self.state.is_highlighted() {
            MarkerStyle::HOVERED
        } else {
            MarkerStyle::NORMAL
        }
    }
}

/// Errors from marker interactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("No marker for point {0}")]
    UnknownMarker(PointId),

    #[error("Marker {0} is not being dragged")]
    NotDragging(PointId),

    #[error("Marker {0} is already being dragged")]
    AlreadyDragging(PointId),
}

/// What a reconcile pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<PointId>,
    pub moved: Vec<PointId>,
    pub removed: Vec<PointId>,
}

impl ReconcileReport {
    /// Returns true if nothing changed.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.moved.is_empty() && self.removed.is_empty()
    }
}

/// Markers in ring order, keyed by point id.
#[derive(Debug, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the set in line with the store's points.
    ///
    /// Markers for new ids are created, positions of existing ones updated and
    /// markers whose ids vanished are dropped. Only the marker created for an
    /// [`Action::Appended`] point animates; a marker being dragged keeps its
    /// live position.
    pub fn reconcile(&mut self, points: &[SnapshotPoint], action: Option<Action>) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let appended = match action {
            Some(Action::Appended { id, .. }) => Some(id),
            _ => None,
        };

        let keep: HashSet<PointId> = points.iter().map(|p| p.id).collect();
        self.markers.retain(|marker| {
            let keep = keep.contains(&marker.id);
            if !keep {
                report.removed.push(marker.id);
            }
            keep
        });

        let mut previous = std::mem::take(&mut self.markers);
        for point in points {
            let marker = match previous.iter().position(|m| m.id == point.id) {
                Some(pos) => {
                    let mut marker = previous.swap_remove(pos);
                    if marker.state != MarkerState::Dragging && marker.position != point.coord {
                        marker.position = point.coord;
                        report.moved.push(marker.id);
                    }
                    if marker.state == MarkerState::Settled {
                        marker.state = MarkerState::Normal;
                    }
                    marker
                }
                None => {
                    report.created.push(point.id);
                    Marker::new(point.id, point.coord, appended == Some(point.id))
                }
            };
            self.markers.push(marker);
        }

        if !report.is_noop() {
            debug!(
                created = report.created.len(),
                moved = report.moved.len(),
                removed = report.removed.len(),
                "Markers reconciled"
            );
        }
        report
    }

    /// Marks drop animations as played, moving new markers to `Normal`.
    pub fn finish_animations(&mut self) {
        for marker in &mut self.markers {
            if marker.state == MarkerState::Created {
                marker.state = MarkerState::Normal;
            }
            marker.animate_drop = false;
        }
    }

    /// Highlights a marker. Ignored while it is being dragged.
    pub fn hover(&mut self, id: PointId) -> Result<(), MarkerError> {
        let marker = self.get_mut(id)?;
        if marker.state != MarkerState::Dragging {
            marker.state = MarkerState::Hovered;
        }
        Ok(())
    }

    /// Removes a hover highlight.
    pub fn unhover(&mut self, id: PointId) -> Result<(), MarkerError> {
        let marker = self.get_mut(id)?;
        if marker.state == MarkerState::Hovered {
            marker.state = MarkerState::Normal;
        }
        Ok(())
    }

    /// Starts dragging a marker.
    pub fn begin_drag(&mut self, id: PointId) -> Result<(), MarkerError> {
        let marker = self.get_mut(id)?;
        if marker.state == MarkerState::Dragging {
            return Err(MarkerError::AlreadyDragging(id));
        }
        marker.state = MarkerState::Dragging;
        trace!(%id, "Drag started");
        Ok(())
    }

    /// Moves a dragged marker. Only the marker changes, not the store.
    pub fn drag_to(&mut self, id: PointId, position: LatLng) -> Result<(), MarkerError> {
        let marker = self.get_mut(id)?;
        if marker.state != MarkerState::Dragging {
            return Err(MarkerError::NotDragging(id));
        }
        marker.position = position;
        Ok(())
    }

    /// Releases a dragged marker and returns its index and coordinate to commit.
    pub fn end_drag(&mut self, id: PointId) -> Result<(usize, LatLng), MarkerError> {
        let index = self.index_of(id).ok_or(MarkerError::UnknownMarker(id))?;
        let marker = &mut self.markers[index];
        if marker.state != MarkerState::Dragging {
            return Err(MarkerError::NotDragging(id));
        }
        marker.state = MarkerState::Settled;
        trace!(%id, index, "Drag settled");
        Ok((index, marker.position))
    }

    /// The marker currently being dragged, if any.
    pub fn dragging(&self) -> Option<PointId> {
        self.markers
            .iter()
            .find(|m| m.state == MarkerState::Dragging)
            .map(|m| m.id)
    }

    /// Nearest marker within `tolerance_px` world pixels of `point` at `zoom`.
    ///
    /// On equal distance the later marker (drawn on top) wins.
    pub fn marker_at(&self, point: LatLng, zoom: f64, tolerance_px: f64) -> Option<PointId> {
        let (px, py) = coord::project(point, zoom).ok()?;
        let mut best: Option<(f64, PointId)> = None;

        for marker in &self.markers {
            let Ok((mx, my)) = coord::project(marker.position, zoom) else {
                continue;
            };
            let distance = (mx - px).hypot(my - py);
            if distance > tolerance_px {
                continue;
            }
            if best.map_or(true, |(d, _)| distance <= d) {
                best = Some((distance, marker.id));
            }
        }

        best.map(|(_, id)| id)
    }

    /// Current marker positions in ring order, including live drag positions.
    pub fn positions(&self) -> Vec<LatLng> {
        self.markers.iter().map(|m| m.position).collect()
    }

    pub fn get(&self, id: PointId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn index_of(&self, id: PointId) -> Option<usize> {
        self.markers.iter().position(|m| m.id == id)
    }

    fn get_mut(&mut self, id: PointId) -> Result<&mut Marker, MarkerError> {
        self.markers
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(MarkerError::UnknownMarker(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocationStatus;

    fn point(id: u64, lat: f64, lng: f64) -> SnapshotPoint {
        SnapshotPoint {
            id: PointId(id),
            coord: LatLng::new_unchecked(lat, lng),
            location: LocationStatus::Pending,
        }
    }

    fn appended(id: u64, index: usize) -> Option<Action> {
        Some(Action::Appended {
            id: PointId(id),
            index,
        })
    }

    #[test]
    fn test_only_appended_marker_animates() {
        let mut set = MarkerSet::new();
        set.reconcile(&[point(1, 0.0, 0.0)], appended(1, 0));
        set.finish_animations();

        let report = set.reconcile(&[point(1, 0.0, 0.0), point(2, 0.0, 1.0)], appended(2, 1));

        assert_eq!(report.created, vec![PointId(2)]);
        assert!(!set.get(PointId(1)).unwrap().animate_drop);
        assert!(set.get(PointId(2)).unwrap().animate_drop);
        assert_eq!(set.get(PointId(2)).unwrap().state, MarkerState::Created);
    }

    #[test]
    fn test_reconcile_without_append_does_not_animate() {
        let mut set = MarkerSet::new();
        set.reconcile(&[point(1, 0.0, 0.0), point(2, 1.0, 1.0)], None);

        assert!(set.iter().all(|m| !m.animate_drop));
    }

    #[test]
    fn test_hover_survives_unrelated_edit() {
        let mut set = MarkerSet::new();
        set.reconcile(&[point(1, 0.0, 0.0)], appended(1, 0));
        set.hover(PointId(1)).unwrap();

        set.reconcile(&[point(1, 0.0, 0.0), point(2, 0.0, 1.0)], appended(2, 1));

        let marker = set.get(PointId(1)).unwrap();
        assert_eq!(marker.state, MarkerState::Hovered);
        assert_eq!(marker.style(), MarkerStyle::HOVERED);
    }

    #[test]
    fn test_reset_removes_all_markers() {
        let mut set = MarkerSet::new();
        set.reconcile(&[point(1, 0.0, 0.0), point(2, 0.0, 1.0)], None);

        let report = set.reconcile(&[], Some(Action::Reset));

        assert!(set.is_empty());
        assert_eq!(report.removed.len(), 2);
    }

    #[test]
    fn test_live_drag_does_not_snap_back_on_reconcile() {
        let mut set = MarkerSet::new();
        set.reconcile(&[point(1, 0.0, 0.0), point(2, 0.0, 1.0)], None);

        set.begin_drag(PointId(2)).unwrap();
        let live = LatLng::new_unchecked(0.5, 1.5);
        set.drag_to(PointId(2), live).unwrap();

        // A lookup result for point 1 republishes the old coordinates
        set.reconcile(&[point(1, 0.0, 0.0), point(2, 0.0, 1.0)], None);

        assert_eq!(set.get(PointId(2)).unwrap().position, live);
        assert_eq!(set.positions()[1], live);
    }

    #[test]
    fn test_drag_protocol() {
        let mut set = MarkerSet::new();
        set.reconcile(&[point(1, 0.0, 0.0), point(2, 0.0, 1.0)], None);
        let target = LatLng::new_unchecked(2.0, 2.0);

        assert_eq!(
            set.drag_to(PointId(2), target),
            Err(MarkerError::NotDragging(PointId(2)))
        );

        set.begin_drag(PointId(2)).unwrap();
        assert_eq!(set.dragging(), Some(PointId(2)));
        assert_eq!(
            set.begin_drag(PointId(2)),
            Err(MarkerError::AlreadyDragging(PointId(2)))
        );
        set.drag_to(PointId(2), target).unwrap();

        assert_eq!(set.end_drag(PointId(2)), Ok((1, target)));
        assert_eq!(set.get(PointId(2)).unwrap().state, MarkerState::Settled);
        assert_eq!(set.dragging(), None);

        // Committed coordinate comes back from the store
        set.reconcile(&[point(1, 0.0, 0.0), point(2, 2.0, 2.0)], None);
        assert_eq!(set.get(PointId(2)).unwrap().state, MarkerState::Normal);
    }

    #[test]
    fn test_unknown_marker() {
        let mut set = MarkerSet::new();
        assert_eq!(
            set.hover(PointId(9)),
            Err(MarkerError::UnknownMarker(PointId(9)))
        );
    }

    #[test]
    fn test_marker_at_picks_nearest_within_tolerance() {
        let mut set = MarkerSet::new();
        set.reconcile(&[point(1, 0.0, 0.0), point(2, 0.0, 1.0)], None);
        let zoom = 8.0;

        let near_second = LatLng::new_unchecked(0.0, 0.99);
        assert_eq!(set.marker_at(near_second, zoom, 10.0), Some(PointId(2)));

        let far = LatLng::new_unchecked(0.0, 0.5);
        assert_eq!(set.marker_at(far, zoom, 10.0), None);
    }

    #[test]
    fn test_finish_animations() {
        let mut set = MarkerSet::new();
        set.reconcile(&[point(1, 0.0, 0.0)], appended(1, 0));

        set.finish_animations();

        let marker = set.get(PointId(1)).unwrap();
        assert_eq!(marker.state, MarkerState::Normal);
        assert!(!marker.animate_drop);
    }
}
