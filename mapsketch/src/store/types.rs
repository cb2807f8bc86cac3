//! Core types for the point store.

use std::fmt;

use crate::coord::LatLng;
use crate::geometry::Polygon;

/// Stable identifier of a placed point.
///
/// Ids are never reused within a store, including across resets, so results
/// addressed to a point that has since been removed cannot land on a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a store mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A point was appended at the end of the list.
    Appended { id: PointId, index: usize },
    /// The point at `index` received a settled coordinate.
    Moved { id: PointId, index: usize },
    /// The list was emptied.
    Reset,
}

impl Action {
    /// Returns the point affected by this action, if any.
    pub fn point(&self) -> Option<PointId> {
        match self {
            Action::Appended { id, .. } | Action::Moved { id, .. } => Some(*id),
            Action::Reset => None,
        }
    }
}

/// Reverse-geocoding state of a single point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationStatus {
    /// Lookup issued, no result yet.
    #[default]
    Pending,
    /// Formatted address returned by the geocoder.
    Resolved(String),
    /// The geocoder answered but had no address for the coordinate.
    NotFound,
    /// The lookup failed.
    Failed,
}

impl LocationStatus {
    /// Placeholder shown while a lookup is in flight.
    pub const PENDING_TEXT: &'static str = "Loading...";
    /// Text shown when the geocoder has no address.
    pub const NOT_FOUND_TEXT: &'static str = "Location not found";
    /// Text shown when the lookup failed.
    pub const FAILED_TEXT: &'static str = "Failed to get location";

    /// Returns true while no result has arrived.
    pub fn is_pending(&self) -> bool {
        matches!(self, LocationStatus::Pending)
    }

    /// Returns the display text for this status.
    pub fn display_text(&self) -> &str {
        match self {
            LocationStatus::Pending => Self::PENDING_TEXT,
            LocationStatus::Resolved(address) => address,
            LocationStatus::NotFound => Self::NOT_FOUND_TEXT,
            LocationStatus::Failed => Self::FAILED_TEXT,
        }
    }
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// Authorisation to write one lookup result back into the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookupTicket {
    /// Point the lookup is for.
    pub id: PointId,
    /// Index of the point when the lookup was issued (for logging only).
    pub index: usize,
    /// Generation the result must match to be accepted.
    pub generation: u64,
    /// Coordinate to look up.
    pub coord: LatLng,
}

/// One point as seen through a [`Snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotPoint {
    pub id: PointId,
    pub coord: LatLng,
    pub location: LocationStatus,
}

/// Read-only projection of the store at one revision.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    /// Monotonic revision, bumped on every change.
    pub revision: u64,
    /// Points in ring order.
    pub points: Vec<SnapshotPoint>,
    /// Derived polygon (present iff at least three points).
    pub polygon: Option<Polygon>,
    /// Polygon area in m² (`0.0` without a polygon).
    pub area_m2: f64,
    /// The most recent structural mutation.
    pub last_action: Option<Action>,
}

impl Snapshot {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no points are placed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coordinates in ring order.
    pub fn coords(&self) -> Vec<LatLng> {
        self.points.iter().map(|p| p.coord).collect()
    }

    /// Number of points whose address lookup has not completed.
    pub fn pending_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.location.is_pending())
            .count()
    }
}
