//! Marker reconciliation.
//!
//! Markers are the interactive, on-map representation of placed points. They
//! are kept in one-to-one correspondence with the store's points by diffing on
//! [`PointId`](crate::store::PointId) rather than being rebuilt on every edit,
//! so transient state such as a hover highlight survives unrelated changes.
//!
//! # Lifecycle
//!
//! ```text
//! Created ──▶ Normal ⟷ Hovered
//!                │         │
//!                └──▶ Dragging ──▶ Settled ──▶ Normal
//! ```
//!
//! A marker is destroyed by removing it from the [`MarkerSet`] when its point
//! disappears from the store.
//!
//! Dragging is two-phase: [`MarkerSet::drag_to`] only moves the marker (and
//! with it the live preview ring), while [`MarkerSet::end_drag`] hands back the
//! settled coordinate for the caller to commit to the store.

mod set;
mod style;

pub use set::{Marker, MarkerError, MarkerSet, MarkerState, ReconcileReport};
pub use style::{
    MarkerStyle, PolygonStyle, Rgb, FILL_COLOR, FILL_OPACITY, HOVER_COLOR, HOVER_SCALE,
    LINE_COLOR, POINT_COLOR, POINT_SCALE, STROKE_COLOR,
};
