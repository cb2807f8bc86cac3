//! Derived polygon geometry.
//!
//! The polygon is never stored on its own: it is recomputed from the full,
//! ordered vertex list every time the list changes. Area is the spherical
//! area of the closed ring on a sphere of radius 6 378 137 m, the same model
//! the map service uses, rounded to whole square metres.
//!
//! No winding or self-intersection handling is performed. A self-intersecting
//! ring yields whatever the spherical-excess sum produces, and coincident
//! vertices may collapse the area towards zero.

mod format;

pub use format::format_area;

use geo::{ChamberlainDuquetteArea, Coord, LineString};

use crate::coord::LatLng;

/// Minimum number of vertices for a polygon to exist.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A polygon derived from the current point list.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Ordered ring vertices (not explicitly closed).
    pub vertices: Vec<LatLng>,
    /// Spherical area in square metres, rounded.
    pub area_m2: f64,
}

impl Polygon {
    /// Number of vertices in the ring.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Derives the polygon for a vertex list.
///
/// Returns `None` when fewer than [`MIN_POLYGON_VERTICES`] points exist.
pub fn derive_polygon(points: &[LatLng]) -> Option<Polygon> {
    if points.len() < MIN_POLYGON_VERTICES {
        return None;
    }

    Some(Polygon {
        vertices: points.to_vec(),
        area_m2: polygon_area(points),
    })
}

/// Computes the rounded spherical area of the ring in square metres.
///
/// Returns `0.0` for fewer than three points.
pub fn polygon_area(points: &[LatLng]) -> f64 {
    if points.len() < MIN_POLYGON_VERTICES {
        return 0.0;
    }

    // Convert to geo::Coord (x = lng, y = lat); geo closes the ring itself
    let coords: Vec<Coord<f64>> = points
        .iter()
        .map(|p| Coord { x: p.lng, y: p.lat })
        .collect();
    let ring = geo::Polygon::new(LineString::from(coords), vec![]);

    let area = ring.chamberlain_duquette_unsigned_area();
    if area.is_finite() {
        area.round()
    } else {
        0.0
    }
}


/// Properties that hold for every vertex list, not just the hand-picked rings.
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn latlng() -> impl Strategy<Value = LatLng> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| LatLng::new_unchecked(lat, lng))
    }

    proptest! {
        /// Fewer than three points never form a polygon and have no area.
        #[test]
        fn short_lists_have_no_polygon(
            points in prop::collection::vec(latlng(), 0..MIN_POLYGON_VERTICES),
        ) {
            prop_assert!(derive_polygon(&points).is_none());
            prop_assert_eq!(polygon_area(&points), 0.0);
        }

        /// Any ring of three or more points has a finite, non-negative, repeatable area.
        #[test]
        fn ring_area_is_finite_and_repeatable(
            points in prop::collection::vec(latlng(), MIN_POLYGON_VERTICES..12),
        ) {
            let area = polygon_area(&points);
            prop_assert!(area.is_finite());
            prop_assert!(area >= 0.0);
            prop_assert_eq!(area, polygon_area(&points));

            let polygon = derive_polygon(&points);
            prop_assert!(polygon.is_some());
            if let Some(polygon) = polygon {
                prop_assert_eq!(polygon.vertex_count(), points.len());
                prop_assert_eq!(polygon.area_m2, area);
            }
        }
    }
}
