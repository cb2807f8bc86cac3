//! `mapsketch area`: polygon area without the interactive map.

use mapsketch::coord::LatLng;
use mapsketch::geometry::{self, format_area, MIN_POLYGON_VERTICES};

use crate::error::CliError;

/// Print the ring and its spherical area.
pub fn run(points: &[LatLng]) -> Result<(), CliError> {
    for (index, point) in points.iter().enumerate() {
        println!("Point {}: {}", index + 1, point);
    }

    match geometry::derive_polygon(points) {
        Some(polygon) => {
            println!("Vertices: {}", polygon.vertex_count());
            println!("Area: {}", format_area(polygon.area_m2));
        }
        None => {
            println!(
                "No polygon: at least {} points are needed ({} given)",
                MIN_POLYGON_VERTICES,
                points.len()
            );
            println!("Area: {}", format_area(0.0));
        }
    }

    Ok(())
}
