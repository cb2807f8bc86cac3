//! Coordinate module
//!
//! Provides the [`LatLng`] vertex type and conversions between geographic
//! coordinates and Web Mercator world pixels, used by map surfaces to turn
//! pointer positions into coordinates and back.

mod types;

pub use types::{
    CoordError, LatLng, MAX_LAT, MAX_LNG, MAX_ZOOM, MERCATOR_MAX_LAT, MIN_LAT, MIN_LNG, MIN_ZOOM,
    TILE_SIZE,
};

use std::f64::consts::PI;

/// Returns the width (and height) of the Web Mercator world in pixels at `zoom`.
///
/// Fractional zoom levels are allowed.
#[inline]
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2.0_f64.powf(zoom)
}

/// Projects a coordinate to Web Mercator world pixels at the given zoom.
///
/// Latitude is clamped to the Mercator range first. The origin is the
/// north-west corner of the world; `y` grows southwards.
///
/// # Errors
///
/// Returns [`CoordError::InvalidZoom`] when `zoom` is outside 0..=22.
#[inline]
pub fn project(coord: LatLng, zoom: f64) -> Result<(f64, f64), CoordError> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let size = world_size(zoom);
    let lat = coord.lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT);

    let x = (coord.lng + 180.0) / 360.0 * size;

    let lat_rad = lat * PI / 180.0;
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * size;

    Ok((x, y))
}

/// Converts Web Mercator world pixels back to a coordinate.
///
/// `x` wraps around the antimeridian; `y` is clamped to the world.
pub fn unproject(x: f64, y: f64, zoom: f64) -> Result<LatLng, CoordError> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let size = world_size(zoom);
    let x = x.rem_euclid(size);
    let y = y.clamp(0.0, size);

    let lng = x / size * 360.0 - 180.0;

    let n = PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan() * 180.0 / PI;

    Ok(LatLng::new_unchecked(lat, lng))
}

#[cfg(test)]
mod tests;
