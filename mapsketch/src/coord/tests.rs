//! Tests for coordinate conversion

use super::*;

#[test]
fn test_new_rejects_out_of_range_latitude() {
    assert!(matches!(
        LatLng::new(91.0, 0.0),
        Err(CoordError::InvalidLatitude(_))
    ));
    assert!(matches!(
        LatLng::new(f64::NAN, 0.0),
        Err(CoordError::InvalidLatitude(_))
    ));
}

#[test]
fn test_new_rejects_out_of_range_longitude() {
    assert!(matches!(
        LatLng::new(0.0, -180.5),
        Err(CoordError::InvalidLongitude(_))
    ));
}

#[test]
fn test_parse_lat_lng_pair() {
    let coord: LatLng = " 51.5074 , -0.1278 ".parse().unwrap();
    assert_eq!(coord, LatLng::new_unchecked(51.5074, -0.1278));
}

#[test]
fn test_parse_rejects_missing_comma() {
    let result = "51.5074".parse::<LatLng>();
    assert!(matches!(result, Err(CoordError::Malformed(_))));
}

#[test]
fn test_display_uses_six_decimals() {
    let coord = LatLng::new_unchecked(1.0, -2.5);
    assert_eq!(coord.to_string(), "1.000000, -2.500000");
}

#[test]
fn test_equator_prime_meridian_is_world_center() {
    let (x, y) = project(LatLng::new_unchecked(0.0, 0.0), 1.0).unwrap();
    assert!((x - 256.0).abs() < 1e-9);
    assert!((y - 256.0).abs() < 1e-9);
}

#[test]
fn test_project_rejects_invalid_zoom() {
    let result = project(LatLng::default(), 23.0);
    assert!(matches!(result, Err(CoordError::InvalidZoom(_))));
}

#[test]
fn test_roundtrip_projection() {
    let london = LatLng::new_unchecked(51.5074, -0.1278);

    for zoom in [0.0, 3.5, 10.0, 15.0, 20.0] {
        let (x, y) = project(london, zoom).unwrap();
        let back = unproject(x, y, zoom).unwrap();

        assert!(
            (back.lat - london.lat).abs() < 1e-9,
            "Zoom {}: lat {} did not roundtrip",
            zoom,
            back.lat
        );
        assert!(
            (back.lng - london.lng).abs() < 1e-9,
            "Zoom {}: lng {} did not roundtrip",
            zoom,
            back.lng
        );
    }
}

#[test]
fn test_projection_clamps_poles() {
    let (_, y) = project(LatLng::new_unchecked(90.0, 0.0), 2.0).unwrap();
    assert!(y.abs() < 1e-6, "North pole should clamp to top edge");
}

#[test]
fn test_unproject_wraps_longitude() {
    let size = world_size(2.0);
    let wrapped = unproject(size + size / 2.0, size / 2.0, 2.0).unwrap();
    assert!(wrapped.lng.abs() < 1e-9);
}
