//! Tests for the distance and bounding box math

use crate::coordinate::Coordinate;
use crate::geo::errors::GeoError;
use crate::geo::math::*;
use crate::geo::source::MissingCoordinatePolicy;

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn test_identical_points_have_zero_distance() {
    let points = [(0.0, 0.0), (40.7128, -74.0060), (-33.8688, 151.2093), (89.9, 179.9), (-90.0, -180.0)];
    for (lat, lon) in points {
        let d = haversine_distance(lat, lon, lat, lon);
        assert!(d.abs() < 1e-6, "distance of ({}, {}) to itself was {}", lat, lon, d);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let pairs = [
        ((0.0, 0.0), (10.0, 10.0)),
        ((40.7128, -74.0060), (51.5074, -0.1278)),
        ((-45.0, 170.0), (45.0, -170.0)),
        ((89.0, 0.0), (-89.0, 180.0)),
    ];
    for ((a_lat, a_lon), (b_lat, b_lon)) in pairs {
        let ab = haversine_distance(a_lat, a_lon, b_lat, b_lon);
        let ba = haversine_distance(b_lat, b_lon, a_lat, a_lon);
        assert!(approx(ab, ba, 1e-6), "{} != {}", ab, ba);
    }
}

#[test]
fn test_quarter_great_circle() {
    let d = haversine_distance(0.0, 0.0, 0.0, 90.0);
    assert!(approx(d, 10_007_543.0, 1.0), "got {}", d);
}

#[test]
fn test_new_york_to_london() {
    let d = haversine_distance(40.7128, -74.0060, 51.5074, -0.1278);
    assert!(approx(d, 5_570_000.0, 5_000.0), "got {}", d);
}

#[test]
fn test_antipodal_points_do_not_produce_nan() {
    let d = haversine_distance(0.0, 0.0, 0.0, 180.0);
    assert!(d.is_finite());
    assert!(approx(d, std::f64::consts::PI * EARTH_RADIUS_METERS, 1.0));

    let d = haversine_distance(90.0, 0.0, -90.0, 0.0);
    assert!(d.is_finite());
}

#[test]
fn test_custom_earth_radius_scales_result() {
    let meters = haversine_distance(0.0, 0.0, 0.0, 90.0);
    let km = haversine_distance_with_radius(0.0, 0.0, 0.0, 90.0, 6371.0);
    assert!(approx(meters / 1000.0, km, 1e-6));
}

#[test]
fn test_distance_between_users_rejects_invalid_coordinates() {
    let good = Coordinate::new(10.0, 10.0);
    let nan = Coordinate::new(f64::NAN, 10.0);
    let out_of_range = Coordinate::new(10.0, 200.0);

    assert!(matches!(distance_between_users(&good, &nan), Err(GeoError::InvalidCoordinate(_))));
    assert!(matches!(distance_between_users(&nan, &good), Err(GeoError::InvalidCoordinate(_))));
    assert!(matches!(distance_between_users(&good, &out_of_range), Err(GeoError::InvalidCoordinate(_))));
}

#[test]
fn test_distance_between_users_matches_haversine() {
    let ny = Coordinate::new(40.7128, -74.0060);
    let london = Coordinate::new(51.5074, -0.1278);
    let d = distance_between_users(&ny, &london).unwrap();
    assert_eq!(d, haversine_distance(40.7128, -74.0060, 51.5074, -0.1278));
}

#[test]
fn test_bbox_one_degree_of_latitude() {
    let bbox = rough_bounding_box(&Coordinate::new(0.0, 0.0), 111_040.0).unwrap();
    assert!(approx(bbox.max_lat, 1.0, 1e-3));
    assert!(approx(bbox.min_lat, -1.0, 1e-3));
    // cos(0) = 1, so longitude gets the same delta at the equator
    assert!(approx(bbox.max_long, 1.0, 1e-3));
    assert!(approx(bbox.min_long, -1.0, 1e-3));
    assert_eq!(bbox.radius_meters, Some(111_040.0));
}

#[test]
fn test_bbox_zero_radius_is_the_center() {
    let center = Coordinate::new(48.8566, 2.3522);
    let bbox = rough_bounding_box(&center, 0.0).unwrap();
    assert_eq!(bbox.min_lat, bbox.max_lat);
    assert_eq!(bbox.min_long, bbox.max_long);
    assert_eq!(bbox.center(), center);
}

#[test]
fn test_bbox_widens_longitude_with_latitude() {
    let bbox = rough_bounding_box(&Coordinate::new(60.0, 10.0), 111_040.0).unwrap();
    // cos(60°) = 0.5
    assert!(approx(bbox.lat_span(), 2.0, 1e-9));
    assert!(approx(bbox.long_span(), 4.0, 1e-9));
}

#[test]
fn test_bbox_negative_radius_is_rejected() {
    let result = rough_bounding_box(&Coordinate::new(0.0, 0.0), -1.0);
    assert!(matches!(result, Err(GeoError::InvalidRadius(r)) if r == -1.0));
    assert!(matches!(rough_bounding_box(&Coordinate::new(0.0, 0.0), f64::NAN),
                     Err(GeoError::InvalidRadius(_))));
}

#[test]
fn test_bbox_nan_center_uses_zero_by_default() {
    let bbox = rough_bounding_box(&Coordinate::new(f64::NAN, f64::NAN), 111_040.0).unwrap();
    let expected = rough_bounding_box(&Coordinate::new(0.0, 0.0), 111_040.0).unwrap();
    assert_eq!(bbox, expected);

    // only the bad component is replaced
    let bbox = rough_bounding_box(&Coordinate::new(f64::NAN, 5.0), 0.0).unwrap();
    assert_eq!(bbox.center(), Coordinate::new(0.0, 5.0));
}

#[test]
fn test_bbox_nan_center_fails_under_fail_policy() {
    let options = BoundingBoxOptions {
        on_missing: MissingCoordinatePolicy::Fail,
        ..BoundingBoxOptions::default()
    };
    let result = rough_bounding_box_with(&Coordinate::new(f64::NAN, 0.0), 1000.0, &options);
    assert!(matches!(result, Err(GeoError::InvalidCoordinate(_))));
}

#[test]
fn test_bbox_out_of_range_center_is_invalid_under_any_policy() {
    let result = rough_bounding_box(&Coordinate::new(95.0, 0.0), 1000.0);
    assert!(matches!(result, Err(GeoError::InvalidCoordinate(_))));
}

#[test]
fn test_bbox_at_pole_is_degenerate() {
    for lat in [90.0, -90.0] {
        let result = rough_bounding_box(&Coordinate::new(lat, 0.0), 1000.0);
        assert!(matches!(result, Err(GeoError::DegenerateGeometry(_))), "lat {} gave {:?}", lat, result);
    }
}

#[test]
fn test_bbox_legacy_degree_mode_reproduces_old_formula() {
    let options = BoundingBoxOptions {
        latitude_mode: CosineLatitude::LegacyDegrees,
        ..BoundingBoxOptions::default()
    };
    let lat: f64 = 45.0;
    let bbox = rough_bounding_box_with(&Coordinate::new(lat, 0.0), 10_000.0, &options).unwrap();
    let expected_delta_long = 10.0 / (lat.cos() * 111.04);
    assert!(approx(bbox.max_long, expected_delta_long, 1e-12));
    assert!(approx(bbox.min_long, -expected_delta_long, 1e-12));

    let corrected = rough_bounding_box(&Coordinate::new(lat, 0.0), 10_000.0).unwrap();
    assert!(!approx(bbox.max_long, corrected.max_long, 1e-6));
}

#[test]
fn test_latitude_mode_names() {
    assert_eq!(CosineLatitude::from_name("Radians").unwrap(), CosineLatitude::Radians);
    assert_eq!(CosineLatitude::from_name("degrees").unwrap(), CosineLatitude::LegacyDegrees);
    assert!(matches!(CosineLatitude::from_name("gradians"), Err(GeoError::ConfigError(_))));
}
