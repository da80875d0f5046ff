//! Great-circle distance and radius bounding boxes
//!
//! Pure functions over decimal-degree coordinates. The bounding box is the
//! cheap pre-filter (1° of latitude ~= 111.04 km, 1° of longitude ~=
//! cos(latitude) * 111.04 km); haversine gives the exact spherical distance.

use log::{debug, warn};

use crate::coordinate::{BoundingBox, Coordinate};
use crate::geo::errors::{GeoError, GeoResult};
use crate::geo::source::MissingCoordinatePolicy;

/// Mean earth radius in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Kilometers per degree of latitude used by the rough bounding box
pub const KM_PER_DEGREE_LATITUDE: f64 = 111.04;

/// Below this |cos(latitude)| the longitude span is treated as unbounded
pub const DEGENERATE_COSINE_EPSILON: f64 = 1e-12;

/// Unit of the latitude handed to `cos()` when widening the longitude range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CosineLatitude {
    /// Convert the latitude to radians first (geometrically correct)
    #[default]
    Radians,
    /// Feed the degree value straight into `cos()`, as older deployments did.
    /// Produces boxes that are too narrow or inverted away from the equator.
    LegacyDegrees,
}

impl CosineLatitude {
    /// Parse a mode name ("radians" or "degrees")
    pub fn from_name(name: &str) -> GeoResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "radians" | "radian" | "rad" => Ok(CosineLatitude::Radians),
            "degrees" | "degree" | "deg" | "legacy" => Ok(CosineLatitude::LegacyDegrees),
            other => Err(GeoError::ConfigError(format!(
                "Unknown latitude mode '{}' (expected 'radians' or 'degrees')", other))),
        }
    }

    /// Canonical name of this mode
    pub fn name(&self) -> &'static str {
        match self {
            CosineLatitude::Radians => "radians",
            CosineLatitude::LegacyDegrees => "degrees",
        }
    }

    fn cos(&self, latitude_degrees: f64) -> f64 {
        match self {
            CosineLatitude::Radians => latitude_degrees.to_radians().cos(),
            CosineLatitude::LegacyDegrees => latitude_degrees.cos(),
        }
    }
}

/// Knobs for [`rough_bounding_box_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBoxOptions {
    /// Unit fed to `cos()` for the longitude delta
    pub latitude_mode: CosineLatitude,
    /// What to do with a non-numeric center component
    pub on_missing: MissingCoordinatePolicy,
}

/// Haversine distance in meters using the mean earth radius
///
/// # Arguments
/// * `lat_from` - Latitude of start point in decimal degrees
/// * `lon_from` - Longitude of start point in decimal degrees
/// * `lat_to` - Latitude of target point in decimal degrees
/// * `lon_to` - Longitude of target point in decimal degrees
pub fn haversine_distance(lat_from: f64, lon_from: f64, lat_to: f64, lon_to: f64) -> f64 {
    haversine_distance_with_radius(lat_from, lon_from, lat_to, lon_to, EARTH_RADIUS_METERS)
}

/// Haversine distance in the unit of `earth_radius`
///
/// The haversine term is clamped to [0, 1] so rounding on near-antipodal
/// points cannot push `asin` out of its domain.
pub fn haversine_distance_with_radius(lat_from: f64, lon_from: f64,
                                      lat_to: f64, lon_to: f64,
                                      earth_radius: f64) -> f64 {
    let lat_from = lat_from.to_radians();
    let lon_from = lon_from.to_radians();
    let lat_to = lat_to.to_radians();
    let lon_to = lon_to.to_radians();

    let lat_delta = lat_to - lat_from;
    let lon_delta = lon_to - lon_from;

    let h = ((lat_delta / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (lon_delta / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);

    let angle = 2.0 * h.sqrt().asin();
    angle * earth_radius
}

/// Distance in meters between two validated coordinates
///
/// Fails with `InvalidCoordinate` if either side is non-numeric or out of range.
pub fn distance_between_users(a: &Coordinate, b: &Coordinate) -> GeoResult<f64> {
    distance_between_users_with_radius(a, b, EARTH_RADIUS_METERS)
}

/// [`distance_between_users`] on a sphere of the given radius
pub fn distance_between_users_with_radius(a: &Coordinate, b: &Coordinate, earth_radius: f64) -> GeoResult<f64> {
    check_radius(earth_radius)?;
    a.validate()?;
    b.validate()?;

    let distance = haversine_distance_with_radius(
        a.latitude, a.longitude, b.latitude, b.longitude, earth_radius);
    debug!("Distance {} -> {}: {:.3}", a, b, distance);
    Ok(distance)
}

/// Rough bounding box around `center` using the default options
/// (radians, zero substitution for non-numeric components)
pub fn rough_bounding_box(center: &Coordinate, radius_meters: f64) -> GeoResult<BoundingBox> {
    rough_bounding_box_with(center, radius_meters, &BoundingBoxOptions::default())
}

/// Rough bounding box around `center` for a radius in meters
///
/// # Errors
/// * `InvalidRadius` - radius is negative or not finite
/// * `InvalidCoordinate` - center is out of range, or non-numeric under `Fail`
/// * `DegenerateGeometry` - cos(latitude) is zero, so the longitude span is unbounded
pub fn rough_bounding_box_with(center: &Coordinate, radius_meters: f64,
                               options: &BoundingBoxOptions) -> GeoResult<BoundingBox> {
    check_radius(radius_meters)?;

    let center = options.on_missing.apply(center)?;
    center.validate()?;

    let cos_lat = options.latitude_mode.cos(center.latitude);
    if cos_lat.abs() < DEGENERATE_COSINE_EPSILON {
        return Err(GeoError::DegenerateGeometry(format!(
            "longitude span is unbounded at latitude {} (cos = {:e})", center.latitude, cos_lat)));
    }

    let radius_km = radius_meters / 1000.0;
    let delta_lat = radius_km / KM_PER_DEGREE_LATITUDE;
    let delta_long = radius_km / (cos_lat * KM_PER_DEGREE_LATITUDE);

    if options.latitude_mode == CosineLatitude::LegacyDegrees && delta_long < 0.0 {
        warn!("Legacy degree mode produced an inverted longitude range at latitude {}",
              center.latitude);
    }

    let bbox = BoundingBox::new(
        center.latitude - delta_lat,
        center.longitude - delta_long,
        center.latitude + delta_lat,
        center.longitude + delta_long,
    ).with_radius(radius_meters);

    debug!("Bounding box around {} for {} m ({}): {}",
           center, radius_meters, options.latitude_mode.name(), bbox);
    Ok(bbox)
}

pub(crate) fn check_radius(radius: f64) -> GeoResult<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(GeoError::InvalidRadius(radius));
    }
    Ok(())
}
