//! Geographic proximity computations
//!
//! Errors, the pure distance/bounding-box math, and the lookup seam
//! that turns user handles into coordinates.

pub mod errors;
pub mod math;
pub mod source;

#[cfg(test)]
mod tests;

pub use errors::{GeoError, GeoResult};
pub use math::{
    BoundingBoxOptions, CosineLatitude, EARTH_RADIUS_METERS, KM_PER_DEGREE_LATITUDE,
    distance_between_users, haversine_distance, haversine_distance_with_radius,
    rough_bounding_box, rough_bounding_box_with,
};
pub use source::{
    CoordinateSource, MissingCoordinatePolicy, UserHandle, bounding_box_around_user,
    distance_between_user_handles, resolve_coordinate,
};
