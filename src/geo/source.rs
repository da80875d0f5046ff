//! Coordinate lookup for users
//!
//! The geometry never reaches for an ambient "current user". Callers pass a
//! [`CoordinateSource`] and the handles they care about, and decide through
//! [`MissingCoordinatePolicy`] what an unavailable coordinate means.

use std::fmt;

use log::{debug, warn};

use crate::coordinate::{BoundingBox, Coordinate};
use crate::geo::errors::{GeoError, GeoResult};
use crate::geo::math::{self, BoundingBoxOptions};

/// Opaque identifier of a user in some profile store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserHandle(String);

impl UserHandle {
    /// Create a handle from any string-like id
    pub fn new(id: impl Into<String>) -> Self {
        UserHandle(id.into())
    }

    /// The raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserHandle {
    fn from(id: &str) -> Self {
        UserHandle::new(id)
    }
}

impl From<String> for UserHandle {
    fn from(id: String) -> Self {
        UserHandle(id)
    }
}

impl fmt::Display for UserHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fallback applied when a coordinate is missing or non-numeric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingCoordinatePolicy {
    /// Substitute 0.0 for the missing value and log a warning
    #[default]
    ZeroDefault,
    /// Report the problem to the caller
    Fail,
}

impl MissingCoordinatePolicy {
    /// Parse a policy name ("zero" or "fail")
    pub fn from_name(name: &str) -> GeoResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "zero" | "zero-default" | "zero_default" => Ok(MissingCoordinatePolicy::ZeroDefault),
            "fail" | "error" => Ok(MissingCoordinatePolicy::Fail),
            other => Err(GeoError::ConfigError(format!(
                "Unknown missing-coordinate policy '{}' (expected 'zero' or 'fail')", other))),
        }
    }

    /// Canonical name of this policy
    pub fn name(&self) -> &'static str {
        match self {
            MissingCoordinatePolicy::ZeroDefault => "zero",
            MissingCoordinatePolicy::Fail => "fail",
        }
    }

    /// Apply the policy to each non-finite component of `coord`
    pub fn apply(&self, coord: &Coordinate) -> GeoResult<Coordinate> {
        if coord.is_finite() {
            return Ok(*coord);
        }

        match self {
            MissingCoordinatePolicy::Fail => Err(GeoError::InvalidCoordinate(format!(
                "non-numeric component in ({}, {})", coord.latitude, coord.longitude))),
            MissingCoordinatePolicy::ZeroDefault => {
                let fixed = Coordinate::new(
                    finite_or_zero(coord.latitude),
                    finite_or_zero(coord.longitude),
                );
                warn!("Substituting 0.0 for non-numeric coordinate component: {} -> {}",
                      coord, fixed);
                Ok(fixed)
            }
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Anything that can resolve a user to a coordinate
///
/// Implementations return `GeoError::LookupFailure` when the user is unknown
/// or their profile lacks position fields.
pub trait CoordinateSource {
    /// Look up the stored coordinate of `user`
    fn coordinate_of(&self, user: &UserHandle) -> GeoResult<Coordinate>;
}

impl<F> CoordinateSource for F
where
    F: Fn(&UserHandle) -> GeoResult<Coordinate>,
{
    fn coordinate_of(&self, user: &UserHandle) -> GeoResult<Coordinate> {
        self(user)
    }
}

/// Look up `user`, applying `policy` when no coordinate is available
///
/// Errors other than `LookupFailure` always propagate.
pub fn resolve_coordinate<S>(source: &S, user: &UserHandle,
                             policy: MissingCoordinatePolicy) -> GeoResult<Coordinate>
where
    S: CoordinateSource + ?Sized,
{
    match source.coordinate_of(user) {
        Ok(coord) => Ok(coord),
        Err(e) if e.is_lookup_failure() && policy == MissingCoordinatePolicy::ZeroDefault => {
            warn!("{}; using {} for user {}", e, Coordinate::ORIGIN, user);
            Ok(Coordinate::ORIGIN)
        }
        Err(e) => Err(e),
    }
}

/// Distance in meters between two users of `source`
///
/// Lookup failures are never defaulted here.
pub fn distance_between_user_handles<S>(source: &S, from: &UserHandle, to: &UserHandle,
                                        earth_radius: f64) -> GeoResult<f64>
where
    S: CoordinateSource + ?Sized,
{
    let a = source.coordinate_of(from)?;
    let b = source.coordinate_of(to)?;
    debug!("Resolved {} at {} and {} at {}", from, a, to, b);
    math::distance_between_users_with_radius(&a, &b, earth_radius)
}

/// Rough bounding box of `radius_meters` around a user's stored position
pub fn bounding_box_around_user<S>(source: &S, user: &UserHandle, radius_meters: f64,
                                   options: &BoundingBoxOptions) -> GeoResult<BoundingBox>
where
    S: CoordinateSource + ?Sized,
{
    let center = resolve_coordinate(source, user, options.on_missing)?;
    math::rough_bounding_box_with(&center, radius_meters, options)
}
