use log::info;

use crate::config::GeoSettings;
use crate::coordinate::{BoundingBox, Coordinate};
use crate::geo::errors::GeoResult;
use crate::geo::math;
use crate::geo::source::{
    bounding_box_around_user, distance_between_user_handles, CoordinateSource, UserHandle,
};
use crate::profile::{NearbyUser, ProfileStore};

/// Main interface to the usergeo library
///
/// Bundles a set of [`GeoSettings`] with the distance and bounding box
/// operations so callers do not have to thread radius and policy values
/// through every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserGeo {
    settings: GeoSettings,
}

impl UserGeo {
    /// Create an instance with the bundled default settings
    pub fn new() -> Self {
        UserGeo { settings: GeoSettings::defaults() }
    }

    /// Create an instance with explicit settings
    pub fn with_settings(settings: GeoSettings) -> Self {
        UserGeo { settings }
    }

    /// Create an instance from a settings file
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a TOML settings file; defaults are used when absent
    pub fn from_config(config_path: Option<&str>) -> GeoResult<Self> {
        let settings = match config_path {
            Some(path) => {
                info!("Using settings from {}", path);
                GeoSettings::from_file(path)?
            },
            None => GeoSettings::defaults(),
        };
        Ok(UserGeo { settings })
    }

    /// Active settings
    pub fn settings(&self) -> &GeoSettings {
        &self.settings
    }

    /// Great-circle distance in meters between two coordinates
    pub fn distance(&self, from: &Coordinate, to: &Coordinate) -> GeoResult<f64> {
        math::distance_between_users_with_radius(from, to, self.settings.earth_radius_meters)
    }

    /// Rough bounding box of `radius_meters` around `center`
    pub fn bounding_box(&self, center: &Coordinate, radius_meters: f64) -> GeoResult<BoundingBox> {
        math::rough_bounding_box_with(center, radius_meters, &self.settings.bbox_options())
    }

    /// Distance in meters between two users of a coordinate source
    pub fn user_distance<S>(&self, source: &S, from: &UserHandle, to: &UserHandle) -> GeoResult<f64>
    where
        S: CoordinateSource + ?Sized,
    {
        distance_between_user_handles(source, from, to, self.settings.earth_radius_meters)
    }

    /// Rough bounding box around a user's stored position
    pub fn user_bounding_box<S>(&self, source: &S, user: &UserHandle, radius_meters: f64) -> GeoResult<BoundingBox>
    where
        S: CoordinateSource + ?Sized,
    {
        bounding_box_around_user(source, user, radius_meters, &self.settings.bbox_options())
    }

    /// Users of `store` within `radius_meters` of `user`, closest first
    pub fn nearby(&self, store: &ProfileStore, user: &UserHandle, radius_meters: f64) -> GeoResult<Vec<NearbyUser>> {
        store.nearby(user, radius_meters, &self.settings.bbox_options(), self.settings.earth_radius_meters)
    }
}
