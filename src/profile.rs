//! In-memory user profile store
//!
//! Profiles carry the two position fields `user_latitude` and
//! `user_longitude`, either of which may be absent. A store can be
//! loaded from TOML:
//!
//! ```toml
//! [users.alice]
//! user_latitude = 40.7128
//! user_longitude = -74.0060
//! ```

use std::collections::HashMap;
use std::fs;

use log::{debug, info, warn};

use crate::config::number;
use crate::coordinate::Coordinate;
use crate::geo::errors::{GeoError, GeoResult};
use crate::geo::math::{self, BoundingBoxOptions};
use crate::geo::source::{CoordinateSource, UserHandle};

/// Profile field holding the latitude
pub const LATITUDE_FIELD: &str = "user_latitude";
/// Profile field holding the longitude
pub const LONGITUDE_FIELD: &str = "user_longitude";

/// Position fields of one user's profile
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserProfile {
    pub user_latitude: Option<f64>,
    pub user_longitude: Option<f64>,
}

impl UserProfile {
    /// Profile with both fields set
    pub fn new(latitude: f64, longitude: f64) -> Self {
        UserProfile {
            user_latitude: Some(latitude),
            user_longitude: Some(longitude),
        }
    }

    /// Stored coordinate, or `None` if a field is missing
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.user_latitude, self.user_longitude) {
            (Some(lat), Some(long)) => Some(Coordinate::new(lat, long)),
            _ => None,
        }
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.user_latitude.is_none() {
            Some(LATITUDE_FIELD)
        } else if self.user_longitude.is_none() {
            Some(LONGITUDE_FIELD)
        } else {
            None
        }
    }
}

/// A user found by [`ProfileStore::nearby`]
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyUser {
    pub handle: UserHandle,
    pub coordinate: Coordinate,
    pub distance_meters: f64,
}

/// Profiles keyed by user id
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: HashMap<UserHandle, UserProfile>,
}

impl ProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        ProfileStore::default()
    }

    /// Insert or replace a profile
    pub fn insert(&mut self, user: impl Into<UserHandle>, profile: UserProfile) {
        self.profiles.insert(user.into(), profile);
    }

    /// Get the raw profile of a user
    pub fn get(&self, user: &UserHandle) -> Option<&UserProfile> {
        self.profiles.get(user)
    }

    /// Number of stored profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// True when no profiles are stored
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Parse a store from a TOML string with a `[users.<id>]` table per user
    ///
    /// Fields that are absent or not numeric are stored as missing.
    pub fn parse_toml(content: &str) -> GeoResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| GeoError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let mut store = ProfileStore::new();
        let users = match toml_value.get("users") {
            Some(value) => value.as_table()
                .ok_or_else(|| GeoError::ConfigError("[users] must be a table".to_string()))?,
            None => return Ok(store),
        };

        for (id, entry) in users {
            let table = entry.as_table()
                .ok_or_else(|| GeoError::ConfigError(format!("users.{} must be a table", id)))?;
            let profile = UserProfile {
                user_latitude: read_field(id, table, LATITUDE_FIELD),
                user_longitude: read_field(id, table, LONGITUDE_FIELD),
            };
            store.insert(id.as_str(), profile);
        }

        info!("Loaded {} user profiles", store.len());
        Ok(store)
    }

    /// Load a store from a TOML file
    pub fn from_file(path: &str) -> GeoResult<Self> {
        debug!("Loading profiles from {}", path);
        let contents = fs::read_to_string(path)?;
        Self::parse_toml(&contents)
    }

    /// Users within `radius_meters` of `user`, closest first
    ///
    /// Candidates are pre-filtered with a [`SearchWindow`], then kept only if
    /// their haversine distance is within the radius. The center user and
    /// users without a usable coordinate are left out.
    ///
    /// The center must be resolvable: lookup failures are returned as-is.
    /// `options.on_missing` only governs non-numeric center components.
    pub fn nearby(&self, user: &UserHandle, radius_meters: f64,
                  options: &BoundingBoxOptions, earth_radius: f64) -> GeoResult<Vec<NearbyUser>> {
        math::check_radius(radius_meters)?;
        let center = self.coordinate_of(user)?;
        let center = options.on_missing.apply(&center)?;
        center.validate()?;

        let window = SearchWindow::new(&center, radius_meters, earth_radius);

        let mut found = Vec::new();
        for (handle, profile) in &self.profiles {
            if handle == user {
                continue;
            }
            let coordinate = match profile.coordinate() {
                Some(c) if c.validate().is_ok() => c,
                _ => {
                    debug!("Skipping {}: no usable coordinate", handle);
                    continue;
                }
            };
            if !window.contains(&coordinate) {
                continue;
            }

            let distance = math::distance_between_users_with_radius(&center, &coordinate, earth_radius)?;
            if distance <= radius_meters {
                found.push(NearbyUser {
                    handle: handle.clone(),
                    coordinate,
                    distance_meters: distance,
                });
            }
        }

        found.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters)
            .then_with(|| a.handle.cmp(&b.handle)));
        debug!("{} users within {} m of {}", found.len(), radius_meters, user);
        Ok(found)
    }
}

// Slack on the window edges in degrees; the haversine check decides
const WINDOW_SLACK_DEGREES: f64 = 1e-9;

/// Pre-filter that contains every point of a spherical cap
///
/// Unlike the rough bounding box, the longitude half-width is the cap's
/// widest extent, longitudes compare modulo 360, and the longitude test
/// is dropped once the cap covers a pole.
#[derive(Debug, Clone, Copy)]
struct SearchWindow {
    center: Coordinate,
    min_lat: f64,
    max_lat: f64,
    /// Longitude half-width in degrees, `None` when every longitude qualifies
    half_width_long: Option<f64>,
}

impl SearchWindow {
    fn new(center: &Coordinate, radius_meters: f64, earth_radius: f64) -> Self {
        let angular = if earth_radius > 0.0 { radius_meters / earth_radius } else { f64::INFINITY };
        let delta_lat = angular.to_degrees();
        let min_lat = center.latitude - delta_lat;
        let max_lat = center.latitude + delta_lat;

        let half_width_long = if angular >= std::f64::consts::FRAC_PI_2 || min_lat <= -90.0 || max_lat >= 90.0 {
            None
        } else {
            let ratio = angular.sin() / center.latitude.to_radians().cos();
            if ratio >= 1.0 { None } else { Some(ratio.asin().to_degrees()) }
        };

        SearchWindow { center: *center, min_lat, max_lat, half_width_long }
    }

    fn contains(&self, coord: &Coordinate) -> bool {
        if coord.latitude < self.min_lat - WINDOW_SLACK_DEGREES
            || coord.latitude > self.max_lat + WINDOW_SLACK_DEGREES {
            return false;
        }
        match self.half_width_long {
            None => true,
            Some(half_width) => {
                let offset = (coord.longitude - self.center.longitude + 180.0).rem_euclid(360.0) - 180.0;
                offset.abs() <= half_width + WINDOW_SLACK_DEGREES
            }
        }
    }
}

fn read_field(id: &str, table: &toml::value::Table, field: &str) -> Option<f64> {
    let value = table.get(field)?;
    let parsed = number(value).or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()));
    if parsed.is_none() {
        warn!("Profile {} has non-numeric {}: {}", id, field, value);
    }
    parsed
}

impl CoordinateSource for ProfileStore {
    fn coordinate_of(&self, user: &UserHandle) -> GeoResult<Coordinate> {
        let profile = self.profiles.get(user)
            .ok_or_else(|| GeoError::LookupFailure(format!("no profile for user {}", user)))?;

        match profile.missing_field() {
            Some(field) => Err(GeoError::LookupFailure(format!(
                "profile for user {} has no {}", user, field))),
            None => profile.coordinate().ok_or_else(|| GeoError::LookupFailure(format!(
                "profile for user {} is incomplete", user))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::source::MissingCoordinatePolicy;
    use crate::geo::EARTH_RADIUS_METERS;

    const PROFILES: &str = r#"
[users.alice]
user_latitude = 52.5200
user_longitude = 13.4050

[users.bob]
user_latitude = 52.5300
user_longitude = 13.4100

[users.carol]
user_latitude = "52.5000"
user_longitude = "13.4000"

[users.dave]
user_latitude = 48.1351
user_longitude = 11.5820

[users.erin]
user_latitude = 52.52

[users.frank]
user_latitude = "somewhere"
user_longitude = 13.4
"#;

    fn store() -> ProfileStore {
        ProfileStore::parse_toml(PROFILES).unwrap()
    }

    #[test]
    fn loads_numeric_and_string_fields() {
        let store = store();
        assert_eq!(store.len(), 6);
        assert_eq!(store.get(&"carol".into()), Some(&UserProfile::new(52.5, 13.4)));
        assert_eq!(store.get(&"erin".into()).unwrap().user_longitude, None);
        assert_eq!(store.get(&"frank".into()).unwrap().user_latitude, None);
    }

    #[test]
    fn lookup_failures_are_distinguishable() {
        let store = store();
        assert!(store.coordinate_of(&"alice".into()).is_ok());
        for user in ["erin", "frank", "nobody"] {
            let result = store.coordinate_of(&user.into());
            assert!(matches!(result, Err(GeoError::LookupFailure(_))), "{}: {:?}", user, result);
        }
    }

    #[test]
    fn nearby_filters_and_sorts() {
        let store = store();
        let found = store.nearby(&"alice".into(), 5_000.0, &BoundingBoxOptions::default(), EARTH_RADIUS_METERS)
            .unwrap();
        let names: Vec<&str> = found.iter().map(|n| n.handle.as_str()).collect();
        assert_eq!(names, vec!["bob", "carol"]);
        assert!(found[0].distance_meters <= found[1].distance_meters);
        assert!(found.iter().all(|n| n.distance_meters <= 5_000.0));
    }

    #[test]
    fn nearby_unresolvable_center_is_a_lookup_failure() {
        let mut store = store();
        store.insert("gulf", UserProfile::new(0.001, 0.001));

        let zero = BoundingBoxOptions::default();
        let fail = BoundingBoxOptions { on_missing: MissingCoordinatePolicy::Fail, ..zero };
        for options in [zero, fail] {
            for user in ["nobody", "erin"] {
                let result = store.nearby(&user.into(), 1_000.0, &options, EARTH_RADIUS_METERS);
                assert!(matches!(result, Err(GeoError::LookupFailure(_))), "{}: {:?}", user, result);
            }
        }
    }

    #[test]
    fn nearby_non_numeric_center_component_follows_policy() {
        let mut store = ProfileStore::new();
        store.insert("center", UserProfile::new(f64::NAN, 0.0));
        store.insert("gulf", UserProfile::new(0.001, 0.001));

        let zero = BoundingBoxOptions::default();
        let found = store.nearby(&"center".into(), 1_000.0, &zero, EARTH_RADIUS_METERS).unwrap();
        assert_eq!(found.len(), 1);

        let fail = BoundingBoxOptions { on_missing: MissingCoordinatePolicy::Fail, ..zero };
        let result = store.nearby(&"center".into(), 1_000.0, &fail, EARTH_RADIUS_METERS);
        assert!(matches!(result, Err(GeoError::InvalidCoordinate(_))));
    }

    fn pair(center: (f64, f64), other: (f64, f64)) -> ProfileStore {
        let mut store = ProfileStore::new();
        store.insert("center", UserProfile::new(center.0, center.1));
        store.insert("other", UserProfile::new(other.0, other.1));
        store
    }

    #[test]
    fn nearby_finds_users_at_high_latitude() {
        // the cap is wider than the rough box toward the pole
        let store = pair((80.0, 0.0), (81.0, 26.5));
        let distance = crate::geo::haversine_distance(80.0, 0.0, 81.0, 26.5);
        assert!(distance < 500_000.0);

        let found = store.nearby(&"center".into(), 500_000.0, &BoundingBoxOptions::default(), EARTH_RADIUS_METERS)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!((found[0].distance_meters - distance).abs() < 1e-6);
    }

    #[test]
    fn nearby_finds_users_across_the_antimeridian() {
        let store = pair((-17.0, 179.9), (-17.0, -179.9));
        let options = BoundingBoxOptions::default();

        let found = store.nearby(&"center".into(), 50_000.0, &options, EARTH_RADIUS_METERS).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].distance_meters < 25_000.0);

        let found = store.nearby(&"other".into(), 50_000.0, &options, EARTH_RADIUS_METERS).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn nearby_works_around_the_pole() {
        let options = BoundingBoxOptions::default();

        let store = pair((89.9, 0.0), (89.9, 180.0));
        let found = store.nearby(&"center".into(), 50_000.0, &options, EARTH_RADIUS_METERS).unwrap();
        assert_eq!(found.len(), 1);

        // a center on the pole has no finite rough box but a well defined cap
        let store = pair((90.0, 0.0), (89.95, -120.0));
        let found = store.nearby(&"center".into(), 10_000.0, &options, EARTH_RADIUS_METERS).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn nearby_still_excludes_users_outside_the_radius() {
        let store = pair((80.0, 0.0), (80.0, 40.0));
        let found = store.nearby(&"center".into(), 500_000.0, &BoundingBoxOptions::default(), EARTH_RADIUS_METERS)
            .unwrap();
        assert!(found.is_empty());

        let result = store.nearby(&"center".into(), -1.0, &BoundingBoxOptions::default(), EARTH_RADIUS_METERS);
        assert!(matches!(result, Err(GeoError::InvalidRadius(_))));
    }

    #[test]
    fn empty_document_gives_empty_store() {
        assert!(ProfileStore::parse_toml("").unwrap().is_empty());
        assert!(matches!(ProfileStore::parse_toml("[users]\nalice = 3\n"), Err(GeoError::ConfigError(_))));
    }
}
