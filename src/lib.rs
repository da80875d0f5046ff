pub mod api;
pub mod commands;
pub mod config;
pub mod coordinate;
pub mod geo;
pub mod profile;
pub mod utils;

pub use crate::api::UserGeo;

pub use config::GeoSettings;
pub use coordinate::{BoundingBox, Coordinate};
pub use geo::{
    BoundingBoxOptions, CoordinateSource, CosineLatitude, GeoError, GeoResult,
    MissingCoordinatePolicy, UserHandle, distance_between_users, haversine_distance,
    rough_bounding_box,
};
pub use profile::{NearbyUser, ProfileStore, UserProfile};
