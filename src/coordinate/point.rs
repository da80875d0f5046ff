//! Latitude/longitude pair in decimal degrees

use std::fmt;

use crate::geo::errors::{GeoError, GeoResult};

/// Valid latitude range in degrees
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
/// Valid longitude range in degrees
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// A geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Coordinate {
    /// Null Island, used by the zero-default fallback policy
    pub const ORIGIN: Coordinate = Coordinate { latitude: 0.0, longitude: 0.0 };

    /// Create a new coordinate (no range check)
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate { latitude, longitude }
    }

    /// Build a coordinate from raw, possibly absent profile fields
    ///
    /// Both components must be present and pass [`Coordinate::validate`].
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> GeoResult<Self> {
        let latitude = latitude
            .ok_or_else(|| GeoError::InvalidCoordinate("latitude is missing".to_string()))?;
        let longitude = longitude
            .ok_or_else(|| GeoError::InvalidCoordinate("longitude is missing".to_string()))?;

        let coord = Coordinate::new(latitude, longitude);
        coord.validate()?;
        Ok(coord)
    }

    /// Parse a coordinate from a string (format: "lat,long")
    pub fn from_string(coord_str: &str) -> GeoResult<Self> {
        let parts: Vec<&str> = coord_str.split(',').collect();
        if parts.len() != 2 {
            return Err(GeoError::InvalidCoordinate(format!(
                "'{}' must be in format 'lat,long'", coord_str)));
        }

        let latitude = parts[0].trim().parse::<f64>()
            .map_err(|_| GeoError::InvalidCoordinate(format!("Invalid latitude value '{}'", parts[0].trim())))?;
        let longitude = parts[1].trim().parse::<f64>()
            .map_err(|_| GeoError::InvalidCoordinate(format!("Invalid longitude value '{}'", parts[1].trim())))?;

        let coord = Coordinate::new(latitude, longitude);
        coord.validate()?;
        Ok(coord)
    }

    /// Check that both components are finite
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Check that both components are finite and inside their valid ranges
    pub fn validate(&self) -> GeoResult<()> {
        check_component("latitude", self.latitude, LATITUDE_RANGE)?;
        check_component("longitude", self.longitude, LONGITUDE_RANGE)
    }
}

fn check_component(name: &str, value: f64, (min, max): (f64, f64)) -> GeoResult<()> {
    if !value.is_finite() {
        return Err(GeoError::InvalidCoordinate(format!("{} is not a number ({})", name, value)));
    }
    if value < min || value > max {
        return Err(GeoError::InvalidCoordinate(format!(
            "{} {} outside [{}, {}]", name, value, min, max)));
    }
    Ok(())
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
