//! Bounding box structure for pre-filtering candidates around a point

use std::fmt;

use super::point::Coordinate;
use crate::geo::errors::{GeoError, GeoResult};

/// A latitude/longitude rectangle in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum latitude
    pub min_lat: f64,
    /// Minimum longitude
    pub min_long: f64,
    /// Maximum latitude
    pub max_lat: f64,
    /// Maximum longitude
    pub max_long: f64,
    /// Radius in meters the box was derived from, if any
    pub radius_meters: Option<f64>,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(min_lat: f64, min_long: f64, max_lat: f64, max_long: f64) -> Self {
        BoundingBox {
            min_lat,
            min_long,
            max_lat,
            max_long,
            radius_meters: None,
        }
    }

    /// Parse a bounding box from a string (format: "minlat,minlong,maxlat,maxlong")
    pub fn from_string(bbox_str: &str) -> GeoResult<Self> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err(GeoError::GenericError(
                "Bounding box must have 4 comma-separated values".to_string()));
        }

        let mut values = [0.0f64; 4];
        for (slot, (part, name)) in values.iter_mut()
            .zip(parts.iter().zip(["min_lat", "min_long", "max_lat", "max_long"]))
        {
            *slot = part.trim().parse::<f64>()
                .map_err(|_| GeoError::GenericError(format!("Invalid {} value", name)))?;
        }

        Ok(BoundingBox::new(values[0], values[1], values[2], values[3]))
    }

    /// The four corners as `[min_lat, min_long, max_lat, max_long]`
    pub fn as_array(&self) -> [f64; 4] {
        [self.min_lat, self.min_long, self.max_lat, self.max_long]
    }

    /// Latitude extent in degrees
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude extent in degrees
    pub fn long_span(&self) -> f64 {
        self.max_long - self.min_long
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            self.min_lat + self.lat_span() / 2.0,
            self.min_long + self.long_span() / 2.0,
        )
    }

    /// Check if this bounding box contains a coordinate (edges inclusive)
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.latitude >= self.min_lat && coord.latitude <= self.max_lat &&
            coord.longitude >= self.min_long && coord.longitude <= self.max_long
    }

    /// Set the radius in meters for this bounding box
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius_meters = Some(radius);
        self
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.min_lat, self.min_long, self.max_lat, self.max_long)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let bbox = BoundingBox::new(-1.0, -2.0, 1.0, 2.0);
        assert!(bbox.contains(&Coordinate::new(0.0, 0.0)));
        assert!(bbox.contains(&Coordinate::new(1.0, -2.0)));
        assert!(!bbox.contains(&Coordinate::new(1.01, 0.0)));
        assert!(!bbox.contains(&Coordinate::new(0.0, 2.5)));
    }

    #[test]
    fn center_and_spans() {
        let bbox = BoundingBox::new(10.0, 20.0, 12.0, 26.0);
        assert_eq!(bbox.lat_span(), 2.0);
        assert_eq!(bbox.long_span(), 6.0);
        assert_eq!(bbox.center(), Coordinate::new(11.0, 23.0));
    }

    #[test]
    fn parses_four_values() {
        let bbox = BoundingBox::from_string("1, 2, 3, 4").unwrap();
        assert_eq!(bbox.as_array(), [1.0, 2.0, 3.0, 4.0]);
        assert!(BoundingBox::from_string("1,2,3").is_err());
        assert!(BoundingBox::from_string("1,2,x,4").is_err());
    }
}
