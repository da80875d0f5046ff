//! Coordinate handling for user positions
//!
//! This module provides the value types the geometry functions
//! work on: a latitude/longitude pair and a latitude/longitude box.

mod bbox;
mod point;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::point::{Coordinate, LATITUDE_RANGE, LONGITUDE_RANGE};
