//! Bounding box around a coordinate

use clap::ArgMatches;
use log::info;

use crate::api::UserGeo;
use crate::commands::command_traits::Command;
use crate::commands::{parse_radius, required_arg};
use crate::coordinate::Coordinate;
use crate::geo::errors::GeoResult;

/// Command for computing the rough bounding box of a radius around a point
pub struct BoundingBoxCommand<'a> {
    center: Coordinate,
    radius_meters: f64,
    geo: &'a UserGeo,
}

impl<'a> BoundingBoxCommand<'a> {
    /// Create a new bounding box command from `bbox <CENTER> --radius M` arguments
    pub fn new(args: &ArgMatches, geo: &'a UserGeo) -> GeoResult<Self> {
        let center = Coordinate::from_string(required_arg(args, "center")?)?;
        let radius_meters = parse_radius(args)?;
        Ok(BoundingBoxCommand { center, radius_meters, geo })
    }
}

impl<'a> Command for BoundingBoxCommand<'a> {
    fn output(&self) -> GeoResult<String> {
        info!("Computing bounding box of {} m around {}", self.radius_meters, self.center);
        let bbox = self.geo.bounding_box(&self.center, self.radius_meters)?;
        Ok(bbox.to_string())
    }
}
