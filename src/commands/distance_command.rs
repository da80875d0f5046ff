//! Distance between two coordinates

use clap::ArgMatches;
use log::info;

use crate::api::UserGeo;
use crate::commands::command_traits::Command;
use crate::commands::required_arg;
use crate::coordinate::Coordinate;
use crate::geo::errors::GeoResult;

/// Command for computing the great-circle distance between two coordinates
pub struct DistanceCommand<'a> {
    from: Coordinate,
    to: Coordinate,
    geo: &'a UserGeo,
}

impl<'a> DistanceCommand<'a> {
    /// Create a new distance command from `distance <FROM> <TO>` arguments
    pub fn new(args: &ArgMatches, geo: &'a UserGeo) -> GeoResult<Self> {
        let from = Coordinate::from_string(required_arg(args, "from")?)?;
        let to = Coordinate::from_string(required_arg(args, "to")?)?;
        Ok(DistanceCommand { from, to, geo })
    }
}

impl<'a> Command for DistanceCommand<'a> {
    fn output(&self) -> GeoResult<String> {
        info!("Computing distance from {} to {}", self.from, self.to);
        let distance = self.geo.distance(&self.from, &self.to)?;
        Ok(format!("{:.3}", distance))
    }
}
