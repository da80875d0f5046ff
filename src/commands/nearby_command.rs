//! Users within a radius of another user

use clap::ArgMatches;
use log::info;

use crate::api::UserGeo;
use crate::commands::command_traits::Command;
use crate::commands::{load_profiles, parse_radius, required_arg};
use crate::geo::errors::GeoResult;
use crate::geo::source::UserHandle;
use crate::profile::ProfileStore;

/// Command listing the users near a given user, closest first
pub struct NearbyCommand<'a> {
    store: ProfileStore,
    user: UserHandle,
    radius_meters: f64,
    geo: &'a UserGeo,
}

impl<'a> NearbyCommand<'a> {
    /// Create a new command from `nearby --profiles FILE <USER> --radius M` arguments
    pub fn new(args: &ArgMatches, geo: &'a UserGeo) -> GeoResult<Self> {
        let store = load_profiles(args)?;
        let user = UserHandle::new(required_arg(args, "user")?);
        let radius_meters = parse_radius(args)?;
        Ok(NearbyCommand { store, user, radius_meters, geo })
    }
}

impl<'a> Command for NearbyCommand<'a> {
    fn output(&self) -> GeoResult<String> {
        info!("Searching users within {} m of {}", self.radius_meters, self.user);
        let found = self.geo.nearby(&self.store, &self.user, self.radius_meters)?;

        let lines: Vec<String> = found.iter()
            .map(|n| format!("{}\t{:.3}", n.handle, n.distance_meters))
            .collect();
        Ok(lines.join("\n"))
    }
}
