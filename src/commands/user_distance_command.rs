//! Distance between two stored users

use clap::ArgMatches;
use log::info;

use crate::api::UserGeo;
use crate::commands::command_traits::Command;
use crate::commands::{load_profiles, required_arg};
use crate::geo::errors::GeoResult;
use crate::geo::source::UserHandle;
use crate::profile::ProfileStore;

/// Command for computing the distance between two users of a profile file
pub struct UserDistanceCommand<'a> {
    store: ProfileStore,
    from: UserHandle,
    to: UserHandle,
    geo: &'a UserGeo,
}

impl<'a> UserDistanceCommand<'a> {
    /// Create a new command from `user-distance --profiles FILE <FROM> <TO>` arguments
    pub fn new(args: &ArgMatches, geo: &'a UserGeo) -> GeoResult<Self> {
        let store = load_profiles(args)?;
        let from = UserHandle::new(required_arg(args, "from")?);
        let to = UserHandle::new(required_arg(args, "to")?);
        Ok(UserDistanceCommand { store, from, to, geo })
    }
}

impl<'a> Command for UserDistanceCommand<'a> {
    fn output(&self) -> GeoResult<String> {
        info!("Computing distance between users {} and {}", self.from, self.to);
        let distance = self.geo.user_distance(&self.store, &self.from, &self.to)?;
        Ok(format!("{:.3}", distance))
    }
}
