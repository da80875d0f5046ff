//! CLI command implementations
//!
//! This module contains the command-line definition and the commands
//! it dispatches to, using the Command pattern.

pub mod command_traits;
pub mod distance_command;
pub mod bbox_command;
pub mod user_distance_command;
pub mod nearby_command;

pub use command_traits::{Command, CommandFactory};
pub use distance_command::DistanceCommand;
pub use bbox_command::BoundingBoxCommand;
pub use user_distance_command::UserDistanceCommand;
pub use nearby_command::NearbyCommand;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use log::debug;

use crate::api::UserGeo;
use crate::geo::errors::{GeoError, GeoResult};
use crate::profile::ProfileStore;

/// Build the command-line definition
pub fn cli() -> ClapCommand {
    let radius = Arg::new("radius")
        .short('r')
        .long("radius")
        .help("Radius in meters")
        .value_name("METERS")
        .allow_negative_numbers(true)
        .required(true);
    let profiles = Arg::new("profiles")
        .short('p')
        .long("profiles")
        .help("TOML file with [users.<id>] user_latitude/user_longitude entries")
        .value_name("FILE")
        .required(true);

    ClapCommand::new("usergeo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Distance and bounding boxes between user positions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Settings file (earth radius, latitude mode, missing-coordinate policy)")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log records to this file")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            ClapCommand::new("distance")
                .about("Great-circle distance in meters between two coordinates")
                .arg(coordinate_arg("from", "Start coordinate as lat,long", 1))
                .arg(coordinate_arg("to", "Target coordinate as lat,long", 2)),
        )
        .subcommand(
            ClapCommand::new("bbox")
                .about("Rough bounding box (min_lat,min_long,max_lat,max_long) around a coordinate")
                .arg(coordinate_arg("center", "Center coordinate as lat,long", 1))
                .arg(radius.clone()),
        )
        .subcommand(
            ClapCommand::new("user-distance")
                .about("Distance in meters between two stored users")
                .arg(profiles.clone())
                .arg(Arg::new("from").help("First user id").required(true).index(1))
                .arg(Arg::new("to").help("Second user id").required(true).index(2)),
        )
        .subcommand(
            ClapCommand::new("nearby")
                .about("Users within a radius of a stored user, closest first")
                .arg(profiles)
                .arg(Arg::new("user").help("User id at the center").required(true).index(1))
                .arg(radius),
        )
}

fn coordinate_arg(name: &'static str, help: &'static str, index: usize) -> Arg {
    Arg::new(name)
        .help(help)
        .value_name("LAT,LONG")
        .allow_hyphen_values(true)
        .required(true)
        .index(index)
}

/// Factory for creating command instances based on CLI arguments
pub struct UsergeoCommandFactory<'a> {
    geo: &'a UserGeo,
}

impl<'a> UsergeoCommandFactory<'a> {
    /// Create a new factory instance
    pub fn new(geo: &'a UserGeo) -> Self {
        UsergeoCommandFactory { geo }
    }
}

impl<'a> CommandFactory<'a> for UsergeoCommandFactory<'a> {
    fn create_command(&self, args: &ArgMatches) -> GeoResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("distance", sub)) => Ok(Box::new(DistanceCommand::new(sub, self.geo)?)),
            Some(("bbox", sub)) => Ok(Box::new(BoundingBoxCommand::new(sub, self.geo)?)),
            Some(("user-distance", sub)) => Ok(Box::new(UserDistanceCommand::new(sub, self.geo)?)),
            Some(("nearby", sub)) => Ok(Box::new(NearbyCommand::new(sub, self.geo)?)),
            Some((other, _)) => Err(GeoError::GenericError(format!("Unknown command: {}", other))),
            None => Err(GeoError::GenericError("No command given".to_string())),
        }
    }
}

pub(crate) fn required_arg<'m>(args: &'m ArgMatches, name: &str) -> GeoResult<&'m str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| GeoError::GenericError(format!("Missing {} argument", name)))
}

pub(crate) fn parse_radius(args: &ArgMatches) -> GeoResult<f64> {
    let radius_str = required_arg(args, "radius")?;
    radius_str.trim().parse::<f64>()
        .map_err(|_| GeoError::GenericError(format!("Invalid radius: {}", radius_str)))
}

pub(crate) fn load_profiles(args: &ArgMatches) -> GeoResult<ProfileStore> {
    let path = required_arg(args, "profiles")?;
    debug!("Profile file: {}", path);
    ProfileStore::from_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(argv: &[&str]) -> GeoResult<String> {
        let matches = cli().try_get_matches_from(argv)
            .map_err(|e| GeoError::GenericError(e.to_string()))?;
        let geo = UserGeo::new();
        let factory = UsergeoCommandFactory::new(&geo);
        let out = factory.create_command(&matches)?.output();
        out
    }

    #[test]
    fn distance_command_prints_meters() {
        let out = run(&["usergeo", "distance", "0,0", "0,90"]).unwrap();
        let meters: f64 = out.parse().unwrap();
        assert!((meters - 10_007_543.0).abs() < 1.0);
    }

    #[test]
    fn distance_command_accepts_negative_coordinates() {
        let out = run(&["usergeo", "distance", "-33.8688,151.2093", "-33.8688,151.2093"]).unwrap();
        assert_eq!(out, "0.000");
    }

    #[test]
    fn bbox_command_prints_four_values() {
        let out = run(&["usergeo", "bbox", "0,0", "--radius", "111040"]).unwrap();
        let values: Vec<f64> = out.split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(values.len(), 4);
        assert!((values[2] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn bbox_command_rejects_negative_radius() {
        let result = run(&["usergeo", "bbox", "0,0", "--radius", "-5"]);
        assert!(matches!(result, Err(GeoError::InvalidRadius(_))));
    }

    #[test]
    fn invalid_coordinate_is_reported() {
        let result = run(&["usergeo", "distance", "0,0", "abc,1"]);
        assert!(matches!(result, Err(GeoError::InvalidCoordinate(_))));
    }

    #[test]
    fn missing_profile_file_is_io_error() {
        let result = run(&["usergeo", "user-distance", "--profiles", "/nonexistent/usergeo.toml", "a", "b"]);
        assert!(matches!(result, Err(GeoError::IoError(_))));
    }
}
