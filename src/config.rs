//! Settings for distance and bounding box computations
//!
//! Settings are read from a small TOML document:
//!
//! ```toml
//! [geo]
//! earth_radius_meters = 6371000.0
//! latitude_mode = "radians"   # or "degrees"
//! on_missing = "zero"         # or "fail"
//! ```
//!
//! Keys that are absent keep their default value.

use std::fs;

use lazy_static::lazy_static;
use log::debug;

use crate::geo::errors::{GeoError, GeoResult};
use crate::geo::math::{BoundingBoxOptions, CosineLatitude, EARTH_RADIUS_METERS};
use crate::geo::source::MissingCoordinatePolicy;

lazy_static! {
    // Parse the bundled defaults once
    static ref DEFAULT_SETTINGS: GeoSettings = {
        let content = include_str!("../usergeo.toml");
        GeoSettings::parse_over(GeoSettings::builtin(), content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse bundled settings: {}", e);
            GeoSettings::builtin()
        })
    };
}

/// Tunable parameters of the geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoSettings {
    /// Sphere radius used by haversine, in meters
    pub earth_radius_meters: f64,
    /// Unit handed to cos() for the bounding box longitude delta
    pub latitude_mode: CosineLatitude,
    /// Fallback for missing or non-numeric coordinates
    pub on_missing: MissingCoordinatePolicy,
}

impl GeoSettings {
    /// Hard-coded values used when the bundled file is unreadable
    fn builtin() -> Self {
        GeoSettings {
            earth_radius_meters: EARTH_RADIUS_METERS,
            latitude_mode: CosineLatitude::Radians,
            on_missing: MissingCoordinatePolicy::ZeroDefault,
        }
    }

    /// Settings from the bundled `usergeo.toml`
    pub fn defaults() -> Self {
        *DEFAULT_SETTINGS
    }

    /// Parse settings from a TOML string, starting from the defaults
    pub fn parse_toml(content: &str) -> GeoResult<Self> {
        Self::parse_over(Self::defaults(), content)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &str) -> GeoResult<Self> {
        debug!("Loading settings from {}", path);
        let contents = fs::read_to_string(path)?;
        Self::parse_toml(&contents)
    }

    /// Bounding box options implied by these settings
    pub fn bbox_options(&self) -> BoundingBoxOptions {
        BoundingBoxOptions {
            latitude_mode: self.latitude_mode,
            on_missing: self.on_missing,
        }
    }

    fn parse_over(mut settings: GeoSettings, content: &str) -> GeoResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| GeoError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let table = match toml_value.get("geo") {
            Some(value) => value.as_table()
                .ok_or_else(|| GeoError::ConfigError("[geo] must be a table".to_string()))?,
            None => return Ok(settings),
        };

        if let Some(value) = table.get("earth_radius_meters") {
            let radius = number(value)
                .ok_or_else(|| GeoError::ConfigError("earth_radius_meters must be a number".to_string()))?;
            if !radius.is_finite() || radius <= 0.0 {
                return Err(GeoError::ConfigError(format!(
                    "earth_radius_meters must be positive, got {}", radius)));
            }
            settings.earth_radius_meters = radius;
        }

        if let Some(value) = table.get("latitude_mode") {
            let name = value.as_str()
                .ok_or_else(|| GeoError::ConfigError("latitude_mode must be a string".to_string()))?;
            settings.latitude_mode = CosineLatitude::from_name(name)?;
        }

        if let Some(value) = table.get("on_missing") {
            let name = value.as_str()
                .ok_or_else(|| GeoError::ConfigError("on_missing must be a string".to_string()))?;
            settings.on_missing = MissingCoordinatePolicy::from_name(name)?;
        }

        Ok(settings)
    }
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Read a TOML float or integer as f64
pub(crate) fn number(value: &toml::Value) -> Option<f64> {
    value.as_float().or_else(|| value.as_integer().map(|i| i as f64))
}
