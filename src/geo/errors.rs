//! Custom error types for geographic computations

use std::fmt;
use std::io;

/// Errors produced by coordinate validation, lookup and geometry
#[derive(Debug)]
pub enum GeoError {
    /// A latitude/longitude is missing, non-numeric or out of range
    InvalidCoordinate(String),
    /// A coordinate source could not resolve a user's position
    LookupFailure(String),
    /// The geometry has no finite answer (e.g. longitude span at a pole)
    DegenerateGeometry(String),
    /// Radius was negative or not a finite number
    InvalidRadius(f64),
    /// Settings or profile file could not be interpreted
    ConfigError(String),
    /// I/O error
    IoError(io::Error),
    /// Generic error with message
    GenericError(String),
}

impl GeoError {
    /// True for errors that mean "no coordinate available for this user"
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, GeoError::LookupFailure(_))
    }
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::InvalidCoordinate(msg) => write!(f, "Invalid coordinate: {}", msg),
            GeoError::LookupFailure(msg) => write!(f, "Coordinate unavailable: {}", msg),
            GeoError::DegenerateGeometry(msg) => write!(f, "Degenerate geometry: {}", msg),
            GeoError::InvalidRadius(r) => write!(f, "Invalid radius: {} (must be a finite value >= 0)", r),
            GeoError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GeoError::IoError(e) => write!(f, "I/O error: {}", e),
            GeoError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for GeoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeoError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GeoError {
    fn from(error: io::Error) -> Self {
        GeoError::IoError(error)
    }
}

impl From<String> for GeoError {
    fn from(msg: String) -> Self {
        GeoError::GenericError(msg)
    }
}

/// Result type for geographic operations
pub type GeoResult<T> = Result<T, GeoError>;
