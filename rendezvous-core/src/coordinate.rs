//! WGS-84 coordinates used throughout the matching pipeline.

use std::fmt;
use std::hash::{Hash, Hasher};

use geo::Coord;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in WGS-84 degrees.
///
/// Coordinates double as map keys, so equality and hashing compare the raw
/// bit patterns of both components. There is no tolerance: `0.0` and `-0.0`
/// are different keys.
///
/// # Examples
///
/// ```
/// use rendezvous_core::Coordinate;
///
/// let office = Coordinate::new(12.9352, 77.6245);
/// assert_eq!(office, Coordinate::new(12.9352, 77.6245));
/// assert_eq!(office.to_string(), "12.9352,77.6245");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

/// Formats as `lat,lon`, the form routing providers accept as a location.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.lon,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self::new(value.y, value.x)
    }
}
