//! Contracts for the geocoding and routing services the engine depends on.
//!
//! The engine only needs three answers from a mapping provider: where an
//! address is, what road route joins two locations, and how far and how long
//! a point-to-point trip is. Implementations live outside the core; the
//! Google Maps adapter in `rendezvous-data` is one of them.

mod error;
mod traits;

pub use error::ProviderError;
pub use traits::{Geocoder, RouteProvider};

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// Origin or destination of a routing query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// A free-form address resolved by the provider.
    Address(String),
    /// A point given directly.
    Coordinate(Coordinate),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => f.write_str(address),
            Self::Coordinate(coordinate) => coordinate.fmt(f),
        }
    }
}

impl From<Coordinate> for Location {
    fn from(value: Coordinate) -> Self {
        Self::Coordinate(value)
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Self::Address(value.to_owned())
    }
}

impl From<String> for Location {
    fn from(value: String) -> Self {
        Self::Address(value)
    }
}

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// By car.
    Driving,
    /// On foot.
    Walking,
}

impl TravelMode {
    /// Lowercase provider name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Road distance and travel time of a point-to-point trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadLeg {
    /// Road distance in kilometres.
    pub distance_km: f64,
    /// Travel time.
    pub duration: Duration,
    /// Provider display text for the travel time, e.g. `"7 mins"`.
    pub duration_text: String,
}

impl RoadLeg {
    /// Construct a leg.
    #[must_use]
    pub fn new(distance_km: f64, duration: Duration, duration_text: impl Into<String>) -> Self {
        Self {
            distance_km,
            duration,
            duration_text: duration_text.into(),
        }
    }

    /// A leg between identical points.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0.0, Duration::ZERO, "0 mins")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Location::from("MG Road, Bengaluru"), "MG Road, Bengaluru")]
    #[case(Location::from(Coordinate::new(12.5, 77.25)), "12.5,77.25")]
    fn locations_render_as_query_values(#[case] location: Location, #[case] expected: &str) {
        assert_eq!(location.to_string(), expected);
    }

    #[rstest]
    #[case(TravelMode::Driving, "driving")]
    #[case(TravelMode::Walking, "walking")]
    fn modes_use_provider_names(#[case] mode: TravelMode, #[case] expected: &str) {
        assert_eq!(mode.to_string(), expected);
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, format!("\"{expected}\""));
    }

    #[rstest]
    fn zero_leg_is_empty() {
        let leg = RoadLeg::zero();
        assert_eq!(leg.distance_km, 0.0);
        assert!(leg.duration.is_zero());
    }
}
