//! Drivers, companions and the identifiers that tie per-pair results to them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Coordinate, Route};

macro_rules! participant_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a participant name.
            #[must_use]
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// The underlying name.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

participant_id! {
    /// Name of a driver, unique within one matching run.
    DriverId
}

participant_id! {
    /// Name of a companion, unique within one matching run.
    CompanionId
}

/// A car owner offering seats along a fixed route.
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    /// Driver name.
    pub id: DriverId,
    /// Seats available to companions.
    pub capacity_seats: u32,
    /// Road route the driver will follow.
    pub route: Route,
}

impl Driver {
    /// Construct a driver.
    #[must_use]
    pub fn new(id: impl Into<DriverId>, capacity_seats: u32, route: Route) -> Self {
        Self {
            id: id.into(),
            capacity_seats,
            route,
        }
    }
}

/// A person looking for a ride.
#[derive(Debug, Clone, PartialEq)]
pub struct Companion {
    /// Companion name.
    pub id: CompanionId,
    /// Where the companion is picked up or dropped off.
    pub location: Coordinate,
}

impl Companion {
    /// Construct a companion.
    #[must_use]
    pub fn new(id: impl Into<CompanionId>, location: Coordinate) -> Self {
        Self {
            id: id.into(),
            location,
        }
    }
}

/// Key for per-pair results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    /// Driver half of the pair.
    pub driver: DriverId,
    /// Companion half of the pair.
    pub companion: CompanionId,
}

impl PairKey {
    /// Construct a pair key.
    #[must_use]
    pub fn new(driver: impl Into<DriverId>, companion: impl Into<CompanionId>) -> Self {
        Self {
            driver: driver.into(),
            companion: companion.into(),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.driver, self.companion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[rstest]
    fn ids_serialise_as_bare_strings() {
        let json = serde_json::to_string(&DriverId::new("asha")).unwrap();
        assert_eq!(json, "\"asha\"");
        let id: CompanionId = serde_json::from_str("\"ravi\"").unwrap();
        assert_eq!(id.as_str(), "ravi");
    }

    #[rstest]
    fn pair_keys_index_results() {
        let mut results = HashMap::new();
        results.insert(PairKey::new("A", "c1"), 1.0);
        assert_eq!(results.get(&PairKey::new("A", "c1")), Some(&1.0));
        assert_eq!(results.get(&PairKey::new("A", "c2")), None);
        assert_eq!(PairKey::new("A", "c1").to_string(), "A/c1");
    }
}
