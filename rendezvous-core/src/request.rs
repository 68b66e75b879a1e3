//! The JSON request accepted at the presentation boundary.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TravelMode;

/// Which way the trip goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Drivers leave home for the office and pick one companion up on the way.
    ToOffice,
    /// Drivers leave the office for home and drop companions off on the way.
    FromOffice,
}

impl Direction {
    /// How companions travel to or from the meeting point.
    #[must_use]
    pub const fn companion_mode(self) -> TravelMode {
        match self {
            Self::ToOffice => TravelMode::Driving,
            Self::FromOffice => TravelMode::Walking,
        }
    }
}

/// A driver as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRequest {
    /// Unique driver name.
    pub name: String,
    /// Home address.
    pub address: String,
    /// Seats offered.
    pub capacity: u32,
}

/// A companion as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionRequest {
    /// Unique companion name.
    pub name: String,
    /// Pickup or drop-off address.
    pub address: String,
}

/// One matching invocation.
///
/// # Examples
///
/// ```
/// use rendezvous_core::{Direction, MatchRequest};
///
/// let request: MatchRequest = serde_json::from_str(
///     r#"{
///         "direction": "from_office",
///         "office": "Koramangala, Bengaluru",
///         "drivers": [{ "name": "asha", "address": "Indiranagar", "capacity": 2 }],
///         "companions": [{ "name": "ravi", "address": "Domlur" }]
///     }"#,
/// )?;
/// assert_eq!(request.direction, Direction::FromOffice);
/// assert!(request.validate().is_ok());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Trip direction.
    pub direction: Direction,
    /// Office address shared by all participants.
    pub office: String,
    /// Drivers in input order.
    #[serde(default)]
    pub drivers: Vec<DriverRequest>,
    /// Companions in input order.
    #[serde(default)]
    pub companions: Vec<CompanionRequest>,
}

/// Reasons a [`MatchRequest`] is rejected before any provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    /// Two drivers share a name.
    #[error("driver `{name}` appears more than once")]
    DuplicateDriver {
        /// Repeated name.
        name: String,
    },
    /// Two companions share a name.
    #[error("companion `{name}` appears more than once")]
    DuplicateCompanion {
        /// Repeated name.
        name: String,
    },
    /// A driver offers no seats.
    #[error("driver `{name}` must offer at least one seat")]
    ZeroCapacity {
        /// Driver name.
        name: String,
    },
    /// Trips to the office carry a single companion.
    #[error("trips to the office accept one companion, got {count}")]
    TooManyCompanions {
        /// Companions submitted.
        count: usize,
    },
}

impl MatchRequest {
    /// Check the request for problems no provider call can fix.
    ///
    /// # Errors
    ///
    /// Returns the first [`RequestValidationError`] found.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        let mut drivers = HashSet::new();
        for driver in &self.drivers {
            if !drivers.insert(driver.name.as_str()) {
                return Err(RequestValidationError::DuplicateDriver {
                    name: driver.name.clone(),
                });
            }
            if driver.capacity == 0 {
                return Err(RequestValidationError::ZeroCapacity {
                    name: driver.name.clone(),
                });
            }
        }
        let mut companions = HashSet::new();
        if let Some(duplicate) = self
            .companions
            .iter()
            .find(|companion| !companions.insert(companion.name.as_str()))
        {
            return Err(RequestValidationError::DuplicateCompanion {
                name: duplicate.name.clone(),
            });
        }
        if self.direction == Direction::ToOffice && self.companions.len() > 1 {
            return Err(RequestValidationError::TooManyCompanions {
                count: self.companions.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> MatchRequest {
        MatchRequest {
            direction: Direction::FromOffice,
            office: "office".into(),
            drivers: vec![
                DriverRequest {
                    name: "A".into(),
                    address: "a".into(),
                    capacity: 2,
                },
                DriverRequest {
                    name: "B".into(),
                    address: "b".into(),
                    capacity: 1,
                },
            ],
            companions: vec![
                CompanionRequest {
                    name: "c1".into(),
                    address: "x".into(),
                },
                CompanionRequest {
                    name: "c2".into(),
                    address: "y".into(),
                },
            ],
        }
    }

    #[rstest]
    fn accepts_a_well_formed_request(request: MatchRequest) {
        assert_eq!(request.validate(), Ok(()));
    }

    #[rstest]
    fn rejects_duplicate_drivers(mut request: MatchRequest) {
        request.drivers[1].name = "A".into();
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::DuplicateDriver { name: "A".into() })
        );
    }

    #[rstest]
    fn rejects_duplicate_companions(mut request: MatchRequest) {
        request.companions[1].name = "c1".into();
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::DuplicateCompanion { name: "c1".into() })
        );
    }

    #[rstest]
    fn rejects_drivers_without_seats(mut request: MatchRequest) {
        request.drivers[1].capacity = 0;
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::ZeroCapacity { name: "B".into() })
        );
    }

    #[rstest]
    fn trips_to_the_office_take_one_companion(mut request: MatchRequest) {
        request.direction = Direction::ToOffice;
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::TooManyCompanions { count: 2 })
        );
        request.companions.truncate(1);
        assert_eq!(request.validate(), Ok(()));
    }

    #[rstest]
    #[case(Direction::ToOffice, TravelMode::Driving)]
    #[case(Direction::FromOffice, TravelMode::Walking)]
    fn companion_mode_follows_direction(#[case] direction: Direction, #[case] mode: TravelMode) {
        assert_eq!(direction.companion_mode(), mode);
    }

    #[rstest]
    fn missing_participant_lists_default_to_empty() {
        let request: MatchRequest =
            serde_json::from_str(r#"{ "direction": "to_office", "office": "hq" }"#).unwrap();
        assert!(request.drivers.is_empty());
        assert!(request.companions.is_empty());
    }
}
