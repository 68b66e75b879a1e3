use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::{
    Assignment, CompanionId, Coordinate, Direction, DriverId, ProviderError, Route,
};

/// What an exclusion refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A driver.
    Driver,
    /// A companion.
    Companion,
    /// The shared office.
    Office,
}

/// A participant, or the office, dropped from a run because a provider call
/// failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    /// Participant name.
    pub participant: String,
    /// Participant role.
    pub role: Role,
    /// Human-readable cause.
    pub reason: String,
}

impl Exclusion {
    pub(crate) fn driver(id: &DriverId, cause: &ProviderError) -> Self {
        Self {
            participant: id.to_string(),
            role: Role::Driver,
            reason: cause.to_string(),
        }
    }

    pub(crate) fn office(address: &str, cause: &ProviderError) -> Self {
        Self {
            participant: address.to_owned(),
            role: Role::Office,
            reason: cause.to_string(),
        }
    }

    pub(crate) fn companion(id: &CompanionId, cause: &ProviderError) -> Self {
        Self {
            participant: id.to_string(),
            role: Role::Companion,
            reason: cause.to_string(),
        }
    }
}

/// Per-leg travel times of a driver's trip through its pickups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    /// Companions in the order they are met.
    pub stops: Vec<CompanionId>,
    /// One entry per leg, origin first; serialised as whole seconds.
    #[serde(rename = "leg_seconds", serialize_with = "as_seconds")]
    pub legs: Vec<Duration>,
}

impl Itinerary {
    /// Total travel time across every leg.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.legs.iter().sum()
    }
}

fn as_seconds<S: Serializer>(legs: &[Duration], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(legs.iter().map(Duration::as_secs))
}

/// Counters describing how much work a run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MatchStats {
    /// Driver/companion pairs evaluated against a route.
    pub pairs_considered: usize,
    /// Pairs for which a meeting point was found.
    pub pairs_with_intersection: usize,
}

/// Everything a caller needs to present a matching run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    /// Trip direction.
    pub direction: Direction,
    /// Geocoded office; `None` when it could not be geocoded.
    pub office: Option<Coordinate>,
    /// Geocoded driver homes.
    pub drivers: BTreeMap<DriverId, Coordinate>,
    /// Geocoded companion locations.
    pub companions: BTreeMap<CompanionId, Coordinate>,
    /// Companions placed with drivers.
    pub assignment: Assignment,
    /// Route of every driver whose route could be fetched.
    pub routes: BTreeMap<DriverId, Route>,
    /// Participants, or the office, dropped from the run.
    pub exclusions: Vec<Exclusion>,
    /// Leg travel times per driver, when requested.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub itineraries: BTreeMap<DriverId, Itinerary>,
    /// Work counters.
    pub stats: MatchStats,
}

impl MatchOutcome {
    pub(crate) fn new(direction: Direction) -> Self {
        Self {
            direction,
            office: None,
            drivers: BTreeMap::new(),
            companions: BTreeMap::new(),
            assignment: Assignment::new(),
            routes: BTreeMap::new(),
            exclusions: Vec::new(),
            itineraries: BTreeMap::new(),
            stats: MatchStats::default(),
        }
    }

    /// Companions that were geocoded but not assigned to any driver.
    #[must_use]
    pub fn unassigned(&self) -> Vec<&CompanionId> {
        self.companions
            .keys()
            .filter(|companion| self.assignment.driver_of(companion).is_none())
            .collect()
    }
}
