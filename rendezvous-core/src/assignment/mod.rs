//! Turn per-pair meeting points into a companion-to-driver assignment.
//!
//! Both strategies walk pairs in ascending road distance, ties broken by the
//! order the pairs were produced in, so identical inputs always yield
//! identical assignments.

mod greedy;
mod single;

pub use greedy::GreedyCapacity;
pub use single::SingleBestPair;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CompanionId, Coordinate, DriverId, PairBest, PairKey};

/// A companion placed with a driver at a meeting point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    /// Companion being carried.
    pub companion: CompanionId,
    /// Where driver and companion meet.
    pub intersection: Coordinate,
}

/// Companions assigned to each driver, in assignment order.
///
/// A companion appears in at most one driver's list and no list exceeds the
/// driver's capacity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    by_driver: BTreeMap<DriverId, Vec<Pickup>>,
}

impl Assignment {
    /// An assignment with no drivers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_driver: BTreeMap::new(),
        }
    }

    /// Ensure `driver` has an entry, possibly empty.
    pub fn add_driver(&mut self, driver: DriverId) {
        self.by_driver.entry(driver).or_default();
    }

    /// Append a pickup to `driver`'s list.
    pub fn push(&mut self, driver: DriverId, pickup: Pickup) {
        self.by_driver.entry(driver).or_default().push(pickup);
    }

    /// Pickups of `driver`, if the driver has an entry.
    #[must_use]
    pub fn pickups(&self, driver: &DriverId) -> Option<&[Pickup]> {
        self.by_driver.get(driver).map(Vec::as_slice)
    }

    /// Driver carrying `companion`, if any.
    #[must_use]
    pub fn driver_of(&self, companion: &CompanionId) -> Option<&DriverId> {
        self.by_driver
            .iter()
            .find(|(_, pickups)| pickups.iter().any(|pickup| &pickup.companion == companion))
            .map(|(driver, _)| driver)
    }

    /// Iterate over drivers and their pickups in driver-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&DriverId, &[Pickup])> {
        self.by_driver
            .iter()
            .map(|(driver, pickups)| (driver, pickups.as_slice()))
    }

    /// Number of drivers with an entry.
    #[must_use]
    pub fn driver_count(&self) -> usize {
        self.by_driver.len()
    }

    /// Number of assigned companions.
    #[must_use]
    pub fn companion_count(&self) -> usize {
        self.by_driver.values().map(Vec::len).sum()
    }

    /// Whether no companion is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companion_count() == 0
    }
}

/// Seat capacity per driver.
pub type Capacities = BTreeMap<DriverId, u32>;

/// Assign companions to drivers from per-pair meeting points.
///
/// `pairs` lists at most one entry per pair, in the order the pairs were
/// evaluated; that order breaks distance ties.
pub trait AssignmentStrategy: Send + Sync {
    /// Produce the assignment.
    fn assign(&self, pairs: &[(PairKey, PairBest)], capacities: &Capacities) -> Assignment;
}

/// `pairs` sorted by road distance, stable on ties.
fn by_distance(pairs: &[(PairKey, PairBest)]) -> Vec<&(PairKey, PairBest)> {
    let mut ordered: Vec<_> = pairs.iter().collect();
    ordered.sort_by(|(_, a), (_, b)| a.distance_km.total_cmp(&b.distance_km));
    ordered
}
