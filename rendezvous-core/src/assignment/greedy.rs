use std::collections::HashSet;

use super::{Assignment, AssignmentStrategy, Capacities, Pickup, by_distance};
use crate::{PairBest, PairKey};

/// Greedy capacity-constrained matching.
///
/// Pairs are taken in ascending road distance. A pair is accepted when its
/// driver still has a free seat and its companion is still unassigned.
/// There is no backtracking, so the result is not guaranteed to minimise
/// the total distance.
///
/// Every driver in the capacity table receives an entry, possibly empty.
/// Pairs naming a driver outside the table are treated as having no seats.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyCapacity;

impl AssignmentStrategy for GreedyCapacity {
    fn assign(&self, pairs: &[(PairKey, PairBest)], capacities: &Capacities) -> Assignment {
        let mut assignment = Assignment::new();
        for driver in capacities.keys() {
            assignment.add_driver(driver.clone());
        }
        let mut assigned = HashSet::new();
        for (key, best) in by_distance(pairs) {
            if assigned.contains(&key.companion) {
                continue;
            }
            let seats = capacities.get(&key.driver).copied().unwrap_or(0);
            let taken = assignment.pickups(&key.driver).map_or(0, <[Pickup]>::len);
            if usize::try_from(seats).is_ok_and(|seats| taken < seats) {
                assigned.insert(key.companion.clone());
                assignment.push(
                    key.driver.clone(),
                    Pickup {
                        companion: key.companion.clone(),
                        intersection: best.intersection,
                    },
                );
            }
        }
        assignment
    }
}
