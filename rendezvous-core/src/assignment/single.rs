use super::{Assignment, AssignmentStrategy, Capacities, Pickup};
use crate::{PairBest, PairKey};

/// Keep only the globally closest pair.
///
/// Used on the way to the office, where a single companion is matched to the
/// driver offering the shortest road distance. The first of several equally
/// close pairs wins. Capacities are not consulted: every driver reaching
/// this stage has at least one seat.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleBestPair;

impl AssignmentStrategy for SingleBestPair {
    fn assign(&self, pairs: &[(PairKey, PairBest)], _capacities: &Capacities) -> Assignment {
        let mut assignment = Assignment::new();
        let winner = pairs.iter().fold(None::<&(PairKey, PairBest)>, |best, pair| {
            match best {
                Some((_, current)) if pair.1.distance_km >= current.distance_km => best,
                _ => Some(pair),
            }
        });
        if let Some((key, best)) = winner {
            assignment.push(
                key.driver.clone(),
                Pickup {
                    companion: key.companion.clone(),
                    intersection: best.intersection,
                },
            );
        }
        assignment
    }
}
