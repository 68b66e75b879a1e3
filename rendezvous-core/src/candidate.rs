//! Rank a driver's route points by how close they are to a companion.
//!
//! Aerial distance is a cheap proxy for road distance. Only the closest few
//! points are handed to the refiner, which pays for real road queries.

use serde::{Deserialize, Serialize};

use crate::{Coordinate, aerial_distance_km};

/// Route points kept per companion when no other count is configured.
pub const DEFAULT_CANDIDATE_COUNT: usize = 5;

/// A route point considered as a meeting place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateNode {
    /// Point on the driver's route.
    pub coordinate: Coordinate,
    /// Aerial distance to the companion in kilometres.
    pub distance_km: f64,
}

/// Keep the `k` route points closest to `companion`, nearest first.
///
/// Ties keep route order, so a point repeated in the route occupies one slot
/// per occurrence. An empty route or `k == 0` yields no candidates.
///
/// # Examples
///
/// ```
/// use rendezvous_core::{Coordinate, select_candidates};
///
/// let route = [
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.0, 0.1),
///     Coordinate::new(0.0, 0.2),
/// ];
/// let nearest = select_candidates(&route, Coordinate::new(0.01, 0.19), 2);
/// assert_eq!(nearest.len(), 2);
/// assert_eq!(nearest[0].coordinate, Coordinate::new(0.0, 0.2));
/// assert_eq!(nearest[1].coordinate, Coordinate::new(0.0, 0.1));
/// ```
#[must_use]
pub fn select_candidates(
    route: &[Coordinate],
    companion: Coordinate,
    k: usize,
) -> Vec<CandidateNode> {
    if k == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<CandidateNode> = route
        .iter()
        .copied()
        .map(|coordinate| CandidateNode {
            coordinate,
            distance_km: aerial_distance_km(companion, coordinate),
        })
        .collect();
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(k);
    ranked
}
