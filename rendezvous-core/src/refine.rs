//! Choose one meeting point per driver/companion pair using road queries.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CandidateNode, Coordinate, RoadLeg, RouteProvider, TravelMode};

/// Slack allowed between the companion's and the driver's arrival at a
/// meeting point when no other value is configured.
pub const DEFAULT_FEASIBILITY_BUFFER: Duration = Duration::from_secs(5 * 60);

/// Arrival constraint for pickups on the way to the office.
///
/// A meeting point is feasible when the companion can reach it no later than
/// the driver's arrival plus `buffer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feasibility {
    /// Where the driver starts, normally the first point of their route.
    pub driver_origin: Coordinate,
    /// Slack added to the driver's travel time.
    pub buffer: Duration,
}

impl Feasibility {
    /// Constraint with the default five-minute buffer.
    #[must_use]
    pub const fn new(driver_origin: Coordinate) -> Self {
        Self {
            driver_origin,
            buffer: DEFAULT_FEASIBILITY_BUFFER,
        }
    }

    /// Replace the buffer.
    #[must_use]
    pub const fn with_buffer(mut self, buffer: Duration) -> Self {
        self.buffer = buffer;
        self
    }

    fn admits(&self, companion: &RoadLeg, driver: &RoadLeg) -> bool {
        companion.duration <= driver.duration.saturating_add(self.buffer)
    }
}

/// The meeting point chosen for one driver/companion pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairBest {
    /// Chosen point on the driver's route.
    pub intersection: Coordinate,
    /// Road distance from the companion to the point in kilometres.
    pub distance_km: f64,
    /// Companion travel time to the point.
    pub duration: Duration,
    /// Provider display text for `duration`.
    pub duration_text: String,
}

/// Pick the candidate with the shortest road distance from `companion`.
///
/// Each candidate costs one `road_leg` query in `mode`, plus a driving query
/// from the driver's origin when `feasibility` is given. Candidates whose
/// queries fail, or that violate the feasibility constraint, are skipped.
/// Returns `None` when nothing qualifies.
pub fn best_intersection<R>(
    provider: &R,
    companion: Coordinate,
    candidates: &[CandidateNode],
    mode: TravelMode,
    feasibility: Option<&Feasibility>,
) -> Option<PairBest>
where
    R: RouteProvider + ?Sized,
{
    let mut best: Option<PairBest> = None;
    for candidate in candidates {
        let node = candidate.coordinate;
        let leg = match provider.road_leg(companion, node, mode) {
            Ok(leg) => leg,
            Err(err) => {
                log::debug!("skipping candidate {node}: companion leg failed: {err}");
                continue;
            }
        };
        if let Some(constraint) = feasibility {
            match provider.road_leg(constraint.driver_origin, node, TravelMode::Driving) {
                Ok(driver_leg) if constraint.admits(&leg, &driver_leg) => {}
                Ok(driver_leg) => {
                    log::debug!(
                        "skipping candidate {node}: companion needs {:?}, driver arrives in {:?}",
                        leg.duration,
                        driver_leg.duration
                    );
                    continue;
                }
                Err(err) => {
                    log::debug!("skipping candidate {node}: driver leg failed: {err}");
                    continue;
                }
            }
        }
        let improves = best
            .as_ref()
            .is_none_or(|current| leg.distance_km < current.distance_km);
        if improves {
            best = Some(PairBest {
                intersection: node,
                distance_km: leg.distance_km,
                duration: leg.duration,
                duration_text: leg.duration_text,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedProvider;
    use crate::{ProviderError, select_candidates};
    use rstest::{fixture, rstest};

    const COMPANION: Coordinate = Coordinate::new(0.0, 0.0);
    const NEAR: Coordinate = Coordinate::new(0.0, 0.01);
    const FAR: Coordinate = Coordinate::new(0.0, 0.02);
    const DRIVER_HOME: Coordinate = Coordinate::new(0.0, 0.05);

    fn leg(km: f64, minutes: u64) -> RoadLeg {
        RoadLeg::new(km, Duration::from_secs(minutes * 60), format!("{minutes} mins"))
    }

    fn candidates() -> Vec<CandidateNode> {
        select_candidates(&[NEAR, FAR], COMPANION, 5)
    }

    #[fixture]
    fn provider() -> ScriptedProvider {
        ScriptedProvider::new()
            .with_leg(COMPANION, NEAR, TravelMode::Walking, leg(2.0, 20))
            .with_leg(COMPANION, FAR, TravelMode::Walking, leg(1.5, 15))
    }

    #[rstest]
    fn prefers_shortest_road_distance(provider: ScriptedProvider) {
        let best = best_intersection(&provider, COMPANION, &candidates(), TravelMode::Walking, None)
            .expect("a candidate qualifies");
        assert_eq!(best.intersection, FAR);
        assert_eq!(best.distance_km, 1.5);
        assert_eq!(best.duration_text, "15 mins");
    }

    #[rstest]
    fn failed_queries_make_candidates_unusable() {
        let provider = ScriptedProvider::new()
            .with_leg(COMPANION, NEAR, TravelMode::Walking, leg(2.0, 20))
            .with_leg_error(
                COMPANION,
                FAR,
                TravelMode::Walking,
                ProviderError::Timeout {
                    url: "test".into(),
                    timeout_secs: 10,
                },
            );
        let best = best_intersection(&provider, COMPANION, &candidates(), TravelMode::Walking, None)
            .expect("the near candidate still qualifies");
        assert_eq!(best.intersection, NEAR);
    }

    #[rstest]
    fn returns_none_without_usable_candidates() {
        let provider = ScriptedProvider::new();
        assert!(
            best_intersection(&provider, COMPANION, &candidates(), TravelMode::Walking, None)
                .is_none()
        );
        assert!(best_intersection(&provider, COMPANION, &[], TravelMode::Walking, None).is_none());
    }

    #[rstest]
    fn equal_distances_keep_the_first_candidate() {
        let provider = ScriptedProvider::new()
            .with_leg(COMPANION, NEAR, TravelMode::Walking, leg(1.0, 10))
            .with_leg(COMPANION, FAR, TravelMode::Walking, leg(1.0, 12));
        let best = best_intersection(&provider, COMPANION, &candidates(), TravelMode::Walking, None)
            .expect("a candidate qualifies");
        assert_eq!(best.intersection, NEAR);
    }

    #[rstest]
    #[case(Duration::from_secs(5 * 60), Some(NEAR))]
    #[case(Duration::from_secs(15 * 60), Some(FAR))]
    #[case(Duration::ZERO, None)]
    fn feasibility_buffer_filters_late_companions(
        #[case] buffer: Duration,
        #[case] expected: Option<Coordinate>,
    ) {
        let provider = ScriptedProvider::new()
            .with_leg(COMPANION, NEAR, TravelMode::Driving, leg(2.0, 8))
            .with_leg(COMPANION, FAR, TravelMode::Driving, leg(1.5, 14))
            .with_leg(DRIVER_HOME, NEAR, TravelMode::Driving, leg(4.0, 5))
            .with_leg(DRIVER_HOME, FAR, TravelMode::Driving, leg(3.0, 0));
        let constraint = Feasibility::new(DRIVER_HOME).with_buffer(buffer);
        let best = best_intersection(
            &provider,
            COMPANION,
            &candidates(),
            TravelMode::Driving,
            Some(&constraint),
        );
        assert_eq!(best.map(|found| found.intersection), expected);
    }

    #[rstest]
    fn missing_driver_leg_rejects_candidate() {
        let provider = ScriptedProvider::new()
            .with_leg(COMPANION, NEAR, TravelMode::Driving, leg(2.0, 1));
        let constraint = Feasibility::new(DRIVER_HOME);
        let best = best_intersection(
            &provider,
            COMPANION,
            &candidates(),
            TravelMode::Driving,
            Some(&constraint),
        );
        assert!(best.is_none());
    }
}
