//! Orchestrate one matching run from addresses to assignments.
//!
//! The engine geocodes every participant, fetches one route per driver, runs
//! candidate selection and refinement for every driver/companion pair and
//! hands the results to the assignment strategy for the trip direction.
//! Provider failures for a single participant become exclusions; only an
//! invalid request, an office that cannot be geocoded or a worker pool that
//! cannot start abort the run.

mod config;
mod error;
mod outcome;

pub use config::EngineConfig;
pub use error::MatchError;
pub use outcome::{Exclusion, Itinerary, MatchOutcome, MatchStats, Role};

use rayon::prelude::*;

use crate::{
    AssignmentStrategy, Capacities, Companion, CompanionId, Coordinate, Direction, Driver,
    DriverId, Feasibility, Geocoder, GreedyCapacity, Location, MatchRequest, PairBest, PairKey,
    ProviderError, RouteProvider, SingleBestPair, best_intersection, select_candidates,
};

/// A geocoded driver waiting for its route.
#[derive(Debug, Clone)]
struct DriverHome {
    id: DriverId,
    capacity_seats: u32,
    home: Coordinate,
}

/// Per-driver result of route fetching and refinement.
struct DriverPlan {
    driver: Result<Driver, ProviderError>,
    pairs: Vec<(PairKey, PairBest)>,
    pairs_considered: usize,
}

/// Match companions to drivers using a geocoder and a routing provider.
///
/// # Examples
///
/// ```
/// use rendezvous_core::test_support::ScriptedProvider;
/// use rendezvous_core::{
///     Coordinate, Direction, MatchRequest, MatchingEngine, Route, TravelMode,
/// };
/// use rendezvous_core::{CompanionRequest, DriverRequest, RoadLeg};
/// use std::time::Duration;
///
/// let office = Coordinate::new(0.0, 0.0);
/// let home = Coordinate::new(0.0, 0.1);
/// let stop = Coordinate::new(0.0, 0.05);
/// let companion = Coordinate::new(0.001, 0.05);
/// let provider = ScriptedProvider::new()
///     .with_geocode("hq", office)
///     .with_geocode("home", home)
///     .with_geocode("flat", companion)
///     .with_route(office, home, Route::new(vec![office, stop, home], 11.0))
///     .with_leg(companion, stop, TravelMode::Walking, RoadLeg::new(0.2, Duration::from_secs(180), "3 mins"));
/// let request = MatchRequest {
///     direction: Direction::FromOffice,
///     office: "hq".into(),
///     drivers: vec![DriverRequest { name: "asha".into(), address: "home".into(), capacity: 1 }],
///     companions: vec![CompanionRequest { name: "ravi".into(), address: "flat".into() }],
/// };
///
/// let outcome = MatchingEngine::new(&provider, &provider).run(&request)?;
/// assert_eq!(outcome.assignment.driver_of(&"ravi".into()), Some(&"asha".into()));
/// # Ok::<(), rendezvous_core::MatchError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MatchingEngine<G, R> {
    geocoder: G,
    router: R,
    config: EngineConfig,
}

impl<G, R> MatchingEngine<G, R>
where
    G: Geocoder,
    R: RouteProvider,
{
    /// Engine with the default configuration.
    pub fn new(geocoder: G, router: R) -> Self {
        Self::with_config(geocoder, router, EngineConfig::default())
    }

    /// Engine with an explicit configuration.
    pub const fn with_config(geocoder: G, router: R, config: EngineConfig) -> Self {
        Self {
            geocoder,
            router,
            config,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one matching invocation.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidRequest`] when validation fails and
    /// [`MatchError::WorkerPool`] when worker threads cannot be started.
    /// An office that cannot be geocoded is recorded as an exclusion and
    /// leaves the assignment empty.
    pub fn run(&self, request: &MatchRequest) -> Result<MatchOutcome, MatchError> {
        request.validate()?;
        let mut outcome = MatchOutcome::new(request.direction);
        match self.geocoder.geocode(&request.office) {
            Ok(location) => outcome.office = Some(location),
            Err(err) => {
                log::warn!("office `{}` could not be geocoded: {err}", request.office);
                outcome
                    .exclusions
                    .push(Exclusion::office(&request.office, &err));
            }
        }

        let mut companions = Vec::with_capacity(request.companions.len());
        for entry in &request.companions {
            let id: CompanionId = entry.name.as_str().into();
            match self.geocoder.geocode(&entry.address) {
                Ok(location) => {
                    outcome.companions.insert(id.clone(), location);
                    companions.push(Companion::new(id, location));
                }
                Err(err) => {
                    log::warn!("excluding companion {id}: {err}");
                    outcome.exclusions.push(Exclusion::companion(&id, &err));
                }
            }
        }

        let mut homes = Vec::with_capacity(request.drivers.len());
        for entry in &request.drivers {
            let id: DriverId = entry.name.as_str().into();
            match self.geocoder.geocode(&entry.address) {
                Ok(home) => {
                    outcome.drivers.insert(id.clone(), home);
                    homes.push(DriverHome {
                        id,
                        capacity_seats: entry.capacity,
                        home,
                    });
                }
                Err(err) => {
                    log::warn!("excluding driver {id}: {err}");
                    outcome.exclusions.push(Exclusion::driver(&id, &err));
                }
            }
        }

        let Some(office) = outcome.office else {
            log::info!("no office location; no routes can be built");
            return Ok(outcome);
        };
        if companions.is_empty() || homes.is_empty() {
            log::info!(
                "nothing to match: {} companions and {} drivers remain",
                companions.len(),
                homes.len()
            );
            return Ok(outcome);
        }

        let plans = self.plan_drivers(request.direction, office, &homes, &companions)?;

        let mut capacities = Capacities::new();
        let mut pairs = Vec::new();
        for (home, plan) in homes.iter().zip(plans) {
            outcome.stats.pairs_considered += plan.pairs_considered;
            match plan.driver {
                Ok(driver) => {
                    capacities.insert(driver.id.clone(), driver.capacity_seats);
                    outcome.routes.insert(driver.id, driver.route);
                    pairs.extend(plan.pairs);
                }
                Err(err) => {
                    log::warn!("excluding driver {}: route unavailable: {err}", home.id);
                    outcome.exclusions.push(Exclusion::driver(&home.id, &err));
                }
            }
        }
        outcome.stats.pairs_with_intersection = pairs.len();

        let strategy: &dyn AssignmentStrategy = match request.direction {
            Direction::ToOffice => &SingleBestPair,
            Direction::FromOffice => &GreedyCapacity,
        };
        outcome.assignment = strategy.assign(&pairs, &capacities);

        if self.config.estimate_itineraries {
            self.estimate_itineraries(&mut outcome, office, &homes);
        }

        log::info!(
            "matched {} of {} companions across {} drivers",
            outcome.assignment.companion_count(),
            companions.len(),
            outcome.routes.len()
        );
        Ok(outcome)
    }

    /// Fetch routes and refine pairs for every driver, preserving input order.
    fn plan_drivers(
        &self,
        direction: Direction,
        office: Coordinate,
        homes: &[DriverHome],
        companions: &[Companion],
    ) -> Result<Vec<DriverPlan>, MatchError> {
        if self.config.workers <= 1 {
            return Ok(homes
                .iter()
                .map(|driver| self.plan_driver(direction, office, driver, companions))
                .collect());
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()
            .map_err(|err| MatchError::WorkerPool {
                message: err.to_string(),
            })?;
        Ok(pool.install(|| {
            homes
                .par_iter()
                .map(|driver| self.plan_driver(direction, office, driver, companions))
                .collect()
        }))
    }

    fn plan_driver(
        &self,
        direction: Direction,
        office: Coordinate,
        home: &DriverHome,
        companions: &[Companion],
    ) -> DriverPlan {
        let (origin, destination) = trip_endpoints(direction, office, home.home);
        let driver = match self.router.route(&origin, &destination) {
            Ok(route) => Driver::new(home.id.clone(), home.capacity_seats, route),
            Err(err) => {
                return DriverPlan {
                    driver: Err(err),
                    pairs: Vec::new(),
                    pairs_considered: 0,
                };
            }
        };
        let feasibility = match direction {
            Direction::ToOffice => driver.route.origin().map(|driver_origin| {
                Feasibility::new(driver_origin).with_buffer(self.config.feasibility_buffer)
            }),
            Direction::FromOffice => None,
        };
        let mode = direction.companion_mode();
        let pairs: Vec<_> = companions
            .iter()
            .filter_map(|companion| {
                let candidates = select_candidates(
                    &driver.route.points,
                    companion.location,
                    self.config.candidate_count,
                );
                let best = best_intersection(
                    &self.router,
                    companion.location,
                    &candidates,
                    mode,
                    feasibility.as_ref(),
                );
                if best.is_none() {
                    log::debug!(
                        "no meeting point for driver {} and companion {}",
                        driver.id,
                        companion.id
                    );
                }
                best.map(|found| (PairKey::new(driver.id.clone(), companion.id.clone()), found))
            })
            .collect();
        DriverPlan {
            driver: Ok(driver),
            pairs,
            pairs_considered: companions.len(),
        }
    }

    fn estimate_itineraries(
        &self,
        outcome: &mut MatchOutcome,
        office: Coordinate,
        homes: &[DriverHome],
    ) {
        let direction = outcome.direction;
        for driver in homes {
            let Some(pickups) = outcome.assignment.pickups(&driver.id) else {
                continue;
            };
            if pickups.is_empty() {
                continue;
            }
            let (origin, destination) = trip_endpoints(direction, office, driver.home);
            let waypoints: Vec<Coordinate> =
                pickups.iter().map(|pickup| pickup.intersection).collect();
            match self.router.leg_durations(&origin, &destination, &waypoints) {
                Ok(legs) => {
                    let itinerary = Itinerary {
                        stops: pickups.iter().map(|pickup| pickup.companion.clone()).collect(),
                        legs,
                    };
                    outcome.itineraries.insert(driver.id.clone(), itinerary);
                }
                Err(err) => {
                    log::warn!("no itinerary for driver {}: {err}", driver.id);
                }
            }
        }
    }
}

/// Start and end of a driver's trip for the given direction.
fn trip_endpoints(
    direction: Direction,
    office: Coordinate,
    home: Coordinate,
) -> (Location, Location) {
    match direction {
        Direction::ToOffice => (home.into(), office.into()),
        Direction::FromOffice => (office.into(), home.into()),
    }
}
