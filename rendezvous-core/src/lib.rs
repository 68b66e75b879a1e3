//! Core domain for the Rendezvous pickup-point matching engine.
//!
//! Drivers offer seats along their road route; companions need a ride from
//! or to somewhere near that route. The engine ranks each driver's route
//! points by aerial distance to every companion, refines the closest few
//! with real road queries, and assigns companions to drivers under seat
//! limits.
//!
//! This crate performs no I/O. Geocoding and routing are reached through the
//! [`Geocoder`] and [`RouteProvider`] traits.

#![forbid(unsafe_code)]

pub mod assignment;
pub mod candidate;
pub mod coordinate;
pub mod engine;
pub mod geodesy;
pub mod participant;
pub mod provider;
pub mod refine;
pub mod request;
pub mod route;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use assignment::{
    Assignment, AssignmentStrategy, Capacities, GreedyCapacity, Pickup, SingleBestPair,
};
pub use candidate::{CandidateNode, DEFAULT_CANDIDATE_COUNT, select_candidates};
pub use coordinate::Coordinate;
pub use engine::{
    EngineConfig, Exclusion, Itinerary, MatchError, MatchOutcome, MatchStats, MatchingEngine, Role,
};
pub use geodesy::{EARTH_RADIUS_KM, aerial_distance_km};
pub use participant::{Companion, CompanionId, Driver, DriverId, PairKey};
pub use provider::{Geocoder, Location, ProviderError, RoadLeg, RouteProvider, TravelMode};
pub use refine::{DEFAULT_FEASIBILITY_BUFFER, Feasibility, PairBest, best_intersection};
pub use request::{
    CompanionRequest, Direction, DriverRequest, MatchRequest, RequestValidationError,
};
pub use route::Route;
