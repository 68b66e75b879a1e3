//! Facade crate for the Rendezvous pickup-point matching engine.
//!
//! This crate re-exports the core domain types and, behind the `google`
//! feature, the Google Maps provider and its supporting adapters.

#![forbid(unsafe_code)]

pub use rendezvous_core::{
    Assignment, AssignmentStrategy, CompanionId, CompanionRequest, Coordinate, Direction, DriverId,
    DriverRequest, EngineConfig, Exclusion, Geocoder, GreedyCapacity, Itinerary, Location,
    MatchError, MatchOutcome, MatchRequest, MatchStats, MatchingEngine, Pickup, ProviderError,
    RequestValidationError, RoadLeg, Role, Route, RouteProvider, SingleBestPair, TravelMode,
    aerial_distance_km,
};

#[cfg(feature = "google")]
pub use rendezvous_data::{
    CacheStats, CachedRouteProvider, GoogleMapsClient, GoogleMapsConfig, ProviderBuildError,
};
