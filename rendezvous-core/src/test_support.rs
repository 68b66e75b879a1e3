//! Test-only, in-memory geocoder and routing provider used by unit and
//! behaviour tests.
//!
//! Compiled for this crate's own unit tests and, for other crates, behind the
//! `test-support` feature.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::{
    Coordinate, Geocoder, Location, ProviderError, RoadLeg, Route, RouteProvider, TravelMode,
    aerial_distance_km,
};

type LegKey = (Coordinate, Coordinate, TravelMode);

/// Scripted provider answering from lookup tables.
///
/// Unscripted geocodes fail with [`ProviderError::AddressNotFound`]; other
/// unscripted queries fail with [`ProviderError::RouteUnavailable`] and
/// status `NOT_SCRIPTED`, unless [`ScriptedProvider::with_aerial_legs`] is
/// enabled for road legs.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    geocodes: HashMap<String, Result<Coordinate, ProviderError>>,
    routes: HashMap<(Location, Location), Result<Route, ProviderError>>,
    legs: HashMap<LegKey, Result<RoadLeg, ProviderError>>,
    leg_durations: HashMap<(Location, Location), Result<Vec<Duration>, ProviderError>>,
    aerial_legs: bool,
    road_leg_calls: AtomicUsize,
    route_calls: AtomicUsize,
}

impl ScriptedProvider {
    /// Provider with empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `address` to `coordinate`.
    #[must_use]
    pub fn with_geocode(mut self, address: &str, coordinate: Coordinate) -> Self {
        self.geocodes.insert(address.to_owned(), Ok(coordinate));
        self
    }

    /// Fail geocoding of `address` with `error`.
    #[must_use]
    pub fn with_geocode_error(mut self, address: &str, error: ProviderError) -> Self {
        self.geocodes.insert(address.to_owned(), Err(error));
        self
    }

    /// Answer route queries between `origin` and `destination` with `route`.
    #[must_use]
    pub fn with_route(
        mut self,
        origin: impl Into<Location>,
        destination: impl Into<Location>,
        route: Route,
    ) -> Self {
        self.routes
            .insert((origin.into(), destination.into()), Ok(route));
        self
    }

    /// Fail route queries between `origin` and `destination` with `error`.
    #[must_use]
    pub fn with_route_error(
        mut self,
        origin: impl Into<Location>,
        destination: impl Into<Location>,
        error: ProviderError,
    ) -> Self {
        self.routes
            .insert((origin.into(), destination.into()), Err(error));
        self
    }

    /// Answer the road leg `origin` to `destination` in `mode` with `leg`.
    #[must_use]
    pub fn with_leg(
        mut self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        leg: RoadLeg,
    ) -> Self {
        self.legs.insert((origin, destination, mode), Ok(leg));
        self
    }

    /// Fail the road leg `origin` to `destination` in `mode` with `error`.
    #[must_use]
    pub fn with_leg_error(
        mut self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        error: ProviderError,
    ) -> Self {
        self.legs.insert((origin, destination, mode), Err(error));
        self
    }

    /// Answer leg-duration queries between `origin` and `destination`.
    #[must_use]
    pub fn with_leg_durations(
        mut self,
        origin: impl Into<Location>,
        destination: impl Into<Location>,
        legs: Vec<Duration>,
    ) -> Self {
        self.leg_durations
            .insert((origin.into(), destination.into()), Ok(legs));
        self
    }

    /// Derive unscripted road legs from aerial distance at one minute per
    /// kilometre.
    #[must_use]
    pub const fn with_aerial_legs(mut self) -> Self {
        self.aerial_legs = true;
        self
    }

    /// Number of `road_leg` queries answered so far.
    pub fn road_leg_calls(&self) -> usize {
        self.road_leg_calls.load(Ordering::Relaxed)
    }

    /// Number of `route` queries answered so far.
    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::Relaxed)
    }

    fn not_scripted(what: String) -> ProviderError {
        ProviderError::RouteUnavailable {
            status: "NOT_SCRIPTED".to_owned(),
            message: what,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "aerial legs convert kilometres to a travel time"
    )]
    fn aerial_leg(origin: Coordinate, destination: Coordinate) -> RoadLeg {
        let distance_km = aerial_distance_km(origin, destination);
        let duration = Duration::from_secs_f64(distance_km * 60.0);
        RoadLeg::new(
            distance_km,
            duration,
            format!("{} mins", duration.as_secs().div_ceil(60)),
        )
    }
}

impl Geocoder for ScriptedProvider {
    fn geocode(&self, address: &str) -> Result<Coordinate, ProviderError> {
        self.geocodes
            .get(address)
            .cloned()
            .unwrap_or_else(|| {
                Err(ProviderError::AddressNotFound {
                    address: address.to_owned(),
                })
            })
    }
}

impl RouteProvider for ScriptedProvider {
    fn route(&self, origin: &Location, destination: &Location) -> Result<Route, ProviderError> {
        self.route_calls.fetch_add(1, Ordering::Relaxed);
        self.routes
            .get(&(origin.clone(), destination.clone()))
            .cloned()
            .unwrap_or_else(|| Err(Self::not_scripted(format!("route {origin} -> {destination}"))))
    }

    fn road_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<RoadLeg, ProviderError> {
        self.road_leg_calls.fetch_add(1, Ordering::Relaxed);
        match self.legs.get(&(origin, destination, mode)) {
            Some(scripted) => scripted.clone(),
            None if self.aerial_legs => Ok(Self::aerial_leg(origin, destination)),
            None => Err(Self::not_scripted(format!(
                "{mode} leg {origin} -> {destination}"
            ))),
        }
    }

    fn leg_durations(
        &self,
        origin: &Location,
        destination: &Location,
        _waypoints: &[Coordinate],
    ) -> Result<Vec<Duration>, ProviderError> {
        self.leg_durations
            .get(&(origin.clone(), destination.clone()))
            .cloned()
            .unwrap_or_else(|| {
                Err(Self::not_scripted(format!(
                    "leg durations {origin} -> {destination}"
                )))
            })
    }
}
