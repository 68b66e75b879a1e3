use std::sync::Arc;
use std::time::Duration;

use super::{Location, ProviderError, RoadLeg, TravelMode};
use crate::{Coordinate, Route};

/// Resolve free-form addresses to coordinates.
///
/// # Examples
///
/// ```
/// use rendezvous_core::{Coordinate, Geocoder, ProviderError};
///
/// struct Fixed;
///
/// impl Geocoder for Fixed {
///     fn geocode(&self, address: &str) -> Result<Coordinate, ProviderError> {
///         match address {
///             "office" => Ok(Coordinate::new(12.93, 77.62)),
///             _ => Err(ProviderError::AddressNotFound { address: address.to_owned() }),
///         }
///     }
/// }
///
/// assert!(Fixed.geocode("office").is_ok());
/// assert!(Fixed.geocode("moon").is_err());
/// ```
pub trait Geocoder: Send + Sync {
    /// Return the coordinate of `address`.
    ///
    /// # Errors
    ///
    /// [`ProviderError::AddressNotFound`] when nothing matches,
    /// [`ProviderError::Geocoding`] for provider-side failures and the
    /// network variants when the provider is unreachable.
    fn geocode(&self, address: &str) -> Result<Coordinate, ProviderError>;
}

/// Fetch routes and point-to-point legs from a road network.
pub trait RouteProvider: Send + Sync {
    /// Driving route from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// [`ProviderError::RouteUnavailable`] when the provider has no route,
    /// or a network variant when it cannot be reached.
    fn route(&self, origin: &Location, destination: &Location) -> Result<Route, ProviderError>;

    /// Road distance and travel time between two points.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RouteProvider::route`].
    fn road_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<RoadLeg, ProviderError>;

    /// Driving time of every leg of the trip `origin`, `waypoints`...,
    /// `destination`, in travel order.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RouteProvider::route`].
    fn leg_durations(
        &self,
        origin: &Location,
        destination: &Location,
        waypoints: &[Coordinate],
    ) -> Result<Vec<Duration>, ProviderError>;
}

macro_rules! forward_provider_impls {
    ($($wrapper:ty),+ $(,)?) => {
        $(
            impl<T: Geocoder + ?Sized> Geocoder for $wrapper {
                fn geocode(&self, address: &str) -> Result<Coordinate, ProviderError> {
                    (**self).geocode(address)
                }
            }

            impl<T: RouteProvider + ?Sized> RouteProvider for $wrapper {
                fn route(
                    &self,
                    origin: &Location,
                    destination: &Location,
                ) -> Result<Route, ProviderError> {
                    (**self).route(origin, destination)
                }

                fn road_leg(
                    &self,
                    origin: Coordinate,
                    destination: Coordinate,
                    mode: TravelMode,
                ) -> Result<RoadLeg, ProviderError> {
                    (**self).road_leg(origin, destination, mode)
                }

                fn leg_durations(
                    &self,
                    origin: &Location,
                    destination: &Location,
                    waypoints: &[Coordinate],
                ) -> Result<Vec<Duration>, ProviderError> {
                    (**self).leg_durations(origin, destination, waypoints)
                }
            }
        )+
    };
}

forward_provider_impls!(&T, Box<T>, Arc<T>);
