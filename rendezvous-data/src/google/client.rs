//! Blocking Google Maps client built on an async HTTP stack.

use std::future::Future;
use std::iter;
use std::time::Duration;

use reqwest::Client;
use rendezvous_core::{
    Coordinate, Geocoder, Location, ProviderError, RoadLeg, Route, RouteProvider, TravelMode,
};
use serde::de::DeserializeOwned;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::config::GoogleMapsConfig;
use super::response::{
    DirectionsResponse, DirectionsRoute, GeocodeResponse, STATUS_ZERO_RESULTS,
};
use crate::polyline::{GOOGLE_PRECISION, decode_polyline};

const GEOCODE_SERVICE: &str = "geocode";
const DIRECTIONS_SERVICE: &str = "directions";

/// Error type for [`GoogleMapsClient`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Geocoder and routing provider backed by the Google Maps web services.
///
/// The [`Geocoder`] and [`RouteProvider`] traits are synchronous, so every
/// call blocks on an async request. The client owns a small multi-threaded
/// Tokio runtime, which lets several engine worker threads block on it at
/// once.
///
/// # Runtime behaviour
///
/// When called from within an existing multi-threaded Tokio runtime
/// (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), the caller's runtime is used through
/// [`tokio::task::block_in_place`]. Otherwise, including from a
/// `current_thread` runtime, the owned runtime drives the request.
///
/// Request URLs carry the API key, so error values and log lines only ever
/// mention the endpoint without its query string.
pub struct GoogleMapsClient {
    client: Client,
    config: GoogleMapsConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for GoogleMapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsClient")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl GoogleMapsClient {
    /// Create a client for `api_key` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(GoogleMapsConfig::new(api_key))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: GoogleMapsConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("rendezvous-http")
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GoogleMapsConfig {
        &self.config
    }

    /// Build a request URL including the API key.
    fn request_url(&self, service: &str, params: &[(&str, String)]) -> Result<Url, ProviderError> {
        let endpoint = self.config.endpoint(service);
        let query = params
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .chain(iter::once(("key", self.config.api_key.as_str())));
        Url::parse_with_params(&endpoint, query).map_err(|err| ProviderError::Transport {
            url: endpoint,
            message: err.to_string(),
        })
    }

    /// Query `service` and deserialise its JSON body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        service: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let endpoint = self.config.endpoint(service);
        let url = self.request_url(service, params)?;
        log::debug!("querying {endpoint}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &endpoint))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &endpoint))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &endpoint))?;

        serde_json::from_slice(&body).map_err(|err| ProviderError::Parse {
            message: err.to_string(),
        })
    }

    /// Convert a reqwest error to a `ProviderError`.
    fn convert_reqwest_error(&self, error: reqwest::Error, endpoint: &str) -> ProviderError {
        if error.is_timeout() {
            return ProviderError::Timeout {
                url: endpoint.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return ProviderError::Transport {
                url: endpoint.to_owned(),
                message: format!("HTTP status {status}"),
            };
        }
        ProviderError::Transport {
            url: endpoint.to_owned(),
            message: error.without_url().to_string(),
        }
    }

    async fn directions(
        &self,
        origin: &Location,
        destination: &Location,
        mode: TravelMode,
        waypoints: &[Coordinate],
    ) -> Result<DirectionsRoute, ProviderError> {
        let mut params = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", mode.as_str().to_owned()),
        ];
        if !waypoints.is_empty() {
            params.push(("waypoints", join_waypoints(waypoints)));
        }
        let response: DirectionsResponse = self.fetch(DIRECTIONS_SERVICE, &params).await?;
        first_route(response)
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

fn join_waypoints(waypoints: &[Coordinate]) -> String {
    waypoints
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}

/// Interpret a geocoding response for `address`.
pub(crate) fn coordinate_from(
    address: &str,
    response: GeocodeResponse,
) -> Result<Coordinate, ProviderError> {
    if response.is_ok()
        && let Some(result) = response.results.first()
    {
        let location = result.geometry.location;
        return Ok(Coordinate::new(location.lat, location.lng));
    }
    if response.is_ok() || response.status == STATUS_ZERO_RESULTS {
        return Err(ProviderError::AddressNotFound {
            address: address.to_owned(),
        });
    }
    Err(ProviderError::Geocoding {
        status: response.status,
        message: response.error_message.unwrap_or_default(),
    })
}

/// Take the preferred route of a directions response.
pub(crate) fn first_route(response: DirectionsResponse) -> Result<DirectionsRoute, ProviderError> {
    let unavailable = |status: String, message: Option<String>| ProviderError::RouteUnavailable {
        status,
        message: message.unwrap_or_default(),
    };
    if !response.is_ok() {
        return Err(unavailable(response.status, response.error_message));
    }
    response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| unavailable(response.status, Some("no routes returned".to_owned())))
}

fn total_metres(route: &DirectionsRoute) -> u64 {
    route.legs.iter().map(|leg| leg.distance.value).sum()
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "metre counts are converted to fractional kilometres"
)]
fn metres_to_km(metres: u64) -> f64 {
    metres as f64 / 1000.0
}

/// Decode the geometry and length of a directions route.
pub(crate) fn route_from(route: &DirectionsRoute) -> Result<Route, ProviderError> {
    let points = decode_polyline(&route.overview_polyline.points, GOOGLE_PRECISION).map_err(
        |err| ProviderError::Parse {
            message: format!("invalid overview polyline: {err}"),
        },
    )?;
    if points.is_empty() {
        return Err(ProviderError::Parse {
            message: "route has an empty overview polyline".to_owned(),
        });
    }
    Ok(Route::new(points, metres_to_km(total_metres(route))))
}

/// Distance and travel time of a directions route.
pub(crate) fn road_leg_from(route: &DirectionsRoute) -> RoadLeg {
    let seconds: u64 = route.legs.iter().map(|leg| leg.duration.value).sum();
    let duration = Duration::from_secs(seconds);
    let text = match route.legs.as_slice() {
        [only] => only.duration.text.clone(),
        _ => format!("{} mins", seconds.div_ceil(60)),
    };
    RoadLeg::new(metres_to_km(total_metres(route)), duration, text)
}

/// Travel time of each leg of a directions route.
pub(crate) fn leg_durations_from(route: &DirectionsRoute) -> Vec<Duration> {
    route
        .legs
        .iter()
        .map(|leg| Duration::from_secs(leg.duration.value))
        .collect()
}

impl Geocoder for GoogleMapsClient {
    fn geocode(&self, address: &str) -> Result<Coordinate, ProviderError> {
        let params = [("address", address.to_owned())];
        let response: GeocodeResponse = self.block_on(self.fetch(GEOCODE_SERVICE, &params))?;
        coordinate_from(address, response)
    }
}

impl RouteProvider for GoogleMapsClient {
    fn route(&self, origin: &Location, destination: &Location) -> Result<Route, ProviderError> {
        let route =
            self.block_on(self.directions(origin, destination, TravelMode::Driving, &[]))?;
        route_from(&route)
    }

    fn road_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<RoadLeg, ProviderError> {
        if origin == destination {
            return Ok(RoadLeg::zero());
        }
        let route = self.block_on(self.directions(
            &origin.into(),
            &destination.into(),
            mode,
            &[],
        ))?;
        Ok(road_leg_from(&route))
    }

    fn leg_durations(
        &self,
        origin: &Location,
        destination: &Location,
        waypoints: &[Coordinate],
    ) -> Result<Vec<Duration>, ProviderError> {
        let route = self.block_on(self.directions(
            origin,
            destination,
            TravelMode::Driving,
            waypoints,
        ))?;
        Ok(leg_durations_from(&route))
    }
}
