//! Provider adapters for the Rendezvous matching engine.
//!
//! - [`google`]: geocoding and routing against the Google Maps web services.
//! - [`polyline`]: encoded polyline conversion for routing responses.
//! - [`cache`]: a memoising [`rendezvous_core::RouteProvider`] decorator.

#![forbid(unsafe_code)]

pub mod cache;
pub mod google;
pub mod polyline;

pub use cache::{CacheStats, CachedRouteProvider};
pub use google::{GoogleMapsClient, GoogleMapsConfig, ProviderBuildError};
pub use self::polyline::{PolylineError, decode_polyline, encode_polyline};
