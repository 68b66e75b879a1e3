//! Google Maps adapter for the engine's geocoding and routing contracts.
//!
//! [`GoogleMapsClient`] implements both [`rendezvous_core::Geocoder`] and
//! [`rendezvous_core::RouteProvider`] against the Geocoding and Directions
//! web services:
//!
//! - `GET {base}/geocode/json?address=..&key=..`
//! - `GET {base}/directions/json?origin=..&destination=..&mode=..&waypoints=..&key=..`
//!
//! Distances and durations are read from the numeric `value` fields of each
//! leg. Route geometry is the decoded `overview_polyline`.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use rendezvous_core::{Geocoder, Location, RouteProvider};
//! use rendezvous_data::google::{GoogleMapsClient, GoogleMapsConfig};
//!
//! let config = GoogleMapsConfig::new("my-api-key").with_timeout(Duration::from_secs(5));
//! let client = GoogleMapsClient::with_config(config)?;
//!
//! let office = client.geocode("Koramangala, Bengaluru")?;
//! let route = client.route(&Location::from("Indiranagar, Bengaluru"), &office.into())?;
//! println!("{} km over {} points", route.length_km, route.points.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod config;
mod response;

pub use client::{GoogleMapsClient, ProviderBuildError};
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, GoogleMapsConfig};
