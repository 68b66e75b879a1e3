//! Google Maps web service response types for the Geocoding and Directions
//! APIs.
//!
//! Only the fields the adapter reads are modelled; everything else in the
//! payload is ignored.

use serde::Deserialize;

/// Status reported by both services on success.
pub const STATUS_OK: &str = "OK";

/// Status reported when a query matched nothing.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Geocoding API response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Service status, e.g. `"OK"`, `"ZERO_RESULTS"`, `"REQUEST_DENIED"`.
    pub status: String,
    /// Explanation accompanying a failure status.
    pub error_message: Option<String>,
    /// Candidate matches, best first.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// One geocoding match.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    /// Location of the match.
    pub geometry: Geometry,
}

/// Geometry block of a geocoding match.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// Representative point.
    pub location: LatLng,
}

/// A point as Google spells it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Service status.
    pub status: String,
    /// Explanation accompanying a failure status.
    pub error_message: Option<String>,
    /// Alternative routes, preferred first.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

/// One route of a directions response.
#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    /// Simplified geometry of the whole route.
    pub overview_polyline: EncodedPolyline,
    /// One leg per pair of consecutive stops.
    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// Encoded polyline wrapper.
#[derive(Debug, Deserialize)]
pub struct EncodedPolyline {
    /// Encoded points.
    pub points: String,
}

/// Travel between two consecutive stops.
#[derive(Debug, Deserialize)]
pub struct Leg {
    /// Leg length; `value` is in metres.
    pub distance: TextValue,
    /// Leg travel time; `value` is in seconds.
    pub duration: TextValue,
}

/// A machine value with its display text.
#[derive(Debug, Deserialize)]
pub struct TextValue {
    /// Display text, e.g. `"7 mins"` or `"1.2 km"`.
    pub text: String,
    /// Numeric value.
    pub value: u64,
}

impl GeocodeResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}
