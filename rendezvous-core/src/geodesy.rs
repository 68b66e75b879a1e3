//! Great-circle distance between coordinates.

use crate::Coordinate;

/// Earth radius used for aerial distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between `a` and `b` in kilometres.
///
/// The function is total and symmetric; identical points are exactly zero
/// apart.
///
/// # Examples
///
/// ```
/// use rendezvous_core::{Coordinate, aerial_distance_km};
///
/// let london = Coordinate::new(51.5074, -0.1278);
/// let paris = Coordinate::new(48.8566, 2.3522);
/// let km = aerial_distance_km(london, paris);
/// assert!((km - 343.5).abs() < 1.0);
/// assert_eq!(aerial_distance_km(london, london), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn aerial_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    // Absolute deltas keep the result bit-for-bit symmetric.
    let d_lat = (b.lat - a.lat).abs().to_radians();
    let d_lon = (b.lon - a.lon).abs().to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
