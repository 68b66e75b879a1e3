//! Driver routes as returned by a routing provider.

use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// An ordered polyline from origin to destination together with its road
/// length.
///
/// Providers always return at least one point. An empty route is still
/// representable so a driver whose route could not be fetched flows through
/// candidate selection as "no candidates".
///
/// # Examples
///
/// ```
/// use rendezvous_core::{Coordinate, Route};
///
/// let route = Route::new(
///     vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01)],
///     1.1,
/// );
/// assert_eq!(route.origin(), Some(Coordinate::new(0.0, 0.0)));
/// assert!(!route.is_empty());
/// assert!(Route::empty().origin().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    /// Polyline points in travel order.
    pub points: Vec<Coordinate>,
    /// Road length of the whole route in kilometres.
    pub length_km: f64,
}

impl Route {
    /// Construct a route from its points and length.
    #[must_use]
    pub const fn new(points: Vec<Coordinate>, length_km: f64) -> Self {
        Self { points, length_km }
    }

    /// A route with no points and zero length.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Whether the route has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point of the route.
    #[must_use]
    pub fn origin(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    /// Last point of the route.
    #[must_use]
    pub fn destination(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }
}
