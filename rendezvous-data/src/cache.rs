//! Memoising decorator for routing providers.
//!
//! Refinement asks for the same companion-to-node leg once per driver whose
//! route passes through that node, and repeated runs ask again. Caching
//! successful legs keeps those queries off the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rendezvous_core::{Coordinate, Location, ProviderError, RoadLeg, Route, RouteProvider, TravelMode};

/// Key of a memoised road leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegKey {
    /// Start of the leg.
    pub origin: Coordinate,
    /// End of the leg.
    pub destination: Coordinate,
    /// Travel mode.
    pub mode: TravelMode,
}

/// Hit and miss counters of a [`CachedRouteProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Legs answered from the cache.
    pub hits: usize,
    /// Legs forwarded to the wrapped provider.
    pub misses: usize,
}

/// Wrap a [`RouteProvider`] and memoise successful `road_leg` answers.
///
/// Failed queries are not cached, so a transient error is retried on the
/// next request. `route` and `leg_durations` pass straight through.
///
/// # Examples
///
/// ```
/// use rendezvous_core::test_support::ScriptedProvider;
/// use rendezvous_core::{Coordinate, RouteProvider, TravelMode};
/// use rendezvous_data::cache::CachedRouteProvider;
///
/// let provider = CachedRouteProvider::new(ScriptedProvider::new().with_aerial_legs());
/// let (a, b) = (Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.1));
/// provider.road_leg(a, b, TravelMode::Walking)?;
/// provider.road_leg(a, b, TravelMode::Walking)?;
/// assert_eq!(provider.stats().hits, 1);
/// assert_eq!(provider.inner().road_leg_calls(), 1);
/// # Ok::<(), rendezvous_core::ProviderError>(())
/// ```
#[derive(Debug)]
pub struct CachedRouteProvider<P> {
    inner: P,
    legs: Mutex<HashMap<LegKey, RoadLeg>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<P: RouteProvider> CachedRouteProvider<P> {
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            legs: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// The wrapped provider.
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Current hit and miss counts.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Number of memoised legs.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is memoised yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every memoised leg. Counters are kept.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<LegKey, RoadLeg>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.legs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: RouteProvider> RouteProvider for CachedRouteProvider<P> {
    fn route(&self, origin: &Location, destination: &Location) -> Result<Route, ProviderError> {
        self.inner.route(origin, destination)
    }

    fn road_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<RoadLeg, ProviderError> {
        let key = LegKey {
            origin,
            destination,
            mode,
        };
        if let Some(leg) = self.lock().get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(leg);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        // Query without holding the lock; concurrent misses may both fetch.
        let leg = self.inner.road_leg(origin, destination, mode)?;
        self.lock().insert(key, leg.clone());
        Ok(leg)
    }

    fn leg_durations(
        &self,
        origin: &Location,
        destination: &Location,
        waypoints: &[Coordinate],
    ) -> Result<Vec<Duration>, ProviderError> {
        self.inner.leg_durations(origin, destination, waypoints)
    }
}
