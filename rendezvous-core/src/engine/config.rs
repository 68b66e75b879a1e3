use std::time::Duration;

use crate::{DEFAULT_CANDIDATE_COUNT, DEFAULT_FEASIBILITY_BUFFER};

/// Tuning knobs for [`crate::MatchingEngine`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rendezvous_core::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_candidate_count(3)
///     .with_workers(4)
///     .with_feasibility_buffer(Duration::from_secs(600));
/// assert_eq!(config.candidate_count, 3);
/// assert!(!config.estimate_itineraries);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Route points refined per driver/companion pair.
    pub candidate_count: usize,
    /// Slack allowed when checking pickups on the way to the office.
    pub feasibility_buffer: Duration,
    /// Threads used for per-driver work. `0` and `1` both mean the calling
    /// thread only.
    pub workers: usize,
    /// Whether to query per-leg travel times for each driver's final trip.
    pub estimate_itineraries: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            candidate_count: DEFAULT_CANDIDATE_COUNT,
            feasibility_buffer: DEFAULT_FEASIBILITY_BUFFER,
            workers: 1,
            estimate_itineraries: false,
        }
    }
}

impl EngineConfig {
    /// Set the number of refined route points per pair.
    #[must_use]
    pub const fn with_candidate_count(mut self, candidate_count: usize) -> Self {
        self.candidate_count = candidate_count;
        self
    }

    /// Set the feasibility buffer.
    #[must_use]
    pub const fn with_feasibility_buffer(mut self, buffer: Duration) -> Self {
        self.feasibility_buffer = buffer;
        self
    }

    /// Set the worker thread count.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Enable or disable itinerary estimation.
    #[must_use]
    pub const fn with_itineraries(mut self, enabled: bool) -> Self {
        self.estimate_itineraries = enabled;
        self
    }
}
