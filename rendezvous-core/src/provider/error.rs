use thiserror::Error;

/// Errors raised by [`crate::Geocoder`] and [`crate::RouteProvider`]
/// implementations.
///
/// The matching engine never propagates these for individual participants.
/// They are turned into exclusions or unusable candidates and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The geocoder found no match for an address.
    #[error("no coordinates found for address `{address}`")]
    AddressNotFound {
        /// Address that produced no results.
        address: String,
    },
    /// The geocoder answered with a non-success status.
    #[error("geocoding failed with status {status}: {message}")]
    Geocoding {
        /// Provider status code.
        status: String,
        /// Provider error message, possibly empty.
        message: String,
    },
    /// The router could not produce a route between the requested points.
    #[error("no route available (status {status}): {message}")]
    RouteUnavailable {
        /// Provider status code.
        status: String,
        /// Provider error message, possibly empty.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs} seconds")]
    Timeout {
        /// Endpoint URL without credentials.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// A network or HTTP-level failure occurred.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Endpoint URL without credentials.
        url: String,
        /// Underlying error text.
        message: String,
    },
    /// The provider response could not be interpreted.
    #[error("failed to parse provider response: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },
}

impl ProviderError {
    /// Whether the failure happened below the provider protocol, for example
    /// a timeout or a refused connection.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport { .. })
    }
}
