use thiserror::Error;

use crate::RequestValidationError;

/// Errors that abort a whole matching run.
///
/// Geocoding and routing failures never surface here; they are reported as
/// [`crate::Exclusion`]s on the outcome.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The request was rejected before any provider call.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestValidationError),
    /// The worker thread pool could not be started.
    #[error("failed to start worker pool: {message}")]
    WorkerPool {
        /// Thread pool error text.
        message: String,
    },
}
