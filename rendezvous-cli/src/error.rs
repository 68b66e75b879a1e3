//! Error types emitted by the Rendezvous CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use rendezvous_core::MatchError;
use rendezvous_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Rendezvous CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name as spelled on the command line.
        field: &'static str,
        /// Environment variable that can supply the option.
        env: &'static str,
    },
    /// A count or duration option was set to zero.
    #[error("{field} must be greater than zero")]
    ZeroValue {
        /// Offending option name.
        field: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Option that named the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option that named the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option that named the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the match request file failed.
    #[error("failed to open match request at {path:?}: {source}")]
    OpenRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Match request JSON could not be decoded.
    #[error("failed to parse match request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Decoder failure, with line and column.
        #[source]
        source: serde_json::Error,
    },
    /// Constructing the maps client failed.
    #[error("failed to build maps client for {base_url:?}: {source}")]
    BuildProvider {
        /// Maps service base URL the client was built for.
        base_url: String,
        /// Client construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The engine rejected the request or could not run.
    #[error("matching failed: {0}")]
    Match(#[source] MatchError),
    /// Serialising the match outcome failed.
    #[error("failed to serialise match outcome: {0}")]
    SerialiseOutcome(#[source] serde_json::Error),
    /// Writing the match output failed.
    #[error("failed to write match output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
