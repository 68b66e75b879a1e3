//! Match command implementation for the Rendezvous CLI.

use std::io::{BufReader, Write};
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rendezvous_core::{
    EngineConfig, Geocoder, MatchOutcome, MatchRequest, MatchingEngine, RouteProvider,
};
use rendezvous_data::{CachedRouteProvider, GoogleMapsClient, GoogleMapsConfig};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_MATCH_API_KEY, ARG_MATCH_BASE_URL, ARG_MATCH_BUFFER_MINUTES, ARG_MATCH_CANDIDATES,
    ARG_MATCH_ITINERARIES, ARG_MATCH_REQUEST, ARG_MATCH_TIMEOUT_SECS, ARG_MATCH_WORKERS,
    CliError, ENV_MATCH_API_KEY, ENV_MATCH_REQUEST,
};

/// CLI arguments for the `match` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "match",
    long_about = "Geocode every participant of a JSON match request, find the \
                 best pickup point on each driver's route for each companion, \
                 and assign companions to drivers within seat limits. The \
                 outcome is printed as JSON.",
    about = "Match companions to drivers"
)]
#[ortho_config(prefix = "RENDEZVOUS")]
pub(crate) struct MatchArgs {
    /// Path to a JSON file containing a MatchRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Google Maps API key.
    #[arg(long = ARG_MATCH_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Override the maps web service base URL.
    #[arg(long = ARG_MATCH_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_MATCH_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Route points refined per driver/companion pair.
    #[arg(long = ARG_MATCH_CANDIDATES, value_name = "count")]
    #[serde(default)]
    pub(crate) candidates: Option<usize>,
    /// Slack, in minutes, allowed when checking pickups on the way in.
    #[arg(long = ARG_MATCH_BUFFER_MINUTES, value_name = "minutes")]
    #[serde(default)]
    pub(crate) buffer_minutes: Option<u64>,
    /// Threads used for per-driver work.
    #[arg(long = ARG_MATCH_WORKERS, value_name = "count")]
    #[serde(default)]
    pub(crate) workers: Option<usize>,
    /// Estimate per-leg travel times of each driver's trip.
    #[arg(
        long = ARG_MATCH_ITINERARIES,
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "bool"
    )]
    #[serde(default)]
    pub(crate) itineraries: Option<bool>,
}

impl MatchArgs {
    pub(crate) fn into_config(self) -> Result<MatchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MatchConfig::try_from(merged)
    }
}

/// Resolved `match` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Maps web service settings.
    pub(crate) maps: GoogleMapsConfig,
    /// Engine tuning.
    pub(crate) engine: EngineConfig,
}

impl MatchConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_MATCH_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

fn non_zero<T: PartialEq + Default>(value: T, field: &'static str) -> Result<T, CliError> {
    if value == T::default() {
        Err(CliError::ZeroValue { field })
    } else {
        Ok(value)
    }
}

impl TryFrom<MatchArgs> for MatchConfig {
    type Error = CliError;

    fn try_from(args: MatchArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_MATCH_REQUEST,
            env: ENV_MATCH_REQUEST,
        })?;
        let api_key = args
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_MATCH_API_KEY,
                env: ENV_MATCH_API_KEY,
            })?;

        let mut maps = GoogleMapsConfig::new(api_key);
        if let Some(base_url) = args.base_url {
            maps = maps.with_base_url(base_url);
        }
        if let Some(secs) = args.timeout_secs {
            maps = maps.with_timeout(Duration::from_secs(non_zero(secs, ARG_MATCH_TIMEOUT_SECS)?));
        }

        let mut engine = EngineConfig::default();
        if let Some(count) = args.candidates {
            engine = engine.with_candidate_count(non_zero(count, ARG_MATCH_CANDIDATES)?);
        }
        if let Some(minutes) = args.buffer_minutes {
            engine = engine.with_feasibility_buffer(Duration::from_secs(minutes.saturating_mul(60)));
        }
        if let Some(workers) = args.workers {
            engine = engine.with_workers(workers);
        }
        engine = engine.with_itineraries(args.itineraries.unwrap_or(false));

        Ok(Self {
            request_path,
            maps,
            engine,
        })
    }
}

/// Engine whose providers are chosen at runtime.
pub(crate) type ProviderEngine = MatchingEngine<Box<dyn Geocoder>, Box<dyn RouteProvider>>;

/// Builds the matching engine for the current invocation.
pub(crate) trait MatchEngineBuilder {
    fn build(&self, config: &MatchConfig) -> Result<ProviderEngine, CliError>;
}

/// Builds an engine backed by Google Maps with memoised road legs.
pub(crate) struct GoogleEngineBuilder;

impl MatchEngineBuilder for GoogleEngineBuilder {
    fn build(&self, config: &MatchConfig) -> Result<ProviderEngine, CliError> {
        let client = GoogleMapsClient::with_config(config.maps.clone()).map_err(|source| {
            CliError::BuildProvider {
                base_url: config.maps.base_url.clone(),
                source,
            }
        })?;
        let client = Arc::new(client);
        let geocoder: Box<dyn Geocoder> = Box::new(Arc::clone(&client));
        let router: Box<dyn RouteProvider> = Box::new(CachedRouteProvider::new(client));
        Ok(MatchingEngine::with_config(
            geocoder,
            router,
            config.engine.clone(),
        ))
    }
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_match_with(args, &GoogleEngineBuilder, &mut stdout)
}

pub(crate) fn run_match_with(
    args: MatchArgs,
    builder: &dyn MatchEngineBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let outcome = execute_match(args, builder)?;
    write_outcome(writer, &outcome)
}

fn execute_match(
    args: MatchArgs,
    builder: &dyn MatchEngineBuilder,
) -> Result<MatchOutcome, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request = load_request(&config.request_path)?;
    let engine = builder.build(&config)?;
    let outcome = engine.run(&request).map_err(CliError::Match)?;
    log_summary(&outcome);
    Ok(outcome)
}

fn log_summary(outcome: &MatchOutcome) {
    let unassigned = outcome.unassigned();
    if !unassigned.is_empty() {
        let names: Vec<&str> = unassigned.iter().map(|id| id.as_str()).collect();
        log::warn!("no pickup found for: {}", names.join(", "));
    }
    if !outcome.exclusions.is_empty() {
        log::warn!(
            "{} participant(s) excluded; see the exclusions list",
            outcome.exclusions.len()
        );
    }
    log::debug!(
        "{} of {} pair(s) had a meeting point",
        outcome.stats.pairs_with_intersection,
        outcome.stats.pairs_considered
    );
}

/// Load a JSON-encoded [`MatchRequest`] from disk.
pub(crate) fn load_request(path: &Utf8Path) -> Result<MatchRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_outcome(writer: &mut dyn Write, outcome: &MatchOutcome) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(outcome).map_err(CliError::SerialiseOutcome)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<MatchConfig, CliError> {
    let merged = MatchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    MatchConfig::try_from(merged)
}
