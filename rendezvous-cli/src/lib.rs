//! Command-line interface for the Rendezvous pickup-point matcher.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
pub mod logging;
mod match_cmd;

pub use error::CliError;
use match_cmd::{MatchArgs, run_match};
#[cfg(test)]
use match_cmd::{
    MatchConfig, MatchEngineBuilder, ProviderEngine, config_from_layers_for_test, load_request,
    run_match_with,
};

pub(crate) const ARG_MATCH_REQUEST: &str = "request";
pub(crate) const ARG_MATCH_API_KEY: &str = "api-key";
pub(crate) const ARG_MATCH_BASE_URL: &str = "base-url";
pub(crate) const ARG_MATCH_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_MATCH_CANDIDATES: &str = "candidates";
pub(crate) const ARG_MATCH_BUFFER_MINUTES: &str = "buffer-minutes";
pub(crate) const ARG_MATCH_WORKERS: &str = "workers";
pub(crate) const ARG_MATCH_ITINERARIES: &str = "itineraries";
pub(crate) const ENV_MATCH_REQUEST: &str = "RENDEZVOUS_CMDS_MATCH_REQUEST_PATH";
pub(crate) const ENV_MATCH_API_KEY: &str = "RENDEZVOUS_CMDS_MATCH_API_KEY";

/// Run the Rendezvous CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Match(args) => run_match(*args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "rendezvous",
    about = "Match carpool companions to drivers at walkable pickup points",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Match companions to drivers for a JSON request.
    Match(Box<MatchArgs>),
}

#[cfg(test)]
mod tests;
