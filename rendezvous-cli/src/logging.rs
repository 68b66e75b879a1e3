//! Logging backend for the command-line interface.

use env_logger::{Builder, Env};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install `env_logger` as the `log` backend.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`]. Calling this twice is harmless;
/// the second installation attempt is ignored.
pub fn init() {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .format_module_path(false)
        .try_init()
        .ok();
}
