//! Fixtures shared by the match command tests.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use rendezvous_core::test_support::ScriptedProvider;
use rendezvous_core::{Coordinate, MatchingEngine, Route};
use tempfile::TempDir;

use super::{CliError, MatchConfig, MatchEngineBuilder, ProviderEngine};

pub(super) const OFFICE: Coordinate = Coordinate::new(12.9352, 77.6245);
pub(super) const HOME: Coordinate = Coordinate::new(12.9784, 77.6408);
pub(super) const STOP: Coordinate = Coordinate::new(12.9560, 77.6320);
pub(super) const FLAT: Coordinate = Coordinate::new(12.9571, 77.6331);

/// A request with one driver heading home and one companion near the route.
pub(super) const VALID_REQUEST: &str = r#"{
  "direction": "from_office",
  "office": "Koramangala office",
  "drivers": [{"name": "asha", "address": "Indiranagar", "capacity": 1}],
  "companions": [{"name": "chitra", "address": "Domlur"}]
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).unwrap_or_else(|err| panic!("write {path}: {err}"));
}

/// Temporary directory with a UTF-8 path.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

fn scripted() -> ScriptedProvider {
    ScriptedProvider::new()
        .with_geocode("Koramangala office", OFFICE)
        .with_geocode("Indiranagar", HOME)
        .with_geocode("Domlur", FLAT)
        .with_route(OFFICE, HOME, Route::new(vec![OFFICE, STOP, HOME], 6.1))
        .with_aerial_legs()
}

/// Builds an engine over scripted providers instead of the maps service.
#[derive(Debug, Default)]
pub(super) struct ScriptedEngineBuilder;

impl MatchEngineBuilder for ScriptedEngineBuilder {
    fn build(&self, config: &MatchConfig) -> Result<ProviderEngine, CliError> {
        Ok(MatchingEngine::with_config(
            Box::new(scripted()),
            Box::new(scripted()),
            config.engine.clone(),
        ))
    }
}
