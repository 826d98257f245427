//! Scenario fixtures shared by the end-to-end allocation tests.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use intellect_core::Scenario;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a `{ "state": ..., "data": ... }` scenario from `tests/fixtures`.
pub fn load_scenario(name: &str) -> Result<Scenario> {
    let path = fixture_path(name);
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    Scenario::from_json_str(&contents)
        .with_context(|| format!("failed to parse scenario {}", path.display()))
}
