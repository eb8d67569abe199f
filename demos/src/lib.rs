// Copyright 2025 the Territory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the territory demos.
//!
//! Run the demos with:
//! - `cargo run -p territory_demos --example territory_walkthrough`
//! - `cargo run -p territory_demos --example shared_registry`

use std::path::Path;

use territory_engine::{Registry, RegistryConfig, Snapshot};
use territory_field::blocks;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a `fmt` subscriber.
///
/// `RUST_LOG` overrides the default filter, which shows `info` everywhere and
/// `debug` for the engine.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,territory_engine=debug"));
    fmt().with_env_filter(filter).with_target(false).init();
}

/// Load a registry config from a JSON file, falling back to defaults when
/// the file is absent. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<RegistryConfig, Box<dyn std::error::Error>> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return Ok(RegistryConfig::default());
    }
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Serialize a registry to pretty JSON and load it back.
pub fn json_round_trip(
    registry: &Registry,
    config: RegistryConfig,
) -> Result<(String, Registry), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(&registry.to_snapshot())?;
    let snapshot: Snapshot = serde_json::from_str(&json)?;
    let restored = Registry::from_snapshot(&snapshot, config)?;
    Ok((json, restored))
}

/// Log every team's score in whole blocks.
pub fn report_scores(registry: &Registry) {
    for (team, name) in registry.teams() {
        tracing::info!(
            team = name,
            fields = registry.team_triangles(team).count(),
            blocks = blocks(registry.score_for_team(team)),
            "score"
        );
    }
}
