//! Headless runner for the aquarium simulation.
//!
//! Loads the configuration, fills a tank (or resumes a save file),
//! fast-forwards it by repeated ticks while replaying scripted keeper
//! actions, and writes the final state to a save file.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `aquarium-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Fill a new tank or resume from `run.resume_from`
//! 4. Run the configured number of ticks
//! 5. Write the save file to `run.save_path`

mod error;
mod runner;

use std::path::{Path, PathBuf};

use aquarium_core::config::LoggingConfig;
use aquarium_core::{EngineConfig, create_simulation, persistence};
use aquarium_types::SimulationState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file read when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "aquarium-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a tick fails or the
/// save file cannot be read or written.
fn main() -> Result<(), EngineError> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, found) = load_config(&config_path)?;

    init_tracing(&config.logging);
    info!("aquarium-engine starting");
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    let start = initial_state(&config)?;
    info!(
        tick = start.tick,
        capacity = start.tank.capacity,
        fish = start.fish.len(),
        plants = start.plants.len(),
        ticks = config.run.ticks,
        scripted_actions = config.run.actions.len(),
        "Simulation ready, entering tick loop"
    );

    let report = runner::run_headless(start, &config)?;
    runner::log_summary(&report.state);
    info!(
        ticks_run = report.ticks_run,
        final_tick = report.state.tick,
        actions_applied = report.actions_applied,
        actions_rejected = report.actions_rejected,
        "Simulation ended"
    );

    if let Some(path) = &config.run.save_path {
        write_save(path, &report.state, &config)?;
    }

    info!("aquarium-engine shutdown complete");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the config level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the configuration, falling back to defaults when the file does not
/// exist. The flag reports whether the file was found.
fn load_config(path: &Path) -> Result<(EngineConfig, bool), EngineError> {
    if path.exists() {
        Ok((EngineConfig::from_file(path)?, true))
    } else {
        Ok((EngineConfig::parse("{}")?, false))
    }
}

fn initial_state(config: &EngineConfig) -> Result<SimulationState, EngineError> {
    let Some(path) = &config.run.resume_from else {
        return Ok(create_simulation(&config.setup()?)?);
    };
    let json = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.clone(),
        source,
    })?;
    let loaded = persistence::load(&json)?;
    if !loaded.fallbacks.is_empty() {
        warn!(sections = ?loaded.fallbacks, "save file sections replaced by defaults");
    }
    if loaded.config != config.tunables {
        info!("Save file tunables differ from the config file; using the config file");
    }
    info!(path = %path.display(), tick = loaded.state.tick, saved_at = ?loaded.saved_at, "Resumed from save file");
    Ok(loaded.state)
}

fn write_save(path: &Path, state: &SimulationState, config: &EngineConfig) -> Result<(), EngineError> {
    let json = persistence::save(state, &config.tunables)?;
    std::fs::write(path, json).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), tick = state.tick, "Save file written");
    Ok(())
}
