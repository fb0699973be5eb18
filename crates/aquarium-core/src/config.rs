//! Configuration loading and typed config structures for the engine.
//!
//! The canonical configuration lives in `aquarium-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure and a loader that reads and validates the file. Every key
//! is optional; missing keys take the defaults below.

use std::path::{Path, PathBuf};

use aquarium_actions::Action;
use aquarium_types::{DailySchedule, Environment};
use aquarium_world::schedule::schedule;
use aquarium_world::{DEFAULT_ENVIRONMENT, TunableConfig, WorldError};
use serde::Deserialize;

use crate::SimulationSetup;

/// Environment variable that overrides `run.save_path`.
pub const SAVE_PATH_ENV: &str = "AQUARIUM_SAVE_PATH";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The file parsed but describes an impossible tank.
    #[error("invalid simulation setup: {source}")]
    Setup {
        /// The underlying validation error.
        #[from]
        source: WorldError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `aquarium-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// The tank and its surroundings.
    #[serde(default)]
    pub simulation: SimulationSection,

    /// What the headless run does.
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Process constants.
    #[serde(default)]
    pub tunables: TunableConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `AQUARIUM_SAVE_PATH` overrides `run.save_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.run.apply_env_overrides();
        Ok(config)
    }

    /// Validate the simulation section and turn it into a setup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Setup`] for a non-positive capacity or an
    /// out-of-range photoperiod.
    pub fn setup(&self) -> Result<SimulationSetup, ConfigError> {
        let sim = &self.simulation;
        if !sim.capacity.is_finite() || sim.capacity <= 0.0 {
            return Err(WorldError::InvalidCapacity {
                capacity: sim.capacity,
            }
            .into());
        }
        let photoperiod = sim
            .photoperiod
            .map(|p| schedule(p.start_hour, p.duration))
            .transpose()?;
        Ok(SimulationSetup {
            capacity: sim.capacity,
            environment: sim.environment(),
            photoperiod,
        })
    }
}

/// Tank size and surroundings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationSection {
    /// Tank capacity in liters.
    #[serde(default = "default_capacity")]
    pub capacity: f64,

    /// Room air temperature (°C).
    #[serde(default = "default_room_temperature")]
    pub room_temperature: f64,

    /// Tap water temperature (°C).
    #[serde(default = "default_tap_water_temperature")]
    pub tap_water_temperature: f64,

    /// Tap water pH.
    #[serde(default = "default_tap_water_ph")]
    pub tap_water_ph: f64,

    /// Ambient organic waste (g/h).
    #[serde(default = "default_ambient_waste")]
    pub ambient_waste: f64,

    /// Light and CO2 schedule. Keeps the built-in schedule when absent.
    #[serde(default)]
    pub photoperiod: Option<DailySchedule>,
}

impl SimulationSection {
    /// The outside conditions described by this section.
    pub const fn environment(&self) -> Environment {
        Environment {
            room_temperature: self.room_temperature,
            tap_water_temperature: self.tap_water_temperature,
            tap_water_ph: self.tap_water_ph,
            ambient_waste: self.ambient_waste,
        }
    }
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            room_temperature: default_room_temperature(),
            tap_water_temperature: default_tap_water_temperature(),
            tap_water_ph: default_tap_water_ph(),
            ambient_waste: default_ambient_waste(),
            photoperiod: None,
        }
    }
}

/// An action applied before a given tick of the headless run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduledAction {
    /// The action runs on the state at this tick, before it advances.
    pub at_tick: u64,
    /// The action.
    pub action: Action,
}

/// Headless run settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    /// Number of hours to simulate.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Write a daily summary to the log every this many ticks. 0 disables it.
    #[serde(default = "default_summary_interval")]
    pub summary_interval: u64,

    /// Where to write the save file. No file is written when absent.
    #[serde(default)]
    pub save_path: Option<PathBuf>,

    /// Load this save file instead of filling a new tank.
    #[serde(default)]
    pub resume_from: Option<PathBuf>,

    /// Keeper actions to replay during the run.
    #[serde(default)]
    pub actions: Vec<ScheduledAction>,

    /// Seed for actions that draw random numbers.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl RunConfig {
    /// Apply environment variable overrides.
    ///
    /// - `AQUARIUM_SAVE_PATH` overrides `save_path`
    pub fn apply_env_overrides(&mut self) {
        override_save_path(self, std::env::var(SAVE_PATH_ENV).ok());
    }
}

fn override_save_path(run: &mut RunConfig, value: Option<String>) {
    if let Some(path) = value.filter(|p| !p.is_empty()) {
        run.save_path = Some(PathBuf::from(path));
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            summary_interval: default_summary_interval(),
            save_path: None,
            resume_from: None,
            actions: Vec::new(),
            seed: default_seed(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

const fn default_capacity() -> f64 {
    100.0
}

const fn default_room_temperature() -> f64 {
    DEFAULT_ENVIRONMENT.room_temperature
}

const fn default_tap_water_temperature() -> f64 {
    DEFAULT_ENVIRONMENT.tap_water_temperature
}

const fn default_tap_water_ph() -> f64 {
    DEFAULT_ENVIRONMENT.tap_water_ph
}

const fn default_ambient_waste() -> f64 {
    DEFAULT_ENVIRONMENT.ambient_waste
}

const fn default_ticks() -> u64 {
    24 * 7
}

const fn default_summary_interval() -> u64 {
    24
}

const fn default_seed() -> u64 {
    42
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!((config.simulation.capacity - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.run.ticks, 168);
        assert_eq!(config.logging.level, "info");
        assert!(config.setup().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
simulation:
  capacity: 60
  room_temperature: 24
  tap_water_temperature: 18
  tap_water_ph: 7.6
  ambient_waste: 0.002
  photoperiod:
    start_hour: 9
    duration: 8

run:
  ticks: 48
  summary_interval: 12
  save_path: tank.json
  seed: 7
  actions:
    - at_tick: 10
      action:
        type: feed
        amount: 0.3
    - at_tick: 30
      action:
        type: add_fish
        species: neon_tetra
    - at_tick: 40
      action:
        type: top_off

logging:
  level: debug

tunables:
  fish:
    hunger_rate: 3
";
        let config = EngineConfig::parse(yaml).unwrap();
        assert!((config.simulation.capacity - 60.0).abs() < f64::EPSILON);
        assert_eq!(
            config.simulation.photoperiod,
            Some(DailySchedule {
                start_hour: 9,
                duration: 8
            })
        );
        assert_eq!(config.run.ticks, 48);
        assert_eq!(config.run.actions.len(), 3);
        assert_eq!(config.run.actions[0].action, Action::Feed { amount: 0.3 });
        assert_eq!(config.run.actions[2].action, Action::TopOff);
        assert_eq!(config.logging.level, "debug");
        assert!((config.tunables.fish.hunger_rate - 3.0).abs() < f64::EPSILON);
        assert!((config.tunables.fish.eat_threshold - 10.0).abs() < f64::EPSILON);

        let setup = config.setup().unwrap();
        assert!((setup.environment.tap_water_ph - 7.6).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = EngineConfig::parse("{}").unwrap();
        assert_eq!(config.simulation, SimulationSection::default());
        assert_eq!(config.tunables, TunableConfig::default());
    }

    #[test]
    fn bad_photoperiod_is_rejected() {
        let yaml = "simulation:\n  photoperiod:\n    start_hour: 25\n    duration: 8\n";
        let config = EngineConfig::parse(yaml).unwrap();
        assert!(matches!(config.setup(), Err(ConfigError::Setup { .. })));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = EngineConfig::parse("simulation:\n  capacity: 0\n").unwrap();
        assert!(config.setup().is_err());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(EngineConfig::parse("run: [unclosed"), Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn save_path_override() {
        let mut run = RunConfig::default();
        override_save_path(&mut run, Some("/tmp/override.json".into()));
        assert_eq!(run.save_path, Some(PathBuf::from("/tmp/override.json")));

        override_save_path(&mut run, Some(String::new()));
        assert_eq!(run.save_path, Some(PathBuf::from("/tmp/override.json")));
    }
}
