//! Tick cycle, alerts and orchestration for the aquarium simulation.
//!
//! This crate is the public face of the engine: create a tank, advance it
//! one hour at a time, apply keeper actions between ticks, and save or
//! restore it. Every entry point takes a state by reference and returns a
//! new one.
//!
//! # Modules
//!
//! - [`alerts`] -- Threshold alerts with hysteresis ([`AlertRegistry`]).
//! - [`config`] -- Configuration loading from `aquarium-config.yaml`.
//! - [`persistence`] -- JSON save files with per-section fallback.
//! - [`tick`] -- The five-phase tick cycle ([`Engine`]).

use std::sync::LazyLock;

use aquarium_types::{DailySchedule, Environment, SimulationState};
use aquarium_world::{DEFAULT_ENVIRONMENT, TunableConfig, WorldError, initial_state};

pub mod alerts;
pub mod config;
pub mod persistence;
pub mod tick;

pub use alerts::{Alert, AlertCheck, AlertRegistry};
pub use aquarium_actions::{
    Action, ActionError, ActionOutcome, apply_action, apply_action_with_rng, execute,
};
pub use config::{ConfigError, EngineConfig};
pub use persistence::{LoadedSimulation, PersistenceError, load, save};
pub use tick::{Engine, TickError};

static STANDARD_ENGINE: LazyLock<Engine> = LazyLock::new(Engine::standard);

/// Everything needed to fill a new tank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSetup {
    /// Tank capacity in liters.
    pub capacity: f64,
    /// Conditions outside the tank.
    pub environment: Environment,
    /// Light and CO2 schedule, replacing the built-in one when set.
    pub photoperiod: Option<DailySchedule>,
}

impl SimulationSetup {
    /// A tank of `capacity` liters in a default room.
    pub const fn with_capacity(capacity: f64) -> Self {
        Self {
            capacity,
            environment: DEFAULT_ENVIRONMENT,
            photoperiod: None,
        }
    }
}

impl Default for SimulationSetup {
    fn default() -> Self {
        Self::with_capacity(100.0)
    }
}

/// Fill a new tank at tick 0.
///
/// # Errors
///
/// Returns [`WorldError::InvalidCapacity`] for a non-finite or
/// non-positive capacity.
pub fn create_simulation(setup: &SimulationSetup) -> Result<SimulationState, WorldError> {
    let mut state = initial_state(setup.capacity, setup.environment)?;
    if let Some(photoperiod) = setup.photoperiod {
        state.equipment.light.schedule = photoperiod;
        state.equipment.co2_generator.schedule = photoperiod;
        state = aquarium_world::equipment::passive::apply_passive(state);
    }
    tracing::info!(capacity = setup.capacity, "simulation created");
    Ok(state)
}

/// Advance `state` by one hour with the built-in systems, controllers and
/// alerts.
///
/// # Errors
///
/// See [`TickError`]. On error no new state is produced.
pub fn tick(state: &SimulationState, config: &TunableConfig) -> Result<SimulationState, TickError> {
    STANDARD_ENGINE.tick(state, config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn photoperiod_applies_to_light_and_co2() {
        let schedule = DailySchedule {
            start_hour: 9,
            duration: 6,
        };
        let setup = SimulationSetup {
            photoperiod: Some(schedule),
            ..SimulationSetup::default()
        };
        let state = create_simulation(&setup).unwrap();
        assert_eq!(state.equipment.light.schedule, schedule);
        assert_eq!(state.equipment.co2_generator.schedule, schedule);
        assert!(!state.equipment.light.is_on);
    }

    #[test]
    fn invalid_capacity_is_rejected() {
        assert!(create_simulation(&SimulationSetup::with_capacity(-5.0)).is_err());
    }
}
