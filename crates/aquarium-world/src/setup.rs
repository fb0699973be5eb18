//! Construction of a fresh tank.

use aquarium_types::{AlertState, Environment, SimulationState};

use crate::equipment::default_equipment;
use crate::equipment::passive::apply_passive;
use crate::error::WorldError;
use crate::registry::default_resources;
use crate::tank::build_tank;

/// A typical living room: 22 °C air, 20 °C tap water at pH 7.2, a trickle
/// of dust and debris.
pub const DEFAULT_ENVIRONMENT: Environment = Environment {
    room_temperature: 22.0,
    tap_water_temperature: 20.0,
    tap_water_ph: 7.2,
    ambient_waste: 0.001,
};

/// Build the tick-0 state of a newly filled tank.
///
/// The tank is full, resources hold their registry defaults, the default
/// equipment is installed and the passive values are already computed.
/// No plants, no fish, no logs.
pub fn initial_state(
    capacity: f64,
    environment: Environment,
) -> Result<SimulationState, WorldError> {
    let tank = build_tank(capacity)?;
    let state = SimulationState {
        tick: 0,
        tank,
        resources: default_resources(capacity),
        environment,
        equipment: default_equipment(capacity),
        plants: Vec::new(),
        fish: Vec::new(),
        logs: Vec::new(),
        alert_state: AlertState::default(),
    };
    Ok(apply_passive(state))
}
