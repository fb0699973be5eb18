//! Thermostat-controlled heater.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::equipment::{Controller, ControllerOutput};

/// Degrees the heater adds this hour: `(W / V) * scale`, never past the
/// setpoint.
pub fn heating(state: &SimulationState, config: &TunableConfig) -> f64 {
    let heater = &state.equipment.heater;
    let volume = state.resources.water;
    let gap = heater.target_temperature - state.resources.temperature;
    if !heater.enabled || gap <= 0.0 || volume <= 0.0 {
        return 0.0;
    }
    let rate = heater.wattage / volume * config.equipment.heater_volume_scale;
    rate.min(gap).max(0.0)
}

/// Heater controller: on while enabled and below the setpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaterController;

impl Controller for HeaterController {
    fn name(&self) -> &'static str {
        "heater"
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> ControllerOutput {
        let heater = &state.equipment.heater;
        let is_on = heater.enabled && state.resources.temperature < heater.target_temperature;
        let delta = heating(state, config);
        let effects = if delta > 0.0 {
            vec![Effect::resource(Tier::Immediate, ResourceKey::Temperature, delta, self.name())]
        } else {
            Vec::new()
        };
        ControllerOutput {
            effects,
            is_on,
            log: None,
        }
    }

    fn apply_state_change(&self, mut state: SimulationState, is_on: bool) -> SimulationState {
        state.equipment.heater.is_on = is_on;
        state
    }
}
