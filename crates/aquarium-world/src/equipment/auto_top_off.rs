//! Float-switch auto-top-off.
//!
//! Once the level drops below the threshold fraction of capacity, the unit
//! refills to exactly 100% with tap water, mixing in its temperature.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::chemistry::blend_temperature;
use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::equipment::{Controller, ControllerOutput, equipment_log};

/// Auto-top-off controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoTopOffController;

impl Controller for AutoTopOffController {
    fn name(&self) -> &'static str {
        "auto_top_off"
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> ControllerOutput {
        let capacity = state.tank.capacity;
        let water = state.resources.water;
        let threshold = capacity * config.equipment.top_off_threshold;
        if !state.equipment.auto_top_off.enabled || water >= threshold {
            return ControllerOutput::off();
        }
        let added = capacity - water;
        let temperature = state.resources.temperature;
        let blended = blend_temperature(
            temperature,
            water,
            state.environment.tap_water_temperature,
            added,
        );
        ControllerOutput {
            effects: vec![
                Effect::resource(Tier::Immediate, ResourceKey::Water, added, self.name()),
                Effect::resource(
                    Tier::Immediate,
                    ResourceKey::Temperature,
                    blended - temperature,
                    self.name(),
                ),
            ],
            is_on: true,
            log: Some(equipment_log(state, "Auto top-off refilled the tank.")),
        }
    }

    fn apply_state_change(&self, mut state: SimulationState, is_on: bool) -> SimulationState {
        state.equipment.auto_top_off.is_on = is_on;
        state
    }
}
