//! Scheduled CO2 injection.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::equipment::{Controller, ControllerOutput};
use crate::schedule::is_schedule_active;

/// CO2 generator controller: injects while enabled and inside its window.
#[derive(Debug, Clone, Copy, Default)]
pub struct Co2GeneratorController;

impl Controller for Co2GeneratorController {
    fn name(&self) -> &'static str {
        "co2_generator"
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> ControllerOutput {
        let generator = &state.equipment.co2_generator;
        let capacity = state.tank.capacity;
        let active = generator.enabled
            && is_schedule_active(state.hour_of_day(), &generator.schedule)
            && capacity > 0.0;
        if !active {
            return ControllerOutput::off();
        }
        let mg_per_liter =
            config.equipment.co2_mg_per_bubble_hour * generator.bubble_rate / capacity;
        let effects = if mg_per_liter > 0.0 {
            vec![Effect::resource(Tier::Immediate, ResourceKey::Co2, mg_per_liter, self.name())]
        } else {
            Vec::new()
        };
        ControllerOutput {
            effects,
            is_on: true,
            log: None,
        }
    }

    fn apply_state_change(&self, mut state: SimulationState, is_on: bool) -> SimulationState {
        state.equipment.co2_generator.is_on = is_on;
        state
    }
}
