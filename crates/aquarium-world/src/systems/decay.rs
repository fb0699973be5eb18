//! Decomposition of uneaten food, plus ambient organic input.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::chemistry::q10_factor;
use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::systems::System;

/// Grams of food that decay this hour. Never more than the food present.
pub fn decayed_food(state: &SimulationState, config: &TunableConfig) -> f64 {
    let food = state.resources.food;
    if food <= 0.0 {
        return 0.0;
    }
    let dc = &config.decay;
    let factor = q10_factor(dc.q10, state.resources.temperature, dc.reference_temperature);
    food.min(food * dc.base_rate * factor)
}

/// Passive-tier decay system.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decay;

impl System for Decay {
    fn name(&self) -> &'static str {
        "decay"
    }

    fn tier(&self) -> Tier {
        Tier::Passive
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect> {
        let mut effects = Vec::new();
        let decayed = decayed_food(state, config);
        if decayed > 0.0 {
            effects.push(Effect::resource(Tier::Passive, ResourceKey::Food, -decayed, self.name()));
            effects.push(Effect::resource(Tier::Passive, ResourceKey::Waste, decayed, self.name()));
        }
        let ambient = state.environment.ambient_waste;
        if ambient > 0.0 {
            effects.push(Effect::resource(Tier::Passive, ResourceKey::Waste, ambient, self.name()));
        }
        effects
    }
}
