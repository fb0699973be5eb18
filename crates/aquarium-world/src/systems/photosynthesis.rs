//! Photosynthesis.
//!
//! While the light is on, plants fix CO2 and nitrate into biomass and
//! release O2. The rate follows Liebig's law of the minimum over the CO2
//! and nitrate sufficiency factors and scales with total plant size.
//! Phosphate, potassium and iron are drawn down at fixed ratios.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::systems::System;

/// Photosynthesis rate this hour, in abstract rate units.
///
/// Zero in the dark, in an empty tank or without plants.
pub fn rate(state: &SimulationState, config: &TunableConfig) -> f64 {
    let r = &state.resources;
    if r.light <= 0.0 || r.water <= 0.0 || state.plants.is_empty() {
        return 0.0;
    }
    let pc = &config.photosynthesis;
    let co2_factor = sufficiency(r.co2, pc.optimal_co2);
    let nitrate_factor = sufficiency(r.ppm(ResourceKey::Nitrate), pc.optimal_nitrate);
    pc.base_rate * co2_factor.min(nitrate_factor) * state.total_plant_size() / 100.0
}

fn sufficiency(value: f64, optimum: f64) -> f64 {
    if optimum <= 0.0 {
        return 1.0;
    }
    (value / optimum).clamp(0.0, 1.0)
}

/// Plant size (percent, summed over all plants) produced this hour.
pub fn biomass(state: &SimulationState, config: &TunableConfig) -> f64 {
    rate(state, config) * config.photosynthesis.biomass_per_rate
}

/// Active-tier photosynthesis system.
#[derive(Debug, Clone, Copy, Default)]
pub struct Photosynthesis;

impl System for Photosynthesis {
    fn name(&self) -> &'static str {
        "photosynthesis"
    }

    fn tier(&self) -> Tier {
        Tier::Active
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect> {
        let rate = rate(state, config);
        if rate <= 0.0 {
            return Vec::new();
        }
        let pc = &config.photosynthesis;
        let volume = state.resources.water;
        let name = self.name();
        vec![
            Effect::resource(Tier::Active, ResourceKey::Oxygen, rate * pc.o2_per_rate / volume, name),
            Effect::resource(Tier::Active, ResourceKey::Co2, -rate * pc.co2_per_rate / volume, name),
            Effect::resource(Tier::Active, ResourceKey::Nitrate, -rate * pc.nitrate_per_rate, name),
            Effect::resource(Tier::Active, ResourceKey::Phosphate, -rate * pc.phosphate_per_rate, name),
            Effect::resource(Tier::Active, ResourceKey::Potassium, -rate * pc.potassium_per_rate, name),
            Effect::resource(Tier::Active, ResourceKey::Iron, -rate * pc.iron_per_rate, name),
        ]
    }
}
