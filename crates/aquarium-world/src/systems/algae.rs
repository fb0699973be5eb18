//! Algae growth.
//!
//! Growth follows a saturating response to light intensity (watts per
//! liter) and is suppressed by plants competing for the same light and
//! nutrients.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::systems::System;

/// Algae gained this hour on the 0-100 scale.
pub fn growth(state: &SimulationState, config: &TunableConfig) -> f64 {
    let r = &state.resources;
    if r.water <= 0.0 || r.light <= 0.0 {
        return 0.0;
    }
    let ac = &config.algae;
    let wpl = r.light / r.water;
    let response = ac.max_growth_rate * wpl / (ac.half_saturation + wpl);
    let competition = if ac.plant_competition_scale > 0.0 {
        1.0 + state.total_plant_size() / ac.plant_competition_scale
    } else {
        1.0
    };
    response / competition
}

/// Passive-tier algae system.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlgaeGrowth;

impl System for AlgaeGrowth {
    fn name(&self) -> &'static str {
        "algae_growth"
    }

    fn tier(&self) -> Tier {
        Tier::Passive
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect> {
        let delta = growth(state, config);
        if delta <= 0.0 {
            return Vec::new();
        }
        vec![Effect::resource(Tier::Passive, ResourceKey::Algae, delta, self.name())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_state;

    #[test]
    fn half_saturation_gives_half_rate() {
        let mut state = sample_state(100.0);
        state.plants.clear();
        state.resources.light = 100.0; // 1 W/L
        assert!((growth(&state, &TunableConfig::default()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn plants_suppress_algae() {
        let mut bare = sample_state(100.0);
        bare.plants.clear();
        bare.resources.light = 50.0;
        let mut planted = sample_state(100.0);
        planted.resources.light = 50.0;
        for plant in &mut planted.plants {
            plant.size = 100.0;
        }
        let config = TunableConfig::default();
        assert!(growth(&planted, &config) < growth(&bare, &config));
    }

    #[test]
    fn dark_tank_grows_nothing() {
        let mut state = sample_state(100.0);
        state.resources.light = 0.0;
        assert!(AlgaeGrowth.update(&state, &TunableConfig::default()).is_empty());
    }
}
