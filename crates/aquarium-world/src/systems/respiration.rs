//! Plant respiration, day and night.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::chemistry::q10_factor;
use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::systems::System;

/// O2 (mg) consumed by all plants this hour.
pub fn oxygen_demand(state: &SimulationState, config: &TunableConfig) -> f64 {
    let rc = &config.respiration;
    let factor = q10_factor(rc.q10, state.resources.temperature, rc.reference_temperature);
    state.total_plant_size() / 100.0 * rc.o2_per_size * factor
}

/// Active-tier respiration system.
#[derive(Debug, Clone, Copy, Default)]
pub struct Respiration;

impl System for Respiration {
    fn name(&self) -> &'static str {
        "respiration"
    }

    fn tier(&self) -> Tier {
        Tier::Active
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect> {
        let volume = state.resources.water;
        let demand = oxygen_demand(state, config);
        if volume <= 0.0 || demand <= 0.0 {
            return Vec::new();
        }
        let co2 = demand * config.respiration.co2_per_o2;
        vec![
            Effect::resource(Tier::Active, ResourceKey::Oxygen, -demand / volume, self.name()),
            Effect::resource(Tier::Active, ResourceKey::Co2, co2 / volume, self.name()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_state;

    #[test]
    fn demand_scales_with_plant_size() {
        let mut state = sample_state(100.0);
        state.resources.temperature = 25.0;
        for plant in &mut state.plants {
            plant.size = 50.0;
        }
        let n = f64::from(u32::try_from(state.plants.len()).unwrap_or(0));
        let demand = oxygen_demand(&state, &TunableConfig::default());
        assert!((demand - n * 2.5).abs() < 1e-9);
    }

    #[test]
    fn consumes_oxygen_produces_co2() {
        let state = sample_state(100.0);
        let effects = Respiration.update(&state, &TunableConfig::default());
        assert_eq!(effects.len(), 2);
        assert!(effects.iter().any(|e| e.delta < 0.0));
        assert!(effects.iter().any(|e| e.delta > 0.0));
    }

    #[test]
    fn no_plants_no_respiration() {
        let mut state = sample_state(100.0);
        state.plants.clear();
        assert!(Respiration.update(&state, &TunableConfig::default()).is_empty());
    }
}
