//! Plant growth.
//!
//! The biomass fixed by photosynthesis this hour is shared between plants in
//! proportion to their species growth rate. A plant stops at its species
//! maximum; whatever it would have grown beyond that is shed as waste.
//!
//! Biomass is recomputed from the same snapshot photosynthesis reads, so
//! both systems agree without one feeding the other.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::config::TunableConfig;
use crate::effects::{Effect, EffectTarget};
use crate::systems::{System, photosynthesis};

/// Active-tier plant growth system.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantGrowth;

impl System for PlantGrowth {
    fn name(&self) -> &'static str {
        "plant_growth"
    }

    fn tier(&self) -> Tier {
        Tier::Active
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect> {
        let biomass = photosynthesis::biomass(state, config);
        let total_rate: f64 = state.plants.iter().map(|p| p.species.growth_rate()).sum();
        if biomass <= 0.0 || total_rate <= 0.0 {
            return Vec::new();
        }

        let mut effects = Vec::with_capacity(state.plants.len().saturating_add(1));
        let mut overflow = 0.0;
        for plant in &state.plants {
            let share = biomass * plant.species.growth_rate() / total_rate;
            let room = (plant.species.max_size() - plant.size).max(0.0);
            let grown = share.min(room);
            overflow += share - grown;
            if grown > 0.0 {
                effects.push(Effect::organism(
                    Tier::Active,
                    EffectTarget::PlantSize(plant.id),
                    grown,
                    self.name(),
                ));
            }
        }
        if overflow > 0.0 {
            effects.push(Effect::resource(
                Tier::Active,
                ResourceKey::Waste,
                overflow * config.plants.overgrowth_waste_per_percent,
                self.name(),
            ));
        }
        effects
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use aquarium_types::{Plant, PlantId, PlantSpecies};

    use super::*;
    use crate::effects::apply_effects;
    use crate::test_support::sample_state;

    fn planted(plants: &[(PlantSpecies, f64)]) -> SimulationState {
        let mut state = sample_state(100.0);
        state.resources.light = 50.0;
        state.resources.co2 = 20.0;
        state.resources.nitrate = 500.0;
        state.plants = plants
            .iter()
            .map(|&(species, size)| Plant {
                id: PlantId::new(),
                species,
                size,
            })
            .collect();
        state
    }

    #[test]
    fn biomass_split_by_growth_rate() {
        let state = planted(&[(PlantSpecies::AmazonSword, 50.0), (PlantSpecies::Anubias, 50.0)]);
        let config = TunableConfig::default();
        let biomass = photosynthesis::biomass(&state, &config);
        let next = apply_effects(&state, &PlantGrowth.update(&state, &config));
        let sword = next.plants[0].size - 50.0;
        let anubias = next.plants[1].size - 50.0;
        assert!((sword + anubias - biomass).abs() < 1e-12);
        assert!((sword / anubias - 1.0 / 0.3).abs() < 1e-9);
    }

    #[test]
    fn growth_past_max_becomes_waste() {
        let state = planted(&[(PlantSpecies::Anubias, 150.0)]);
        let config = TunableConfig::default();
        let biomass = photosynthesis::biomass(&state, &config);
        let next = apply_effects(&state, &PlantGrowth.update(&state, &config));
        assert!((next.plants[0].size - 150.0).abs() < f64::EPSILON);
        let shed = next.resources.waste - state.resources.waste;
        assert!((shed - biomass * config.plants.overgrowth_waste_per_percent).abs() < 1e-12);
    }

    #[test]
    fn no_light_no_growth() {
        let mut state = planted(&[(PlantSpecies::Hornwort, 50.0)]);
        state.resources.light = 0.0;
        assert!(PlantGrowth.update(&state, &TunableConfig::default()).is_empty());
    }
}
