//! The nitrogen cycle.
//!
//! Waste mineralizes into ammonia. Ammonia-oxidizing bacteria (AOB) turn
//! ammonia into nitrite and nitrite-oxidizing bacteria (NOB) turn nitrite
//! into nitrate. Masses are on a nitrogen basis, so each step is 1:1.
//!
//! Both populations live on surfaces: their carrying capacity is
//! `bacteria_per_cm2 * surface`. A colony appears once its food crosses the
//! spawn threshold, grows logistically while fed, dies back when starved
//! and is cut back to capacity whenever surface is lost.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::config::{NitrogenConfig, TunableConfig};
use crate::effects::Effect;
use crate::systems::System;

const SOURCE: &str = "nitrogen_cycle";

/// Population change of one colony this hour.
///
/// `food_ppm` is the concentration of the compound the colony oxidizes.
pub fn population_delta(
    population: f64,
    food_ppm: f64,
    spawn_threshold: f64,
    capacity: f64,
    config: &NitrogenConfig,
) -> f64 {
    if population <= 0.0 {
        if food_ppm > spawn_threshold && capacity > 0.0 {
            return config.spawn_amount.min(capacity);
        }
        return 0.0;
    }
    if population > capacity {
        return capacity - population;
    }
    if food_ppm > config.min_food_ppm {
        let growth = config.growth_rate * population * (1.0 - population / capacity);
        // Growth never pushes the colony past capacity.
        return growth.min(capacity - population);
    }
    -population * config.death_rate
}

/// Milligrams a colony oxidizes this hour, limited by what is available.
pub fn processed(population: f64, available: f64, rate_per_unit: f64) -> f64 {
    if population <= 0.0 || available <= 0.0 {
        return 0.0;
    }
    available.min(population * rate_per_unit)
}

/// Passive-tier nitrogen cycle system.
#[derive(Debug, Clone, Copy, Default)]
pub struct NitrogenCycle;

impl System for NitrogenCycle {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn tier(&self) -> Tier {
        Tier::Passive
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect> {
        let nc = &config.nitrogen;
        let r = &state.resources;
        let mut effects = Vec::new();
        let mut push = |key, delta: f64| {
            if delta != 0.0 {
                effects.push(Effect::resource(Tier::Passive, key, delta, SOURCE));
            }
        };

        // Mineralization
        let converted = r.waste * nc.waste_conversion_rate;
        push(ResourceKey::Waste, -converted);
        push(ResourceKey::Ammonia, converted * nc.ammonia_per_waste);

        // Oxidation, from the masses present at the start of the hour.
        let ammonia_done = processed(r.aob, r.ammonia, nc.aob_conversion_rate);
        push(ResourceKey::Ammonia, -ammonia_done);
        push(ResourceKey::Nitrite, ammonia_done);

        let nitrite_done = processed(r.nob, r.nitrite, nc.nob_conversion_rate);
        push(ResourceKey::Nitrite, -nitrite_done);
        push(ResourceKey::Nitrate, nitrite_done);

        // Populations
        let capacity = r.surface * nc.bacteria_per_cm2;
        push(
            ResourceKey::Aob,
            population_delta(
                r.aob,
                r.ppm(ResourceKey::Ammonia),
                nc.aob_spawn_threshold,
                capacity,
                nc,
            ),
        );
        push(
            ResourceKey::Nob,
            population_delta(
                r.nob,
                r.ppm(ResourceKey::Nitrite),
                nc.nob_spawn_threshold,
                capacity,
                nc,
            ),
        );

        effects
    }
}
