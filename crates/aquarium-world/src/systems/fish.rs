//! Fish metabolism and mortality.
//!
//! Every hour each fish gets hungrier, eats from the uneaten food if it is
//! hungry enough, excretes part of what it ate as waste, breathes (O2 in,
//! CO2 out) and ages one tick. Poor water quality, the wrong temperature or
//! starvation cost health; a fish under no stress slowly recovers.
//!
//! When food is scarce every hungry fish gets the same fraction of its
//! ration, so the outcome does not depend on the order of the fish list.
//!
//! Deaths are handled separately by [`remove_dead`], which the orchestrator
//! runs right after the active tier.

use aquarium_types::{Fish, LogSource, ResourceKey, Severity, SimulationState, Tier};
use tracing::info;

use crate::chemistry::q10_factor;
use crate::config::{FishConfig, TunableConfig};
use crate::effects::{Effect, EffectTarget};
use crate::systems::System;

const SOURCE: &str = "fish_metabolism";

/// Health lost this hour by one fish, or a negative value for recovery.
pub fn stress(fish: &Fish, state: &SimulationState, config: &FishConfig) -> f64 {
    let r = &state.resources;
    let mut damage = 0.0;
    if r.ppm(ResourceKey::Ammonia) > config.ammonia_limit {
        damage += config.ammonia_damage;
    }
    if r.ppm(ResourceKey::Nitrite) > config.nitrite_limit {
        damage += config.nitrite_damage;
    }
    if r.ppm(ResourceKey::Nitrate) > config.nitrate_limit {
        damage += config.nitrate_damage;
    }
    if r.oxygen < config.oxygen_minimum {
        damage += config.low_oxygen_damage;
    }
    let (min_t, max_t) = fish.species.temperature_range();
    if r.temperature < min_t || r.temperature > max_t {
        damage += config.temperature_damage;
    }
    if fish.hunger >= config.starvation_hunger {
        damage += config.starvation_damage;
    }
    if damage > 0.0 { damage } else { -config.recovery_rate }
}

fn is_hungry(fish: &Fish, config: &FishConfig) -> bool {
    fish.hunger > config.eat_threshold
}

/// Fraction of a full ration each hungry fish gets this hour (0-1).
pub fn ration_share(state: &SimulationState, config: &FishConfig) -> f64 {
    let demand: f64 = state
        .fish
        .iter()
        .filter(|f| is_hungry(f, config))
        .map(|f| f.mass * config.ration_fraction)
        .sum();
    if demand <= 0.0 {
        return 0.0;
    }
    (state.resources.food / demand).clamp(0.0, 1.0)
}

/// Active-tier fish metabolism system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FishMetabolism;

impl System for FishMetabolism {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn tier(&self) -> Tier {
        Tier::Active
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect> {
        if state.fish.is_empty() {
            return Vec::new();
        }
        let fc = &config.fish;
        let share = ration_share(state, fc);
        let mut effects = Vec::with_capacity(state.fish.len().saturating_mul(3).saturating_add(4));
        let mut eaten_total = 0.0;
        let mut o2_mg = 0.0;
        let breathing = q10_factor(fc.q10, state.resources.temperature, fc.reference_temperature);

        for fish in &state.fish {
            let mut hunger = fc.hunger_rate;
            if is_hungry(fish, fc) && share > 0.0 {
                eaten_total += fish.mass * fc.ration_fraction * share;
                hunger -= fc.satiation_per_ration * share;
            }
            o2_mg += fish.mass * fc.o2_per_gram * breathing;

            effects.push(Effect::organism(
                Tier::Active,
                EffectTarget::FishHunger(fish.id),
                hunger,
                SOURCE,
            ));
            effects.push(Effect::organism(
                Tier::Active,
                EffectTarget::FishHealth(fish.id),
                -stress(fish, state, fc),
                SOURCE,
            ));
            effects.push(Effect::organism(
                Tier::Active,
                EffectTarget::FishAge(fish.id),
                1.0,
                SOURCE,
            ));
        }

        if eaten_total > 0.0 {
            effects.push(Effect::resource(Tier::Active, ResourceKey::Food, -eaten_total, SOURCE));
            effects.push(Effect::resource(
                Tier::Active,
                ResourceKey::Waste,
                eaten_total * fc.excretion_fraction,
                SOURCE,
            ));
        }

        let volume = state.resources.water;
        if volume > 0.0 && o2_mg > 0.0 {
            effects.push(Effect::resource(Tier::Active, ResourceKey::Oxygen, -o2_mg / volume, SOURCE));
            effects.push(Effect::resource(
                Tier::Active,
                ResourceKey::Co2,
                o2_mg * fc.co2_per_o2 / volume,
                SOURCE,
            ));
        }
        effects
    }
}

/// Remove every fish whose health reached 0.
///
/// The body mass of each dead fish is added to the waste and a warning is
/// written to the log.
pub fn remove_dead(state: SimulationState) -> SimulationState {
    if state.fish.iter().all(|f| f.health > 0.0) {
        return state;
    }
    let mut next = state;
    let (alive, dead): (Vec<Fish>, Vec<Fish>) =
        next.fish.into_iter().partition(|f| f.health > 0.0);
    next.fish = alive;
    for fish in dead {
        next.resources.waste += fish.mass;
        info!(tick = next.tick, fish_id = %fish.id, species = fish.species.key(), "fish died");
        next.log(
            LogSource::Simulation,
            Severity::Warning,
            format!("A {} has died.", fish.species.common_name()),
        );
    }
    next
}
