//! Effects: the only way systems and controllers change state.
//!
//! A system never writes to the state it reads. It returns a list of
//! [`Effect`]s, each naming a target and a signed delta, and the tick
//! orchestrator folds them into a new state with [`apply_effects`].
//!
//! Deltas aimed at the same target are summed first and the target is
//! clamped once, so the effects produced within one tier commute: their
//! order never changes the result.

use std::collections::BTreeMap;

use aquarium_types::{FishId, PlantId, ResourceKey, SimulationState, Tier};

use crate::registry;

/// Largest plant size, in percent.
pub const PLANT_SIZE_MAX: f64 = 200.0;

/// Upper bound of fish hunger and health.
pub const FISH_SCALE_MAX: f64 = 100.0;

/// What an effect changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EffectTarget {
    /// A tank resource.
    Resource(ResourceKey),
    /// The size of one plant.
    PlantSize(PlantId),
    /// The hunger of one fish.
    FishHunger(FishId),
    /// The health of one fish.
    FishHealth(FishId),
    /// The age of one fish.
    FishAge(FishId),
}

/// A signed change to one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    /// Tier of the producer.
    pub tier: Tier,
    /// What to change.
    pub target: EffectTarget,
    /// Amount to add (negative to remove).
    pub delta: f64,
    /// Name of the producing system or controller.
    pub source: &'static str,
}

impl Effect {
    /// An effect on a tank resource.
    pub const fn resource(tier: Tier, key: ResourceKey, delta: f64, source: &'static str) -> Self {
        Self {
            tier,
            target: EffectTarget::Resource(key),
            delta,
            source,
        }
    }

    /// An effect on an organism attribute.
    pub const fn organism(
        tier: Tier,
        target: EffectTarget,
        delta: f64,
        source: &'static str,
    ) -> Self {
        Self {
            tier,
            target,
            delta,
            source,
        }
    }
}

/// Sum effect deltas per target. Non-finite deltas are dropped.
pub fn aggregate(effects: &[Effect]) -> BTreeMap<EffectTarget, f64> {
    let mut totals = BTreeMap::new();
    for effect in effects {
        if !effect.delta.is_finite() {
            tracing::debug!(source = effect.source, "dropping non-finite effect delta");
            continue;
        }
        *totals.entry(effect.target).or_insert(0.0) += effect.delta;
    }
    totals
}

/// Apply a batch of effects to a state, returning the new state.
///
/// Each target is read, shifted by the sum of its deltas and clamped into
/// its bounds: registry bounds for resources (tank capacity for water),
/// `0..=200` for plant size, `0..=100` for hunger and health, `>= 0` for
/// age. Effects aimed at organisms no longer in the tank are ignored.
pub fn apply_effects(state: &SimulationState, effects: &[Effect]) -> SimulationState {
    let mut next = state.clone();
    let capacity = next.tank.capacity;

    for (target, delta) in aggregate(effects) {
        match target {
            EffectTarget::Resource(key) => {
                let value = next.resources.get(key) + delta;
                next.resources
                    .set(key, registry::definition(key).clamp(value, capacity));
            }
            EffectTarget::PlantSize(id) => {
                if let Some(plant) = next.plants.iter_mut().find(|p| p.id == id) {
                    plant.size = (plant.size + delta).min(PLANT_SIZE_MAX).max(0.0);
                }
            }
            EffectTarget::FishHunger(id) => {
                if let Some(fish) = next.fish.iter_mut().find(|f| f.id == id) {
                    fish.hunger = (fish.hunger + delta).min(FISH_SCALE_MAX).max(0.0);
                }
            }
            EffectTarget::FishHealth(id) => {
                if let Some(fish) = next.fish.iter_mut().find(|f| f.id == id) {
                    fish.health = (fish.health + delta).min(FISH_SCALE_MAX).max(0.0);
                }
            }
            EffectTarget::FishAge(id) => {
                if let Some(fish) = next.fish.iter_mut().find(|f| f.id == id) {
                    fish.age = (fish.age + delta).max(0.0);
                }
            }
        }
    }

    next
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::test_support::sample_state;

    fn fx(key: ResourceKey, delta: f64) -> Effect {
        Effect::resource(Tier::Passive, key, delta, "test")
    }

    #[test]
    fn empty_effect_list_is_identity() {
        let state = sample_state(100.0);
        assert_eq!(apply_effects(&state, &[]), state);
    }

    #[test]
    fn deltas_accumulate() {
        let state = sample_state(100.0);
        let next = apply_effects(
            &state,
            &[fx(ResourceKey::Waste, 0.5), fx(ResourceKey::Waste, 0.25)],
        );
        assert!((next.resources.waste - 0.75).abs() < 1e-12);
    }

    #[test]
    fn water_is_clamped_to_capacity() {
        let state = sample_state(100.0);
        let next = apply_effects(&state, &[fx(ResourceKey::Water, 50.0)]);
        assert!((next.resources.water - 100.0).abs() < f64::EPSILON);
        let drained = apply_effects(&state, &[fx(ResourceKey::Water, -500.0)]);
        assert!(drained.resources.water.abs() < f64::EPSILON);
    }

    #[test]
    fn same_target_effects_commute() {
        let mut state = sample_state(100.0);
        state.resources.algae = 99.0;
        let a = apply_effects(&state, &[fx(ResourceKey::Algae, 5.0), fx(ResourceKey::Algae, -5.0)]);
        let b = apply_effects(&state, &[fx(ResourceKey::Algae, -5.0), fx(ResourceKey::Algae, 5.0)]);
        assert!((a.resources.algae - 99.0).abs() < 1e-12);
        assert_eq!(a, b);
    }

    #[test]
    fn every_resource_stays_in_bounds() {
        let state = sample_state(60.0);
        for key in ResourceKey::ALL {
            let def = registry::definition(key);
            for delta in [-1.0e9, -1.0, 0.0, 1.0, 1.0e9] {
                let next = apply_effects(&state, &[fx(key, delta)]);
                let value = next.resources.get(key);
                assert!(value >= def.bounds.min, "{key} below min after {delta}");
                assert!(value <= def.effective_max(60.0), "{key} above max after {delta}");
            }
        }
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let state = sample_state(100.0);
        let next = apply_effects(&state, &[fx(ResourceKey::Oxygen, f64::NAN)]);
        assert_eq!(next, state);
    }

    #[test]
    fn organism_targets_are_clamped() {
        let state = sample_state(100.0);
        let fish_id = state.fish[0].id;
        let plant_id = state.plants[0].id;
        let next = apply_effects(
            &state,
            &[
                Effect::organism(Tier::Active, EffectTarget::FishHealth(fish_id), 500.0, "test"),
                Effect::organism(Tier::Active, EffectTarget::FishHunger(fish_id), -500.0, "test"),
                Effect::organism(Tier::Active, EffectTarget::PlantSize(plant_id), 500.0, "test"),
                Effect::organism(Tier::Active, EffectTarget::FishAge(fish_id), 1.0, "test"),
            ],
        );
        assert!((next.fish[0].health - 100.0).abs() < f64::EPSILON);
        assert!(next.fish[0].hunger.abs() < f64::EPSILON);
        assert!((next.plants[0].size - PLANT_SIZE_MAX).abs() < f64::EPSILON);
        assert!((next.fish[0].age - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_organism_is_ignored() {
        let state = sample_state(100.0);
        let next = apply_effects(
            &state,
            &[Effect::organism(
                Tier::Active,
                EffectTarget::FishHealth(FishId::new()),
                -10.0,
                "test",
            )],
        );
        assert_eq!(next, state);
    }
}
