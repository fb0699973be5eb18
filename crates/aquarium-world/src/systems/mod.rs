//! Chemistry and biology systems.
//!
//! A [`System`] is a pure function from a state snapshot to a list of
//! [`Effect`]s, tagged with the [`Tier`] in which the orchestrator applies
//! them. Systems never see each other's output within a tier: every system
//! of a tier reads the same snapshot and their effects are applied together.
//!
//! The [`SystemRegistry`] is an explicit, immutable list built once when the
//! engine starts. Tier order is fixed by the orchestrator; registration
//! order only matters for tracing output.

pub mod algae;
pub mod decay;
pub mod evaporation;
pub mod fish;
pub mod gas_exchange;
pub mod nitrogen;
pub mod photosynthesis;
pub mod plant_growth;
pub mod respiration;
pub mod temperature;

use aquarium_types::{SimulationState, Tier};
use tracing::trace;

use crate::config::TunableConfig;
use crate::effects::Effect;

/// A process that turns a state snapshot into effects.
///
/// Implementations must be deterministic: the same state and config always
/// produce the same effects.
pub trait System: core::fmt::Debug + Send + Sync {
    /// Stable name, used as the [`Effect::source`] of every produced effect.
    fn name(&self) -> &'static str;

    /// Tier in which the orchestrator applies this system's effects.
    fn tier(&self) -> Tier;

    /// Compute this hour's effects.
    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect>;
}

/// Ordered collection of systems.
#[derive(Debug, Default)]
pub struct SystemRegistry {
    systems: Vec<Box<dyn System>>,
}

impl SystemRegistry {
    /// Build a registry from an explicit list.
    pub fn new(systems: Vec<Box<dyn System>>) -> Self {
        Self { systems }
    }

    /// Every built-in system.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(temperature::TemperatureDrift),
            Box::new(evaporation::Evaporation),
            Box::new(photosynthesis::Photosynthesis),
            Box::new(respiration::Respiration),
            Box::new(plant_growth::PlantGrowth),
            Box::new(fish::FishMetabolism),
            Box::new(decay::Decay),
            Box::new(nitrogen::NitrogenCycle),
            Box::new(gas_exchange::GasExchange),
            Box::new(algae::AlgaeGrowth),
        ])
    }

    /// Number of registered systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Iterate over the registered systems.
    pub fn iter(&self) -> impl Iterator<Item = &dyn System> {
        self.systems.iter().map(AsRef::as_ref)
    }

    /// Run every system of `tier` against the same snapshot and collect
    /// their effects in registration order.
    pub fn run_tier(
        &self,
        tier: Tier,
        state: &SimulationState,
        config: &TunableConfig,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        for system in self.iter().filter(|s| s.tier() == tier) {
            let produced = system.update(state, config);
            trace!(
                tick = state.tick,
                system = system.name(),
                effects = produced.len(),
                "system update"
            );
            effects.extend(produced);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_state;

    #[test]
    fn standard_registry_covers_every_tier() {
        let registry = SystemRegistry::standard();
        assert_eq!(registry.len(), 10);
        for tier in [Tier::Immediate, Tier::Active, Tier::Passive] {
            assert!(registry.iter().any(|s| s.tier() == tier), "{tier:?} has no systems");
        }
    }

    #[test]
    fn names_are_unique() {
        let registry = SystemRegistry::standard();
        let mut names: Vec<_> = registry.iter().map(System::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn run_tier_only_emits_that_tier() {
        let registry = SystemRegistry::standard();
        let state = sample_state(100.0);
        let config = TunableConfig::default();
        for tier in [Tier::Immediate, Tier::Active, Tier::Passive] {
            let effects = registry.run_tier(tier, &state, &config);
            assert!(effects.iter().all(|e| e.tier == tier));
        }
    }

    #[test]
    fn empty_registry_produces_nothing() {
        let registry = SystemRegistry::default();
        assert!(registry.is_empty());
        let state = sample_state(100.0);
        assert!(
            registry
                .run_tier(Tier::Passive, &state, &TunableConfig::default())
                .is_empty()
        );
    }
}
