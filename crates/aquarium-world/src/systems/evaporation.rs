//! Evaporative water loss.
//!
//! The daily rate doubles for every `doubling_interval` degrees above the
//! reference temperature and is scaled by the lid.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::equipment::passive::lid_evaporation_multiplier;
use crate::systems::System;

/// Hours per day.
const HOURS_PER_DAY: f64 = 24.0;

/// Fraction of the volume lost per day at `temperature`, ignoring the lid.
pub fn daily_rate(temperature: f64, config: &TunableConfig) -> f64 {
    let ec = &config.evaporation;
    ec.base_rate_per_day * 2f64.powf((temperature - ec.reference_temperature) / ec.doubling_interval)
}

/// Liters lost this hour.
pub fn hourly_loss(state: &SimulationState, config: &TunableConfig) -> f64 {
    let volume = state.resources.water;
    if volume <= 0.0 {
        return 0.0;
    }
    let lid = lid_evaporation_multiplier(state.equipment.lid.lid_type);
    volume * daily_rate(state.resources.temperature, config) / HOURS_PER_DAY * lid
}

/// Immediate-tier evaporation system.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaporation;

impl System for Evaporation {
    fn name(&self) -> &'static str {
        "evaporation"
    }

    fn tier(&self) -> Tier {
        Tier::Immediate
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect> {
        let loss = hourly_loss(state, config);
        if loss <= 0.0 {
            return Vec::new();
        }
        vec![Effect::resource(Tier::Immediate, ResourceKey::Water, -loss, self.name())]
    }
}

#[cfg(test)]
mod tests {
    use aquarium_types::LidType;

    use super::*;
    use crate::test_support::sample_state;

    #[test]
    fn one_percent_per_day_at_reference() {
        let mut state = sample_state(100.0);
        state.resources.temperature = 25.0;
        state.equipment.lid.lid_type = LidType::None;
        let loss = hourly_loss(&state, &TunableConfig::default());
        assert!((loss - 1.0 / 24.0).abs() < 1e-9, "got {loss}");
    }

    #[test]
    fn rate_doubles_per_interval() {
        let config = TunableConfig::default();
        let warm = daily_rate(25.0 + config.evaporation.doubling_interval, &config);
        assert!((warm - 0.02).abs() < 1e-12);
    }

    #[test]
    fn lid_reduces_loss() {
        let config = TunableConfig::default();
        let mut open = sample_state(100.0);
        open.equipment.lid.lid_type = LidType::None;
        let mut covered = open.clone();
        covered.equipment.lid.lid_type = LidType::Full;
        let mut sealed = open.clone();
        sealed.equipment.lid.lid_type = LidType::Sealed;

        let open_loss = hourly_loss(&open, &config);
        assert!((hourly_loss(&covered, &config) - open_loss * 0.25).abs() < 1e-12);
        assert!(Evaporation.update(&sealed, &config).is_empty());
    }
}
