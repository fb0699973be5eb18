//! O2 and CO2 exchange with the atmosphere.
//!
//! Both gases relax toward equilibrium: O2 toward its temperature-dependent
//! saturation and CO2 toward atmospheric equilibrium. How much of the gap
//! closes each hour depends on circulation (`flow / volume` turnovers per
//! hour, saturating at `optimal_turnover`). Aeration speeds up O2 exchange,
//! injects a little O2 directly and strips CO2 faster.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::chemistry::{co2_equilibrium, o2_saturation};
use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::systems::System;

/// Fraction of the equilibrium gap closed this hour, before aeration.
pub fn exchange_rate(state: &SimulationState, config: &TunableConfig) -> f64 {
    let volume = state.resources.water;
    if volume <= 0.0 {
        return 0.0;
    }
    let gc = &config.gas_exchange;
    let turnover = state.resources.flow / volume;
    let efficiency = if gc.optimal_turnover > 0.0 {
        (turnover / gc.optimal_turnover).min(1.0)
    } else {
        1.0
    };
    gc.base_rate * efficiency
}

/// O2 and CO2 changes (mg/L) this hour.
pub fn exchange(state: &SimulationState, config: &TunableConfig) -> (f64, f64) {
    if state.resources.water <= 0.0 {
        return (0.0, 0.0);
    }
    let gc = &config.gas_exchange;
    let r = &state.resources;
    let rate = exchange_rate(state, config);
    let (o2_rate, co2_rate) = if r.aeration {
        (rate * gc.aeration_multiplier, rate * gc.aeration_co2_multiplier)
    } else {
        (rate, rate)
    };

    let saturation = o2_saturation(r.temperature);
    let mut o2 = (saturation - r.oxygen) * o2_rate.min(1.0);
    if r.aeration {
        let headroom = (saturation - (r.oxygen + o2)).max(0.0);
        o2 += gc.aeration_o2_injection.min(headroom);
    }

    let co2 = (co2_equilibrium(r.temperature, gc) - r.co2) * co2_rate.min(1.0);
    (o2, co2)
}

/// Passive-tier gas exchange system.
#[derive(Debug, Clone, Copy, Default)]
pub struct GasExchange;

impl System for GasExchange {
    fn name(&self) -> &'static str {
        "gas_exchange"
    }

    fn tier(&self) -> Tier {
        Tier::Passive
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect> {
        let (o2, co2) = exchange(state, config);
        let mut effects = Vec::new();
        if o2 != 0.0 {
            effects.push(Effect::resource(Tier::Passive, ResourceKey::Oxygen, o2, self.name()));
        }
        if co2 != 0.0 {
            effects.push(Effect::resource(Tier::Passive, ResourceKey::Co2, co2, self.name()));
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_state;

    fn circulated(flow: f64) -> SimulationState {
        let mut state = sample_state(100.0);
        state.resources.temperature = 25.0;
        state.resources.flow = flow;
        state.resources.aeration = false;
        state
    }

    #[test]
    fn full_circulation_uses_base_rate() {
        let state = circulated(600.0);
        let rate = exchange_rate(&state, &TunableConfig::default());
        assert!((rate - 0.25).abs() < 1e-12);
    }

    #[test]
    fn weak_circulation_scales_rate() {
        let state = circulated(250.0);
        let rate = exchange_rate(&state, &TunableConfig::default());
        assert!((rate - 0.125).abs() < 1e-12);
    }

    #[test]
    fn low_oxygen_rises_high_co2_falls() {
        let mut state = circulated(600.0);
        state.resources.oxygen = 4.0;
        state.resources.co2 = 25.0;
        let (o2, co2) = exchange(&state, &TunableConfig::default());
        assert!(o2 > 0.0);
        assert!(co2 < 0.0);
        // Never crosses equilibrium.
        assert!(state.resources.oxygen + o2 <= o2_saturation(25.0));
    }

    #[test]
    fn aeration_speeds_up_exchange() {
        let config = TunableConfig::default();
        let mut still = circulated(250.0);
        still.resources.oxygen = 4.0;
        still.resources.co2 = 25.0;
        let mut aerated = still.clone();
        aerated.resources.aeration = true;

        let (o2_still, co2_still) = exchange(&still, &config);
        let (o2_aerated, co2_aerated) = exchange(&aerated, &config);
        assert!(o2_aerated > o2_still * 2.0);
        assert!((co2_aerated - co2_still * 1.5).abs() < 1e-9);
    }

    #[test]
    fn empty_tank_exchanges_nothing() {
        let mut state = circulated(600.0);
        state.resources.water = 0.0;
        assert!(GasExchange.update(&state, &TunableConfig::default()).is_empty());
    }
}
