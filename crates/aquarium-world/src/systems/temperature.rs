//! Passive temperature drift toward the room.
//!
//! Newtonian cooling: the gap to room temperature shrinks by a fixed
//! fraction each hour, scaled by `(V_ref / V)^p` so small tanks follow the
//! room faster than large ones.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::systems::System;

/// Temperature change (°C) this hour. Never overshoots room temperature.
pub fn drift(state: &SimulationState, config: &TunableConfig) -> f64 {
    let volume = state.resources.water;
    if volume <= 0.0 {
        return 0.0;
    }
    let gap = state.resources.temperature - state.environment.room_temperature;
    if gap.abs() < f64::EPSILON {
        return 0.0;
    }
    let tc = &config.temperature;
    let scale = (tc.reference_volume / volume).powf(tc.volume_exponent);
    let delta = -tc.drift_coefficient * gap * scale;
    if delta.abs() > gap.abs() { -gap } else { delta }
}

/// Immediate-tier drift system.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureDrift;

impl System for TemperatureDrift {
    fn name(&self) -> &'static str {
        "temperature_drift"
    }

    fn tier(&self) -> Tier {
        Tier::Immediate
    }

    fn update(&self, state: &SimulationState, config: &TunableConfig) -> Vec<Effect> {
        let delta = drift(state, config);
        if delta == 0.0 {
            return Vec::new();
        }
        vec![Effect::resource(Tier::Immediate, ResourceKey::Temperature, delta, self.name())]
    }
}
