//! Scheduled auto-feeder.
//!
//! Dispenses once per day at its feeding hour. `fed_today` is cleared at
//! hour 0, so a feeding hour of 0 still fires.

use aquarium_types::{ResourceKey, SimulationState, Tier};

use crate::config::TunableConfig;
use crate::effects::Effect;
use crate::equipment::{Controller, ControllerOutput, equipment_log};

/// Whether the feeder fires at the state's current hour.
pub fn should_feed(state: &SimulationState) -> bool {
    let feeder = &state.equipment.auto_feeder;
    let hour = state.hour_of_day();
    let fed_today = feeder.fed_today && hour != 0;
    feeder.enabled && feeder.amount > 0.0 && hour == u64::from(feeder.feeding_hour) && !fed_today
}

/// Auto-feeder controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoFeederController;

impl Controller for AutoFeederController {
    fn name(&self) -> &'static str {
        "auto_feeder"
    }

    fn update(&self, state: &SimulationState, _config: &TunableConfig) -> ControllerOutput {
        if !should_feed(state) {
            return ControllerOutput::off();
        }
        let amount = state.equipment.auto_feeder.amount;
        ControllerOutput {
            effects: vec![Effect::resource(Tier::Immediate, ResourceKey::Food, amount, self.name())],
            is_on: true,
            log: Some(equipment_log(
                state,
                format!("Auto-feeder dispensed {amount:.2} g of food."),
            )),
        }
    }

    fn apply_state_change(&self, mut state: SimulationState, is_on: bool) -> SimulationState {
        let hour = state.hour_of_day();
        let feeder = &mut state.equipment.auto_feeder;
        if hour == 0 {
            feeder.fed_today = false;
        }
        feeder.is_on = is_on;
        if is_on {
            feeder.fed_today = true;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_state;

    fn armed(tick: u64, feeding_hour: u8) -> SimulationState {
        let mut state = sample_state(100.0);
        state.tick = tick;
        state.equipment.auto_feeder.enabled = true;
        state.equipment.auto_feeder.amount = 0.3;
        state.equipment.auto_feeder.feeding_hour = feeding_hour;
        state.equipment.auto_feeder.fed_today = false;
        state
    }

    #[test]
    fn feeds_once_at_feeding_hour() {
        let state = armed(8, 8);
        let output = AutoFeederController.update(&state, &TunableConfig::default());
        assert!(output.is_on);
        let next = AutoFeederController.apply_state_change(state, true);
        assert!(next.equipment.auto_feeder.fed_today);
        assert!(!should_feed(&next));
        assert!(output.log.is_some());
        let again = AutoFeederController.apply_state_change(next.clone(), true);
        assert_eq!(again, next);
    }

    #[test]
    fn other_hours_are_idle() {
        assert!(!should_feed(&armed(9, 8)));
    }

    #[test]
    fn flag_resets_at_midnight() {
        let mut state = armed(24, 8);
        state.equipment.auto_feeder.fed_today = true;
        let next = AutoFeederController.apply_state_change(state, false);
        assert!(!next.equipment.auto_feeder.fed_today);
    }

    #[test]
    fn midnight_feeding_fires_despite_stale_flag() {
        let mut state = armed(48, 0);
        state.equipment.auto_feeder.fed_today = true;
        assert!(should_feed(&state));
    }
}
