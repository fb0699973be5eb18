//! Tick cycle: one simulated hour.
//!
//! Each tick runs these phases against the previous state and returns a new
//! one:
//!
//! 1. **Clock** -- advance the tick counter, recompute the passive values
//!    (surface, flow, light, aeration) and passive device flags.
//! 2. **Immediate** -- immediate-tier systems, then the equipment
//!    controllers on the updated state. Each controller's on/off decision
//!    is written back to its device and its log lines are appended.
//! 3. **Active** -- active-tier systems, then dead fish are removed.
//! 4. **Passive** -- passive-tier systems.
//! 5. **Alerts** -- threshold alerts on the final state.
//!
//! Systems of one tier all read the same snapshot and their effects are
//! summed per target before clamping, so the order of systems inside a
//! tier does not matter. The order of the tiers does. The tick is
//! deterministic: no randomness, no clock, no I/O.

use aquarium_types::{SimulationState, Tier};
use aquarium_world::equipment::passive::apply_passive;
use aquarium_world::systems::fish::remove_dead;
use aquarium_world::{ControllerRegistry, SystemRegistry, TunableConfig, apply_effects};
use tracing::{debug, trace};

use crate::alerts::AlertRegistry;

/// Errors that prevent a tick from producing a new state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TickError {
    /// The tick counter is already at its maximum.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// The input state cannot be simulated.
    #[error("invalid state: {reason}")]
    InvalidState {
        /// What is wrong with the state.
        reason: String,
    },
}

/// The processes, controllers and alerts of a simulation, built once.
#[derive(Debug, Default)]
pub struct Engine {
    /// Chemistry and biology systems.
    pub systems: SystemRegistry,
    /// Active equipment controllers.
    pub controllers: ControllerRegistry,
    /// Threshold alerts.
    pub alerts: AlertRegistry,
}

impl Engine {
    /// Assemble an engine from its registries.
    pub const fn new(
        systems: SystemRegistry,
        controllers: ControllerRegistry,
        alerts: AlertRegistry,
    ) -> Self {
        Self {
            systems,
            controllers,
            alerts,
        }
    }

    /// Engine with every built-in system, controller and alert.
    pub fn standard() -> Self {
        Self::new(
            SystemRegistry::standard(),
            ControllerRegistry::standard(),
            AlertRegistry::standard(),
        )
    }

    /// Advance `state` by one hour.
    pub fn tick(
        &self,
        state: &SimulationState,
        config: &TunableConfig,
    ) -> Result<SimulationState, TickError> {
        validate(state)?;
        let mut next = state.clone();
        next.tick = state.tick.checked_add(1).ok_or(TickError::TickOverflow)?;
        let next = apply_passive(next);
        debug!(tick = next.tick, hour = next.hour_of_day(), "tick start");

        let next = self.run_tier(Tier::Immediate, next, config);
        let next = self.run_controllers(next, config);

        let next = self.run_tier(Tier::Active, next, config);
        let next = remove_dead(next);

        let mut next = self.run_tier(Tier::Passive, next, config);

        let (latches, logs) = self.alerts.run(&next);
        next.alert_state = latches;
        next.push_logs(logs);

        debug!(
            tick = next.tick,
            fish = next.fish.len(),
            plants = next.plants.len(),
            water = next.resources.water,
            "tick complete"
        );
        Ok(next)
    }

    fn run_tier(&self, tier: Tier, state: SimulationState, config: &TunableConfig) -> SimulationState {
        let effects = self.systems.run_tier(tier, &state, config);
        if effects.is_empty() {
            return state;
        }
        trace!(tick = state.tick, ?tier, effects = effects.len(), "applying tier");
        apply_effects(&state, &effects)
    }

    fn run_controllers(&self, state: SimulationState, config: &TunableConfig) -> SimulationState {
        let pass = self.controllers.run(&state, config);
        let mut next = if pass.effects.is_empty() {
            state
        } else {
            apply_effects(&state, &pass.effects)
        };
        for (controller, is_on) in pass.decisions {
            next = controller.apply_state_change(next, is_on);
        }
        next.push_logs(pass.logs);
        next
    }
}

fn validate(state: &SimulationState) -> Result<(), TickError> {
    let capacity = state.tank.capacity;
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(TickError::InvalidState {
            reason: format!("tank capacity must be positive and finite (got {capacity})"),
        });
    }
    Ok(())
}
