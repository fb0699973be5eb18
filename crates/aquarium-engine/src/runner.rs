//! Headless fast-forward: replay scripted actions and tick the tank.

use aquarium_core::config::{EngineConfig, ScheduledAction};
use aquarium_core::{execute, tick};
use aquarium_types::{ResourceKey, SimulationState};
use aquarium_world::definition;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::error::EngineError;

/// What happened during a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// State after the last tick.
    pub state: SimulationState,
    /// Ticks advanced.
    pub ticks_run: u64,
    /// Scripted actions that changed the state.
    pub actions_applied: usize,
    /// Scripted actions that were rejected.
    pub actions_rejected: usize,
}

/// Advance `start` by `config.run.ticks` hours.
///
/// Scripted actions run on the state whose tick equals their `at_tick`,
/// before that state advances, in file order. Actions scheduled before
/// the start tick or after the last tick never run.
pub fn run_headless(start: SimulationState, config: &EngineConfig) -> Result<RunReport, EngineError> {
    let run = &config.run;
    let mut rng = SmallRng::seed_from_u64(run.seed);
    let mut state = start;
    let mut ticks_run = 0_u64;
    let mut actions_applied = 0_usize;
    let mut actions_rejected = 0_usize;

    for _ in 0..run.ticks {
        for scheduled in due(&run.actions, state.tick) {
            let outcome = execute(&state, &scheduled.action, &config.tunables, &mut rng);
            if outcome.applied {
                actions_applied = actions_applied.saturating_add(1);
            } else {
                warn!(tick = state.tick, action = scheduled.action.name(), reason = %outcome.message, "scripted action rejected");
                actions_rejected = actions_rejected.saturating_add(1);
            }
            state = outcome.state;
        }

        state = tick(&state, &config.tunables)?;
        ticks_run = ticks_run.saturating_add(1);

        if summary_due(state.tick, run.summary_interval) {
            log_summary(&state);
        }
    }

    Ok(RunReport {
        state,
        ticks_run,
        actions_applied,
        actions_rejected,
    })
}

/// Whether a summary is logged after `tick`. An interval of 0 disables them.
fn summary_due(tick: u64, interval: u64) -> bool {
    tick.checked_rem(interval) == Some(0)
}

fn due(actions: &[ScheduledAction], tick: u64) -> impl Iterator<Item = &ScheduledAction> {
    actions.iter().filter(move |a| a.at_tick == tick)
}

/// Log the headline readings of a state.
pub fn log_summary(state: &SimulationState) {
    let show = |key: ResourceKey| definition(key).format(state.resources.get(key), state.resources.water);
    info!(
        tick = state.tick,
        day = state.tick / 24,
        fish = state.fish.len(),
        plants = state.plants.len(),
        water = %show(ResourceKey::Water),
        temperature = %show(ResourceKey::Temperature),
        ph = %show(ResourceKey::Ph),
        oxygen = %show(ResourceKey::Oxygen),
        ammonia = %show(ResourceKey::Ammonia),
        nitrite = %show(ResourceKey::Nitrite),
        nitrate = %show(ResourceKey::Nitrate),
        algae = %show(ResourceKey::Algae),
        "Tank summary"
    );
}
