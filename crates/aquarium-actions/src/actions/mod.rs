//! Operator actions and the dispatch from an [`Action`] to its handler.
//!
//! # Submodules
//!
//! - [`validation`] -- Preconditions and input normalization per action.
//! - [`handlers`] -- Execution logic for each action.

pub mod handlers;
pub mod validation;

use aquarium_types::{FishId, PlantId, SimulationState};
use aquarium_world::TunableConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ActionError;
use handlers::HandlerResult;

/// Something the keeper does to the tank between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    /// Drop food into the tank.
    Feed {
        /// Grams of food, rounded to two decimals.
        amount: f64,
    },
    /// Replace a fraction of the water with tap water.
    WaterChange {
        /// Share of the water to replace, in `(0, 1]`.
        fraction: f64,
    },
    /// Cut every plant above `target` percent back to `target`.
    TrimPlants {
        /// 50, 85 or 100.
        target: u32,
    },
    /// Add an adult fish.
    AddFish {
        /// Species key, e.g. `neon_tetra`.
        species: String,
    },
    /// Take a fish out.
    RemoveFish {
        /// The fish to remove.
        id: FishId,
    },
    /// Refill evaporated water with tap water.
    TopOff,
    /// Scrub algae off the glass.
    ScrubAlgae {
        /// Share of algae removed (10-30%). Drawn at random when absent.
        #[serde(default)]
        percent: Option<f64>,
    },
    /// Plant a new specimen.
    AddPlant {
        /// Species key, e.g. `java_fern`.
        species: String,
    },
    /// Pull a plant out.
    RemovePlant {
        /// The plant to remove.
        id: PlantId,
    },
    /// Dose liquid fertilizer.
    Dose {
        /// Dose in mL.
        millilitres: f64,
    },
}

impl Action {
    /// Short name used in logs and traces.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Feed { .. } => "feed",
            Self::WaterChange { .. } => "water_change",
            Self::TrimPlants { .. } => "trim_plants",
            Self::AddFish { .. } => "add_fish",
            Self::RemoveFish { .. } => "remove_fish",
            Self::TopOff => "top_off",
            Self::ScrubAlgae { .. } => "scrub_algae",
            Self::AddPlant { .. } => "add_plant",
            Self::RemovePlant { .. } => "remove_plant",
            Self::Dose { .. } => "dose",
        }
    }
}

/// Result of applying an action.
///
/// A rejected action carries the unchanged input state and the rejection
/// reason as its message.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    /// State after the action.
    pub state: SimulationState,
    /// Message for the keeper.
    pub message: String,
    /// Whether the action changed the state.
    pub applied: bool,
}

/// Run the handler for `action` without converting rejections.
pub fn dispatch<R: Rng + ?Sized>(
    state: &SimulationState,
    action: &Action,
    config: &TunableConfig,
    rng: &mut R,
) -> Result<HandlerResult, ActionError> {
    match action {
        Action::Feed { amount } => handlers::feed(state, *amount),
        Action::WaterChange { fraction } => handlers::water_change(state, *fraction, config),
        Action::TrimPlants { target } => handlers::trim_plants(state, *target),
        Action::AddFish { species } => handlers::add_fish(state, species, config, rng),
        Action::RemoveFish { id } => handlers::remove_fish(state, *id),
        Action::TopOff => handlers::top_off(state),
        Action::ScrubAlgae { percent } => handlers::scrub_algae(state, *percent, rng),
        Action::AddPlant { species } => handlers::add_plant(state, species, config),
        Action::RemovePlant { id } => handlers::remove_plant(state, *id),
        Action::Dose { millilitres } => handlers::dose(state, *millilitres, config),
    }
}

/// Apply an action with explicit tunables and randomness.
///
/// Never fails: a rejected action returns the input state unchanged,
/// `applied == false` and the rejection as the message.
pub fn execute<R: Rng + ?Sized>(
    state: &SimulationState,
    action: &Action,
    config: &TunableConfig,
    rng: &mut R,
) -> ActionOutcome {
    match dispatch(state, action, config, rng) {
        Ok(HandlerResult { state, message }) => {
            info!(tick = state.tick, action = action.name(), %message, "action applied");
            ActionOutcome {
                state,
                message,
                applied: true,
            }
        }
        Err(e) => {
            debug!(tick = state.tick, action = action.name(), error = %e, "action rejected");
            ActionOutcome {
                state: state.clone(),
                message: e.to_string(),
                applied: false,
            }
        }
    }
}

/// Apply an action with the default tunables and the given randomness.
pub fn apply_action_with_rng<R: Rng + ?Sized>(
    state: &SimulationState,
    action: &Action,
    rng: &mut R,
) -> ActionOutcome {
    execute(state, action, &TunableConfig::default(), rng)
}

/// Apply an action with the default tunables and thread-local randomness.
///
/// Only [`Action::AddFish`] and [`Action::ScrubAlgae`] without a percent
/// draw random numbers; use [`apply_action_with_rng`] to make them
/// reproducible.
pub fn apply_action(state: &SimulationState, action: &Action) -> ActionOutcome {
    apply_action_with_rng(state, action, &mut rand::rng())
}
