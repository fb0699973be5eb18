//! Operator actions for the aquarium simulation.
//!
//! An action is something the keeper does between ticks: feeding, water
//! changes, trimming, stocking. Every action is validated first; a rejected
//! action leaves the state untouched and explains why. Accepted actions
//! return a new state with a user log entry appended.
//!
//! # Modules
//!
//! - [`actions`] -- The [`Action`] enum, validation and handlers.
//! - [`error`] -- Rejection reasons ([`ActionError`]).

pub mod actions;
pub mod error;

pub use actions::{
    Action, ActionOutcome, apply_action, apply_action_with_rng, dispatch, execute,
};
pub use aquarium_world::chemistry::{blend_ph, blend_temperature, blend_volume};
pub use error::ActionError;
