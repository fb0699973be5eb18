//! The simulated tank: resources, effects, processes and equipment.
//!
//! This crate holds everything that changes a [`SimulationState`] during a
//! tick, expressed as pure functions. Nothing here performs I/O or draws
//! random numbers.
//!
//! # Modules
//!
//! - [`registry`] -- Bounds, defaults and display metadata per resource.
//! - [`effects`] -- [`Effect`] and [`apply_effects`], the only write path
//!   used by systems and controllers.
//! - [`systems`] -- Chemistry and biology processes behind the [`System`]
//!   trait, grouped by tier.
//! - [`equipment`] -- Active [`Controller`]s and the passive device model.
//! - [`chemistry`] -- Gas solubility, Q10 scaling, water blending.
//! - [`config`] -- [`TunableConfig`], every constant the processes use.
//! - [`tank`] -- Tank geometry from capacity.
//! - [`schedule`] -- Daily windows that wrap past midnight.
//! - [`setup`] -- The tick-0 state of a new tank.
//! - [`error`] -- [`WorldError`].
//!
//! [`SimulationState`]: aquarium_types::SimulationState

pub mod chemistry;
pub mod config;
pub mod effects;
pub mod equipment;
pub mod error;
pub mod registry;
pub mod schedule;
pub mod setup;
pub mod systems;
pub mod tank;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::TunableConfig;
pub use effects::{Effect, EffectTarget, apply_effects};
pub use equipment::{Controller, ControllerOutput, ControllerPass, ControllerRegistry};
pub use error::WorldError;
pub use registry::{ResourceDefinition, definition};
pub use schedule::is_schedule_active;
pub use setup::{DEFAULT_ENVIRONMENT, initial_state};
pub use systems::{System, SystemRegistry};
