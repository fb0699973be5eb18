//! Shared type definitions for the aquarium simulation.
//!
//! This crate is the single source of truth for the state shape consumed by
//! the engine, the action layer, persistence and the display layer. Types
//! flow downstream to `TypeScript` via `ts-rs` so a dashboard can render the
//! state without re-declaring it.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for fish, plants and hardscape
//! - [`enums`] -- Resource keys, tiers, log metadata, alert kinds, equipment variants
//! - [`species`] -- Fish and plant species with their biological constants
//! - [`structs`] -- [`SimulationState`] and its sections

pub mod enums;
pub mod ids;
pub mod species;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AlertKind, FilterType, HardscapeType, LidType, LogSource, ResourceKey, Severity,
    SubstrateType, Tier,
};
pub use ids::{FishId, HardscapeId, PlantId};
pub use species::{FishSex, FishSpecies, PlantSpecies};
pub use structs::{
    AirPump, AlertState, AutoFeeder, AutoTopOff, Co2Generator, DailySchedule, Environment,
    Equipment, Filter, Fish, Hardscape, HardscapeItem, Heater, Lid, Light, LogEntry,
    MAX_LOG_ENTRIES, Plant, Powerhead, Resources, SimulationState, Substrate, Tank,
};
