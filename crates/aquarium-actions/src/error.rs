//! Error types for the `aquarium-actions` crate.
//!
//! Every variant is a reason to reject an operator action. The `Display`
//! text is shown to the keeper verbatim, so it reads as a sentence rather
//! than a diagnostic.

use aquarium_types::{FishId, PlantId};

/// Reasons an action is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    /// Feed amount was zero, negative, non-finite or rounds to zero.
    #[error("Cannot feed: amount must be positive (got {amount})")]
    InvalidFeedAmount {
        /// The rejected amount in grams.
        amount: f64,
    },

    /// Water change fraction outside `(0, 1]`.
    #[error("Cannot change water: fraction must be greater than 0 and at most 1 (got {fraction})")]
    InvalidWaterChangeFraction {
        /// The rejected fraction.
        fraction: f64,
    },

    /// Water change requested on an empty tank.
    #[error("Cannot change water: the tank is empty")]
    EmptyTank,

    /// Trim target is not one of the supported sizes.
    #[error("Cannot trim plants: target must be 50, 85 or 100 (got {target})")]
    InvalidTrimTarget {
        /// The rejected target size in percent.
        target: u32,
    },

    /// No plant is larger than the trim target.
    #[error("Nothing to trim: no plant is larger than {target}%")]
    NothingToTrim {
        /// The requested target size in percent.
        target: u32,
    },

    /// Unknown fish species key.
    #[error("Cannot add fish: unknown species '{species}'")]
    UnknownFishSpecies {
        /// The rejected key.
        species: String,
    },

    /// Unknown plant species key.
    #[error("Cannot add plant: unknown species '{species}'")]
    UnknownPlantSpecies {
        /// The rejected key.
        species: String,
    },

    /// No fish with the given id lives in the tank.
    #[error("Fish {id} not found")]
    FishNotFound {
        /// The requested fish.
        id: FishId,
    },

    /// No plant with the given id grows in the tank.
    #[error("Plant {id} not found")]
    PlantNotFound {
        /// The requested plant.
        id: PlantId,
    },

    /// Top-off requested on a full tank.
    #[error("Cannot top off: the tank is already full")]
    AlreadyFull,

    /// Scrub requested with no algae present.
    #[error("Cannot scrub: there is no algae")]
    NoAlgae,

    /// Scrub percentage is not a number.
    #[error("Cannot scrub: percent must be a number (got {percent})")]
    InvalidScrubPercent {
        /// The rejected percentage.
        percent: f64,
    },

    /// Fertilizer dose was zero, negative or non-finite.
    #[error("Cannot dose: amount must be positive (got {millilitres} mL)")]
    InvalidDose {
        /// The rejected dose.
        millilitres: f64,
    },
}
