//! Enumeration types for the aquarium simulation.
//!
//! Resource keys, processing tiers, log metadata, alert kinds and the
//! equipment model variants. Species enumerations live in [`crate::species`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A tracked numeric quantity of the tank.
///
/// Every key maps to exactly one field of [`crate::Resources`] and one entry
/// in the resource registry. Nitrogen compounds and nutrients are stored as
/// absolute mass (mg); concentrations are derived from the water volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ResourceKey {
    /// Water volume in liters.
    Water,
    /// Water temperature in °C.
    Temperature,
    /// Acidity, 0-14.
    Ph,
    /// Dissolved oxygen in mg/L.
    Oxygen,
    /// Dissolved carbon dioxide in mg/L.
    Co2,
    /// Ammonia mass in mg.
    Ammonia,
    /// Nitrite mass in mg.
    Nitrite,
    /// Nitrate mass in mg.
    Nitrate,
    /// Phosphate mass in mg.
    Phosphate,
    /// Potassium mass in mg.
    Potassium,
    /// Iron mass in mg.
    Iron,
    /// Uneaten food in grams.
    Food,
    /// Organic waste in grams.
    Waste,
    /// Algae coverage on a relative 0-100 scale.
    Algae,
    /// Ammonia-oxidizing bacteria population.
    Aob,
    /// Nitrite-oxidizing bacteria population.
    Nob,
    /// Colonizable surface area in cm² (tick-derived).
    Surface,
    /// Water flow in L/h (tick-derived).
    Flow,
    /// Light output in watts (tick-derived).
    Light,
}

impl ResourceKey {
    /// Every resource key, in registry order.
    pub const ALL: [Self; 19] = [
        Self::Water,
        Self::Temperature,
        Self::Ph,
        Self::Oxygen,
        Self::Co2,
        Self::Ammonia,
        Self::Nitrite,
        Self::Nitrate,
        Self::Phosphate,
        Self::Potassium,
        Self::Iron,
        Self::Food,
        Self::Waste,
        Self::Algae,
        Self::Aob,
        Self::Nob,
        Self::Surface,
        Self::Flow,
        Self::Light,
    ];

    /// Resources dissolved in the water column and stored as mass.
    ///
    /// A water change removes the same fraction of each of these.
    pub const DISSOLVED_MASS: [Self; 6] = [
        Self::Ammonia,
        Self::Nitrite,
        Self::Nitrate,
        Self::Phosphate,
        Self::Potassium,
        Self::Iron,
    ];

    /// Stable `snake_case` key used in logs and save files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Temperature => "temperature",
            Self::Ph => "ph",
            Self::Oxygen => "oxygen",
            Self::Co2 => "co2",
            Self::Ammonia => "ammonia",
            Self::Nitrite => "nitrite",
            Self::Nitrate => "nitrate",
            Self::Phosphate => "phosphate",
            Self::Potassium => "potassium",
            Self::Iron => "iron",
            Self::Food => "food",
            Self::Waste => "waste",
            Self::Algae => "algae",
            Self::Aob => "aob",
            Self::Nob => "nob",
            Self::Surface => "surface",
            Self::Flow => "flow",
            Self::Light => "light",
        }
    }
}

impl core::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Processing tiers
// ---------------------------------------------------------------------------

/// Ordering class that controls when a system's effects apply within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Tier {
    /// Environmental drift (temperature, evaporation), followed by equipment.
    Immediate,
    /// Living processes (photosynthesis, respiration, growth, fish).
    Active,
    /// Natural background processes (decay, nitrogen cycle, gas exchange, algae).
    Passive,
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

/// Severity of an operator-facing log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Severity {
    /// Something notable happened.
    Info,
    /// Something needs the keeper's attention.
    Warning,
}

/// Who produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum LogSource {
    /// An operator action.
    User,
    /// The alert layer.
    Alert,
    /// A simulation process (deaths, overgrowth).
    Simulation,
    /// An equipment controller.
    Equipment,
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// The kinds of threshold alerts the engine watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AlertKind {
    /// Water below 20% of capacity (but not empty).
    WaterLevelCritical,
    /// Algae at or above 80.
    HighAlgae,
    /// Ammonia above 0.02 ppm.
    HighAmmonia,
    /// Nitrite above 0.1 ppm.
    HighNitrite,
    /// Nitrate above 20 ppm.
    HighNitrate,
    /// Dissolved oxygen below 4 mg/L.
    LowOxygen,
    /// Dissolved CO2 above 30 mg/L.
    HighCo2,
}

// ---------------------------------------------------------------------------
// Equipment variants
// ---------------------------------------------------------------------------

/// Filter hardware type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FilterType {
    /// Air-driven sponge filter; aerates the water on its own.
    Sponge,
    /// Hang-on-back power filter.
    HangOnBack,
    /// External canister filter.
    Canister,
    /// Sump with a return pump.
    Sump,
}

/// Substrate covering the tank floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SubstrateType {
    /// Bare bottom.
    None,
    /// Fine sand.
    Sand,
    /// Aquarium gravel.
    Gravel,
    /// Porous planted-tank soil.
    AquaSoil,
}

/// Kind of hardscape piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HardscapeType {
    /// Smooth river stone.
    RiverRock,
    /// Porous lava rock.
    LavaRock,
    /// Branching driftwood.
    Driftwood,
}

/// Lid covering the tank, modulating evaporation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LidType {
    /// Open top.
    None,
    /// Mesh screen.
    Mesh,
    /// Glass or plastic lid.
    Full,
    /// Sealed lid; no evaporation.
    Sealed,
}
