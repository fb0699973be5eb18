//! Core state structs for the aquarium simulation.
//!
//! [`SimulationState`] is the root value. Every tick and every operator
//! action consumes a borrowed state and returns a brand-new one; nothing in
//! the engine keeps a mutable alias into a previous version.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    AlertKind, FilterType, HardscapeType, LidType, LogSource, ResourceKey, Severity,
    SubstrateType,
};
use crate::ids::{FishId, HardscapeId, PlantId};
use crate::species::{FishSex, FishSpecies, PlantSpecies};

// ---------------------------------------------------------------------------
// Tank
// ---------------------------------------------------------------------------

/// Tank dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Tank {
    /// Water capacity in liters.
    pub capacity: f64,
    /// Wetted glass area (bottom plus four walls) in cm², derived from capacity.
    pub glass_surface: f64,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Every tracked quantity of the tank.
///
/// Fields are read and written through [`Resources::get`] and
/// [`Resources::set`], keyed by [`ResourceKey`], so the effect system never
/// needs string dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Resources {
    /// Water volume (L).
    pub water: f64,
    /// Water temperature (°C).
    pub temperature: f64,
    /// pH.
    pub ph: f64,
    /// Dissolved oxygen (mg/L).
    pub oxygen: f64,
    /// Dissolved CO2 (mg/L).
    pub co2: f64,
    /// Ammonia mass (mg).
    pub ammonia: f64,
    /// Nitrite mass (mg).
    pub nitrite: f64,
    /// Nitrate mass (mg).
    pub nitrate: f64,
    /// Phosphate mass (mg).
    pub phosphate: f64,
    /// Potassium mass (mg).
    pub potassium: f64,
    /// Iron mass (mg).
    pub iron: f64,
    /// Uneaten food (g).
    pub food: f64,
    /// Organic waste (g).
    pub waste: f64,
    /// Algae coverage (0-100).
    pub algae: f64,
    /// Ammonia-oxidizing bacteria population.
    pub aob: f64,
    /// Nitrite-oxidizing bacteria population.
    pub nob: f64,
    /// Colonizable surface (cm²), recomputed every tick.
    pub surface: f64,
    /// Water flow (L/h), recomputed every tick.
    pub flow: f64,
    /// Light output (W), recomputed every tick.
    pub light: f64,
    /// Whether the water is being actively aerated, recomputed every tick.
    pub aeration: bool,
}

impl Resources {
    /// Read a resource by key.
    pub const fn get(&self, key: ResourceKey) -> f64 {
        match key {
            ResourceKey::Water => self.water,
            ResourceKey::Temperature => self.temperature,
            ResourceKey::Ph => self.ph,
            ResourceKey::Oxygen => self.oxygen,
            ResourceKey::Co2 => self.co2,
            ResourceKey::Ammonia => self.ammonia,
            ResourceKey::Nitrite => self.nitrite,
            ResourceKey::Nitrate => self.nitrate,
            ResourceKey::Phosphate => self.phosphate,
            ResourceKey::Potassium => self.potassium,
            ResourceKey::Iron => self.iron,
            ResourceKey::Food => self.food,
            ResourceKey::Waste => self.waste,
            ResourceKey::Algae => self.algae,
            ResourceKey::Aob => self.aob,
            ResourceKey::Nob => self.nob,
            ResourceKey::Surface => self.surface,
            ResourceKey::Flow => self.flow,
            ResourceKey::Light => self.light,
        }
    }

    /// Write a resource by key. Bounds are the caller's responsibility.
    pub fn set(&mut self, key: ResourceKey, value: f64) {
        let slot = match key {
            ResourceKey::Water => &mut self.water,
            ResourceKey::Temperature => &mut self.temperature,
            ResourceKey::Ph => &mut self.ph,
            ResourceKey::Oxygen => &mut self.oxygen,
            ResourceKey::Co2 => &mut self.co2,
            ResourceKey::Ammonia => &mut self.ammonia,
            ResourceKey::Nitrite => &mut self.nitrite,
            ResourceKey::Nitrate => &mut self.nitrate,
            ResourceKey::Phosphate => &mut self.phosphate,
            ResourceKey::Potassium => &mut self.potassium,
            ResourceKey::Iron => &mut self.iron,
            ResourceKey::Food => &mut self.food,
            ResourceKey::Waste => &mut self.waste,
            ResourceKey::Algae => &mut self.algae,
            ResourceKey::Aob => &mut self.aob,
            ResourceKey::Nob => &mut self.nob,
            ResourceKey::Surface => &mut self.surface,
            ResourceKey::Flow => &mut self.flow,
            ResourceKey::Light => &mut self.light,
        };
        *slot = value;
    }

    /// Concentration in ppm (mg/L) of a mass-based resource.
    ///
    /// Returns 0 for an empty tank.
    pub fn ppm(&self, key: ResourceKey) -> f64 {
        if self.water <= 0.0 {
            return 0.0;
        }
        self.get(key) / self.water
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Conditions outside the tank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Environment {
    /// Room air temperature (°C).
    pub room_temperature: f64,
    /// Tap water temperature (°C).
    pub tap_water_temperature: f64,
    /// Tap water pH.
    pub tap_water_ph: f64,
    /// Ambient organic waste entering the tank (g/h): dust, leaf litter.
    pub ambient_waste: f64,
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// A recurring daily on/off window, possibly wrapping past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DailySchedule {
    /// Hour of day (0-23) at which the window opens.
    pub start_hour: u8,
    /// Length of the window in hours (0-24).
    pub duration: u8,
}

/// Aquarium heater with a thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Heater {
    /// Whether the heater is plugged in.
    pub enabled: bool,
    /// Whether the element was heating during the last tick.
    pub is_on: bool,
    /// Thermostat setpoint (°C).
    pub target_temperature: f64,
    /// Element power (W).
    pub wattage: f64,
}

/// Float-switch auto-top-off unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AutoTopOff {
    /// Whether the unit is armed.
    pub enabled: bool,
    /// Whether it pumped water during the last tick.
    pub is_on: bool,
}

/// Mechanical/biological filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Filter {
    /// Whether the filter is plugged in.
    pub enabled: bool,
    /// Whether the filter was running during the last tick.
    pub is_on: bool,
    /// Hardware type.
    pub filter_type: FilterType,
}

/// Circulation pump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Powerhead {
    /// Whether the pump is plugged in.
    pub enabled: bool,
    /// Whether the pump was running during the last tick.
    pub is_on: bool,
    /// Rated flow in US gallons per hour.
    pub flow_rate_gph: f64,
}

/// Tank floor substrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Substrate {
    /// Substrate material.
    pub substrate_type: SubstrateType,
}

/// A single hardscape piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HardscapeItem {
    /// Unique identifier.
    pub id: HardscapeId,
    /// Kind of piece.
    pub kind: HardscapeType,
}

/// All hardscape placed in the tank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Hardscape {
    /// Placed pieces.
    pub items: Vec<HardscapeItem>,
}

/// Pressurized or DIY CO2 injection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Co2Generator {
    /// Whether the generator is connected.
    pub enabled: bool,
    /// Whether it injected CO2 during the last tick.
    pub is_on: bool,
    /// Bubble rate in bubbles per second.
    pub bubble_rate: f64,
    /// Daily injection window.
    pub schedule: DailySchedule,
}

/// Scheduled automatic feeder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AutoFeeder {
    /// Whether the feeder is armed.
    pub enabled: bool,
    /// Whether it dispensed food during the last tick.
    pub is_on: bool,
    /// Food dispensed per feeding (g).
    pub amount: f64,
    /// Daily feeding hour (0-23).
    pub feeding_hour: u8,
    /// Whether today's feeding already happened. Reset at hour 0.
    pub fed_today: bool,
}

/// Aquarium light on a photoperiod timer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Light {
    /// Whether the light is plugged in.
    pub enabled: bool,
    /// Whether the light was lit during the last tick.
    pub is_on: bool,
    /// Power draw (W).
    pub wattage: f64,
    /// Photoperiod.
    pub schedule: DailySchedule,
}

/// Air pump with an airstone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AirPump {
    /// Whether the pump is plugged in.
    pub enabled: bool,
    /// Whether the pump was running during the last tick.
    pub is_on: bool,
}

/// Tank lid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Lid {
    /// Lid style.
    pub lid_type: LidType,
}

/// Every piece of equipment attached to the tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Equipment {
    /// Heater.
    pub heater: Heater,
    /// Auto-top-off.
    pub auto_top_off: AutoTopOff,
    /// Filter.
    pub filter: Filter,
    /// Powerhead.
    pub powerhead: Powerhead,
    /// Substrate.
    pub substrate: Substrate,
    /// Hardscape.
    pub hardscape: Hardscape,
    /// CO2 generator.
    pub co2_generator: Co2Generator,
    /// Auto-feeder.
    pub auto_feeder: AutoFeeder,
    /// Light.
    pub light: Light,
    /// Air pump.
    pub air_pump: AirPump,
    /// Lid.
    pub lid: Lid,
}

// ---------------------------------------------------------------------------
// Livestock
// ---------------------------------------------------------------------------

/// A rooted plant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Plant {
    /// Unique identifier.
    pub id: PlantId,
    /// Species.
    pub species: PlantSpecies,
    /// Size in percent of a nominal mature plant.
    pub size: f64,
}

/// A fish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Fish {
    /// Unique identifier.
    pub id: FishId,
    /// Species.
    pub species: FishSpecies,
    /// Body mass (g).
    pub mass: f64,
    /// Health, 0-100. The fish dies at 0.
    pub health: f64,
    /// Age in ticks (hours).
    pub age: f64,
    /// Hunger, 0 (sated) - 100 (starving).
    pub hunger: f64,
    /// Sex.
    pub sex: FishSex,
}

// ---------------------------------------------------------------------------
// Logs and alerts
// ---------------------------------------------------------------------------

/// An operator-facing log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// Tick at which the entry was written.
    pub tick: u64,
    /// Producer of the entry.
    pub source: LogSource,
    /// Severity.
    pub severity: Severity,
    /// Human-readable text.
    pub message: String,
}

/// Latch state of every alert. `true` means the condition was already
/// reported and the alert is waiting for it to clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct AlertState {
    /// Water level critical latch.
    pub water_level_critical: bool,
    /// High algae latch.
    pub high_algae: bool,
    /// High ammonia latch.
    pub high_ammonia: bool,
    /// High nitrite latch.
    pub high_nitrite: bool,
    /// High nitrate latch.
    pub high_nitrate: bool,
    /// Low oxygen latch.
    pub low_oxygen: bool,
    /// High CO2 latch.
    pub high_co2: bool,
}

impl AlertState {
    /// Read the latch for an alert kind.
    pub const fn get(&self, kind: AlertKind) -> bool {
        match kind {
            AlertKind::WaterLevelCritical => self.water_level_critical,
            AlertKind::HighAlgae => self.high_algae,
            AlertKind::HighAmmonia => self.high_ammonia,
            AlertKind::HighNitrite => self.high_nitrite,
            AlertKind::HighNitrate => self.high_nitrate,
            AlertKind::LowOxygen => self.low_oxygen,
            AlertKind::HighCo2 => self.high_co2,
        }
    }

    /// Write the latch for an alert kind.
    pub fn set(&mut self, kind: AlertKind, latched: bool) {
        let slot = match kind {
            AlertKind::WaterLevelCritical => &mut self.water_level_critical,
            AlertKind::HighAlgae => &mut self.high_algae,
            AlertKind::HighAmmonia => &mut self.high_ammonia,
            AlertKind::HighNitrite => &mut self.high_nitrite,
            AlertKind::HighNitrate => &mut self.high_nitrate,
            AlertKind::LowOxygen => &mut self.low_oxygen,
            AlertKind::HighCo2 => &mut self.high_co2,
        };
        *slot = latched;
    }
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// Maximum number of log entries kept in a state. Older entries are dropped.
pub const MAX_LOG_ENTRIES: usize = 500;

/// The complete, versioned state of one aquarium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimulationState {
    /// Simulated hours elapsed since creation.
    pub tick: u64,
    /// Tank dimensions.
    pub tank: Tank,
    /// Tracked quantities.
    pub resources: Resources,
    /// Conditions outside the tank.
    pub environment: Environment,
    /// Attached equipment.
    pub equipment: Equipment,
    /// Plants.
    pub plants: Vec<Plant>,
    /// Fish.
    pub fish: Vec<Fish>,
    /// Operator-facing log. Not persisted.
    #[serde(skip)]
    pub logs: Vec<LogEntry>,
    /// Alert latches.
    pub alert_state: AlertState,
}

impl SimulationState {
    /// Hour of day (0-23) of the current tick.
    pub const fn hour_of_day(&self) -> u64 {
        self.tick % 24
    }

    /// Sum of all plant sizes, in percent.
    pub fn total_plant_size(&self) -> f64 {
        self.plants.iter().map(|p| p.size).sum()
    }

    /// Append log entries, keeping at most [`MAX_LOG_ENTRIES`].
    pub fn push_logs(&mut self, entries: impl IntoIterator<Item = LogEntry>) {
        self.logs.extend(entries);
        let excess = self.logs.len().saturating_sub(MAX_LOG_ENTRIES);
        if excess > 0 {
            self.logs.drain(..excess);
        }
    }

    /// Append one log entry stamped with the current tick.
    pub fn log(&mut self, source: LogSource, severity: Severity, message: impl Into<String>) {
        let entry = LogEntry {
            tick: self.tick,
            source,
            severity,
            message: message.into(),
        };
        self.push_logs([entry]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resources() -> Resources {
        Resources {
            water: 50.0,
            temperature: 25.0,
            ph: 7.0,
            oxygen: 8.0,
            co2: 4.0,
            ammonia: 1.0,
            nitrite: 0.0,
            nitrate: 100.0,
            phosphate: 0.0,
            potassium: 0.0,
            iron: 0.0,
            food: 0.0,
            waste: 0.0,
            algae: 0.0,
            aob: 0.0,
            nob: 0.0,
            surface: 0.0,
            flow: 0.0,
            light: 0.0,
            aeration: false,
        }
    }

    #[test]
    fn get_set_cover_every_key() {
        let mut resources = sample_resources();
        for (i, key) in ResourceKey::ALL.into_iter().enumerate() {
            let value = f64::from(u32::try_from(i).unwrap_or(0)) + 0.5;
            resources.set(key, value);
            assert!((resources.get(key) - value).abs() < f64::EPSILON, "{key} not wired");
        }
    }

    #[test]
    fn ppm_divides_by_water() {
        let resources = sample_resources();
        assert!((resources.ppm(ResourceKey::Nitrate) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn ppm_of_empty_tank_is_zero() {
        let mut resources = sample_resources();
        resources.water = 0.0;
        assert!(resources.ppm(ResourceKey::Ammonia).abs() < f64::EPSILON);
    }

    #[test]
    fn alert_state_get_set() {
        let mut state = AlertState::default();
        state.set(AlertKind::HighCo2, true);
        assert!(state.get(AlertKind::HighCo2));
        assert!(!state.get(AlertKind::LowOxygen));
    }
}
