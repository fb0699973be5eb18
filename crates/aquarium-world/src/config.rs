//! Tunable constants for every system and controller.
//!
//! [`TunableConfig`] bundles one section per process. The engine loads it
//! from the `tunables` key of `aquarium-config.yaml` at startup and passes
//! an immutable reference into every tick; tests construct it with
//! [`Default`] and override single fields.
//!
//! Every section is `#[serde(default)]`, so a partial YAML block only
//! overrides the keys it names.

use serde::{Deserialize, Serialize};

/// Every numeric constant used by the simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunableConfig {
    /// Passive temperature drift toward room temperature.
    pub temperature: TemperatureConfig,
    /// Evaporative water loss.
    pub evaporation: EvaporationConfig,
    /// Food decay into waste.
    pub decay: DecayConfig,
    /// Waste mineralization and bacterial nitrification.
    pub nitrogen: NitrogenConfig,
    /// O2 and CO2 exchange at the water surface.
    pub gas_exchange: GasExchangeConfig,
    /// Plant photosynthesis.
    pub photosynthesis: PhotosynthesisConfig,
    /// Plant respiration.
    pub respiration: RespirationConfig,
    /// Algae growth.
    pub algae: AlgaeConfig,
    /// Plant growth and overgrowth.
    pub plants: PlantsConfig,
    /// Fish metabolism and health.
    pub fish: FishConfig,
    /// Equipment controllers.
    pub equipment: EquipmentConfig,
    /// Liquid fertilizer composition.
    pub fertilizer: FertilizerConfig,
}

// ---------------------------------------------------------------------------
// Immediate tier
// ---------------------------------------------------------------------------

/// Newtonian cooling toward room temperature, scaled by tank size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    /// Fraction of the temperature gap closed per hour in the reference tank (default: 0.132).
    pub drift_coefficient: f64,
    /// Volume (L) the coefficient is calibrated for (default: 100).
    pub reference_volume: f64,
    /// Exponent of the `reference / volume` scaling (default: 0.333).
    pub volume_exponent: f64,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            drift_coefficient: 0.132,
            reference_volume: 100.0,
            volume_exponent: 0.333,
        }
    }
}

/// Evaporation rate, doubling with temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaporationConfig {
    /// Fraction of the volume lost per day at the reference temperature (default: 0.01).
    pub base_rate_per_day: f64,
    /// Reference temperature in °C (default: 25).
    pub reference_temperature: f64,
    /// Temperature increase (°C) that doubles the rate (default: 5.56).
    pub doubling_interval: f64,
}

impl Default for EvaporationConfig {
    fn default() -> Self {
        Self {
            base_rate_per_day: 0.01,
            reference_temperature: 25.0,
            doubling_interval: 5.56,
        }
    }
}

// ---------------------------------------------------------------------------
// Passive tier
// ---------------------------------------------------------------------------

/// Decomposition of uneaten food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Fraction of food decaying per hour at the reference temperature (default: 0.05).
    pub base_rate: f64,
    /// Reference temperature in °C (default: 25).
    pub reference_temperature: f64,
    /// Rate multiplier per 10 °C (default: 2).
    pub q10: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.05,
            reference_temperature: 25.0,
            q10: 2.0,
        }
    }
}

/// Waste mineralization and the two bacterial populations.
///
/// Masses are tracked on a nitrogen basis, so each conversion is 1:1 by mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NitrogenConfig {
    /// Fraction of waste mineralized per hour (default: 0.2).
    pub waste_conversion_rate: f64,
    /// Ammonia (mg) released per gram of waste (default: 60).
    pub ammonia_per_waste: f64,
    /// Bacterial carrying capacity per cm² of surface (default: 0.01).
    pub bacteria_per_cm2: f64,
    /// Ammonia ppm above which an AOB colony appears (default: 0.05).
    pub aob_spawn_threshold: f64,
    /// Nitrite ppm above which a NOB colony appears (default: 0.05).
    pub nob_spawn_threshold: f64,
    /// Size of a freshly spawned colony (default: 10).
    pub spawn_amount: f64,
    /// Logistic growth rate per hour (default: 0.03).
    pub growth_rate: f64,
    /// Fraction of a starved colony dying per hour (default: 0.02).
    pub death_rate: f64,
    /// Substrate ppm below which a colony starves (default: 0.001).
    pub min_food_ppm: f64,
    /// Ammonia (mg) one AOB unit oxidizes per hour (default: 0.02).
    pub aob_conversion_rate: f64,
    /// Nitrite (mg) one NOB unit oxidizes per hour (default: 0.02).
    pub nob_conversion_rate: f64,
}

impl Default for NitrogenConfig {
    fn default() -> Self {
        Self {
            waste_conversion_rate: 0.2,
            ammonia_per_waste: 60.0,
            bacteria_per_cm2: 0.01,
            aob_spawn_threshold: 0.05,
            nob_spawn_threshold: 0.05,
            spawn_amount: 10.0,
            growth_rate: 0.03,
            death_rate: 0.02,
            min_food_ppm: 0.001,
            aob_conversion_rate: 0.02,
            nob_conversion_rate: 0.02,
        }
    }
}

/// Surface gas exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasExchangeConfig {
    /// Fraction of the gap to equilibrium closed per hour at full circulation (default: 0.25).
    pub base_rate: f64,
    /// Tank turnovers per hour giving full circulation (default: 5).
    pub optimal_turnover: f64,
    /// O2 exchange multiplier while aerated (default: 2).
    pub aeration_multiplier: f64,
    /// Direct O2 injection while aerated, mg/L per hour (default: 0.05).
    pub aeration_o2_injection: f64,
    /// CO2 off-gassing multiplier while aerated (default: 1.5).
    pub aeration_co2_multiplier: f64,
    /// Atmospheric CO2 equilibrium at 25 °C in mg/L (default: 0.5).
    pub atmospheric_co2: f64,
    /// Fractional change of CO2 solubility per °C below 25 (default: 0.02).
    pub co2_temperature_coefficient: f64,
}

impl Default for GasExchangeConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.25,
            optimal_turnover: 5.0,
            aeration_multiplier: 2.0,
            aeration_o2_injection: 0.05,
            aeration_co2_multiplier: 1.5,
            atmospheric_co2: 0.5,
            co2_temperature_coefficient: 0.02,
        }
    }
}

/// Algae growth driven by light intensity and shaded by plants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgaeConfig {
    /// Maximum growth per hour on the 0-100 scale (default: 1).
    pub max_growth_rate: f64,
    /// Watts per liter giving half the maximum rate (default: 1).
    pub half_saturation: f64,
    /// Total plant size (%) that halves algae growth (default: 200).
    pub plant_competition_scale: f64,
}

impl Default for AlgaeConfig {
    fn default() -> Self {
        Self {
            max_growth_rate: 1.0,
            half_saturation: 1.0,
            plant_competition_scale: 200.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Active tier
// ---------------------------------------------------------------------------

/// Photosynthesis under light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotosynthesisConfig {
    /// Rate at full sufficiency for 100% total plant size (default: 1).
    pub base_rate: f64,
    /// CO2 (mg/L) at which CO2 stops limiting (default: 20).
    pub optimal_co2: f64,
    /// Nitrate ppm at which nitrate stops limiting (default: 5).
    pub optimal_nitrate: f64,
    /// O2 produced per unit rate, mg (default: 30).
    pub o2_per_rate: f64,
    /// CO2 consumed per unit rate, mg (default: 40).
    pub co2_per_rate: f64,
    /// Nitrate consumed per unit rate, mg (default: 0.5).
    pub nitrate_per_rate: f64,
    /// Phosphate consumed per unit rate, mg (default: 0.05).
    pub phosphate_per_rate: f64,
    /// Potassium consumed per unit rate, mg (default: 0.2).
    pub potassium_per_rate: f64,
    /// Iron consumed per unit rate, mg (default: 0.01).
    pub iron_per_rate: f64,
    /// Plant size gained per unit rate, percent (default: 0.1).
    pub biomass_per_rate: f64,
}

impl Default for PhotosynthesisConfig {
    fn default() -> Self {
        Self {
            base_rate: 1.0,
            optimal_co2: 20.0,
            optimal_nitrate: 5.0,
            o2_per_rate: 30.0,
            co2_per_rate: 40.0,
            nitrate_per_rate: 0.5,
            phosphate_per_rate: 0.05,
            potassium_per_rate: 0.2,
            iron_per_rate: 0.01,
            biomass_per_rate: 0.1,
        }
    }
}

/// Round-the-clock plant respiration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespirationConfig {
    /// O2 consumed per hour by 100% plant size at the reference temperature, mg (default: 5).
    pub o2_per_size: f64,
    /// CO2 produced per mg of O2 consumed (default: 1.375).
    pub co2_per_o2: f64,
    /// Reference temperature in °C (default: 25).
    pub reference_temperature: f64,
    /// Rate multiplier per 10 °C (default: 2).
    pub q10: f64,
}

impl Default for RespirationConfig {
    fn default() -> Self {
        Self {
            o2_per_size: 5.0,
            co2_per_o2: 1.375,
            reference_temperature: 25.0,
            q10: 2.0,
        }
    }
}

/// Plant sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantsConfig {
    /// Waste (g) shed per percent of growth beyond a plant's max size (default: 0.01).
    pub overgrowth_waste_per_percent: f64,
    /// Size of a newly planted specimen, percent (default: 50).
    pub initial_size: f64,
}

impl Default for PlantsConfig {
    fn default() -> Self {
        Self {
            overgrowth_waste_per_percent: 0.01,
            initial_size: 50.0,
        }
    }
}

/// Fish feeding, respiration and health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishConfig {
    /// Hunger gained per hour (default: 2).
    pub hunger_rate: f64,
    /// Hunger above which a fish eats (default: 10).
    pub eat_threshold: f64,
    /// Food a fish eats per hour as a fraction of body mass (default: 0.002).
    pub ration_fraction: f64,
    /// Hunger removed by one full ration (default: 6).
    pub satiation_per_ration: f64,
    /// Fraction of eaten food excreted as waste (default: 0.8).
    pub excretion_fraction: f64,
    /// O2 consumed per gram of fish per hour at the reference temperature, mg (default: 0.3).
    pub o2_per_gram: f64,
    /// CO2 produced per mg of O2 consumed (default: 1.375).
    pub co2_per_o2: f64,
    /// Reference temperature in °C (default: 25).
    pub reference_temperature: f64,
    /// Respiration multiplier per 10 °C (default: 2).
    pub q10: f64,
    /// Ammonia ppm above which fish are stressed (default: 0.02).
    pub ammonia_limit: f64,
    /// Nitrite ppm above which fish are stressed (default: 0.1).
    pub nitrite_limit: f64,
    /// Nitrate ppm above which fish are stressed (default: 40).
    pub nitrate_limit: f64,
    /// Dissolved O2 (mg/L) below which fish are stressed (default: 4).
    pub oxygen_minimum: f64,
    /// Hunger at which fish starve (default: 100).
    pub starvation_hunger: f64,
    /// Health lost per hour to ammonia (default: 2).
    pub ammonia_damage: f64,
    /// Health lost per hour to nitrite (default: 1).
    pub nitrite_damage: f64,
    /// Health lost per hour to nitrate (default: 0.5).
    pub nitrate_damage: f64,
    /// Health lost per hour to low oxygen (default: 2).
    pub low_oxygen_damage: f64,
    /// Health lost per hour outside the species temperature range (default: 1).
    pub temperature_damage: f64,
    /// Health lost per hour while starving (default: 1).
    pub starvation_damage: f64,
    /// Health regained per unstressed hour (default: 0.5).
    pub recovery_rate: f64,
    /// Hunger of a newly added fish (default: 30).
    pub initial_hunger: f64,
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            hunger_rate: 2.0,
            eat_threshold: 10.0,
            ration_fraction: 0.002,
            satiation_per_ration: 6.0,
            excretion_fraction: 0.8,
            o2_per_gram: 0.3,
            co2_per_o2: 1.375,
            reference_temperature: 25.0,
            q10: 2.0,
            ammonia_limit: 0.02,
            nitrite_limit: 0.1,
            nitrate_limit: 40.0,
            oxygen_minimum: 4.0,
            starvation_hunger: 100.0,
            ammonia_damage: 2.0,
            nitrite_damage: 1.0,
            nitrate_damage: 0.5,
            low_oxygen_damage: 2.0,
            temperature_damage: 1.0,
            starvation_damage: 1.0,
            recovery_rate: 0.5,
            initial_hunger: 30.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// Controller constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentConfig {
    /// °C per hour gained per W/L of heater power (default: 0.86).
    pub heater_volume_scale: f64,
    /// Water fraction of capacity below which the auto-top-off fires (default: 0.99).
    pub top_off_threshold: f64,
    /// CO2 (mg) injected per hour per bubble/s (default: 35).
    pub co2_mg_per_bubble_hour: f64,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            heater_volume_scale: 0.86,
            top_off_threshold: 0.99,
            co2_mg_per_bubble_hour: 35.0,
        }
    }
}

/// Composition of the all-in-one liquid fertilizer used by dosing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FertilizerConfig {
    /// Nitrate per mL, mg (default: 5).
    pub nitrate_per_ml: f64,
    /// Phosphate per mL, mg (default: 0.5).
    pub phosphate_per_ml: f64,
    /// Potassium per mL, mg (default: 2).
    pub potassium_per_ml: f64,
    /// Iron per mL, mg (default: 0.1).
    pub iron_per_ml: f64,
}

impl Default for FertilizerConfig {
    fn default() -> Self {
        Self {
            nitrate_per_ml: 5.0,
            phosphate_per_ml: 0.5,
            potassium_per_ml: 2.0,
            iron_per_ml: 0.1,
        }
    }
}
