//! Execution handlers for operator actions.
//!
//! Each handler validates its input through [`super::validation`], then
//! builds and returns a new state together with the message shown to the
//! keeper. A successful handler also appends that message to the state's
//! log as a user entry. Handlers never touch the input state.

use aquarium_types::{
    Fish, FishId, FishSex, LogSource, Plant, PlantId, ResourceKey, Severity, SimulationState,
};
use aquarium_world::TunableConfig;
use aquarium_world::chemistry::{blend_ph, blend_temperature, blend_volume, co2_equilibrium, o2_saturation};
use aquarium_world::registry::definition;
use rand::Rng;
use tracing::debug;

use super::validation;
use crate::error::ActionError;

/// A state produced by a successful handler and its message.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResult {
    /// The new state.
    pub state: SimulationState,
    /// Human-readable summary, also appended to the log.
    pub message: String,
}

impl HandlerResult {
    fn logged(mut state: SimulationState, message: String) -> Self {
        state.log(LogSource::User, Severity::Info, message.clone());
        Self { state, message }
    }
}

/// Add `delta` to a resource, clamped into its registry bounds.
fn adjust(state: &mut SimulationState, key: ResourceKey, delta: f64) {
    let value = state.resources.get(key) + delta;
    let clamped = definition(key).clamp(value, state.tank.capacity);
    state.resources.set(key, clamped);
}

/// "a" or "an" for a common name.
fn article(name: &str) -> &'static str {
    match name.chars().next() {
        Some(c) if "AEIOUaeiou".contains(c) => "an",
        _ => "a",
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ---------------------------------------------------------------------------
// Feeding and dosing
// ---------------------------------------------------------------------------

/// Drop food into the tank.
pub fn feed(state: &SimulationState, amount: f64) -> Result<HandlerResult, ActionError> {
    let amount = validation::feed_amount(amount)?;
    let mut next = state.clone();
    adjust(&mut next, ResourceKey::Food, amount);
    Ok(HandlerResult::logged(next, format!("Fed {amount:.2} g of food.")))
}

/// Dose all-in-one liquid fertilizer.
pub fn dose(
    state: &SimulationState,
    millilitres: f64,
    config: &TunableConfig,
) -> Result<HandlerResult, ActionError> {
    let ml = validation::dose(millilitres)?;
    let fc = &config.fertilizer;
    let mut next = state.clone();
    adjust(&mut next, ResourceKey::Nitrate, ml * fc.nitrate_per_ml);
    adjust(&mut next, ResourceKey::Phosphate, ml * fc.phosphate_per_ml);
    adjust(&mut next, ResourceKey::Potassium, ml * fc.potassium_per_ml);
    adjust(&mut next, ResourceKey::Iron, ml * fc.iron_per_ml);
    Ok(HandlerResult::logged(next, format!("Dosed {ml:.1} mL of fertilizer.")))
}

// ---------------------------------------------------------------------------
// Water
// ---------------------------------------------------------------------------

/// Replace a fraction of the water with tap water.
///
/// Dissolved masses leave with the removed water. The tank is refilled to
/// capacity and temperature, O2, CO2 and pH are blended by volume with the
/// tap water (tap water is saturated with O2 and at CO2 equilibrium).
/// Food and waste stay behind.
pub fn water_change(
    state: &SimulationState,
    fraction: f64,
    config: &TunableConfig,
) -> Result<HandlerResult, ActionError> {
    validation::water_change(state, fraction)?;
    let mut next = state.clone();
    let capacity = state.tank.capacity;
    let water = state.resources.water;
    let removed = water * fraction;
    let remaining = water - removed;
    let added = (capacity - remaining).max(0.0);

    for key in ResourceKey::DISSOLVED_MASS {
        next.resources.set(key, state.resources.get(key) * (1.0 - fraction));
    }

    let env = &state.environment;
    let tap_temperature = env.tap_water_temperature;
    let r = &mut next.resources;
    r.temperature = blend_temperature(state.resources.temperature, remaining, tap_temperature, added);
    r.oxygen = blend_volume(state.resources.oxygen, remaining, o2_saturation(tap_temperature), added);
    r.co2 = blend_volume(
        state.resources.co2,
        remaining,
        co2_equilibrium(tap_temperature, &config.gas_exchange),
        added,
    );
    r.ph = blend_ph(state.resources.ph, remaining, env.tap_water_ph, added);
    r.water = capacity;

    debug!(tick = state.tick, removed, added, "water change");
    let percent = fraction * 100.0;
    Ok(HandlerResult::logged(
        next,
        format!("Changed {percent:.0}% of the water: removed {removed:.1} L, added {added:.1} L of tap water."),
    ))
}

/// Fill the tank back to capacity with tap water.
pub fn top_off(state: &SimulationState) -> Result<HandlerResult, ActionError> {
    let added = validation::top_off(state)?;
    let mut next = state.clone();
    next.resources.temperature = blend_temperature(
        state.resources.temperature,
        state.resources.water,
        state.environment.tap_water_temperature,
        added,
    );
    next.resources.water = state.tank.capacity;
    Ok(HandlerResult::logged(next, format!("Topped off with {added:.1} L of tap water.")))
}

// ---------------------------------------------------------------------------
// Plants and algae
// ---------------------------------------------------------------------------

/// Cut every plant larger than `target` percent back to `target`.
///
/// Trimmings are taken out of the tank, so no waste is produced.
pub fn trim_plants(state: &SimulationState, target: u32) -> Result<HandlerResult, ActionError> {
    let size = validation::trim_target(state, target)?;
    let mut next = state.clone();
    let trimmed = state.plants.iter().filter(|p| p.size > size).count();
    let mut removed = 0.0;
    for plant in next.plants.iter_mut().filter(|p| p.size > size) {
        removed += plant.size - size;
        plant.size = size;
    }
    let message = format!("Trimmed {}, removing {removed:.1}% of growth.", plural(trimmed, "plant"));
    Ok(HandlerResult::logged(next, message))
}

/// Plant a new specimen at the configured initial size.
pub fn add_plant(
    state: &SimulationState,
    species: &str,
    config: &TunableConfig,
) -> Result<HandlerResult, ActionError> {
    let species = validation::plant_species(species)?;
    let mut next = state.clone();
    next.plants.push(Plant {
        id: PlantId::new(),
        species,
        size: config.plants.initial_size,
    });
    let name = species.common_name();
    Ok(HandlerResult::logged(next, format!("Planted {} {name}.", article(name))))
}

/// Pull a plant out of the tank.
pub fn remove_plant(state: &SimulationState, id: PlantId) -> Result<HandlerResult, ActionError> {
    let index = state
        .plants
        .iter()
        .position(|p| p.id == id)
        .ok_or(ActionError::PlantNotFound { id })?;
    let mut next = state.clone();
    let plant = next.plants.remove(index);
    let name = plant.species.common_name();
    Ok(HandlerResult::logged(next, format!("Removed {} {name}.", article(name))))
}

/// Scrub a share of the algae off the glass.
pub fn scrub_algae<R: Rng + ?Sized>(
    state: &SimulationState,
    percent: Option<f64>,
    rng: &mut R,
) -> Result<HandlerResult, ActionError> {
    let percent = validation::scrub_percent(state, percent, rng)?;
    let mut next = state.clone();
    let removed = state.resources.algae * percent / 100.0;
    adjust(&mut next, ResourceKey::Algae, -removed);
    Ok(HandlerResult::logged(next, format!("Scrubbed {percent:.0}% of the algae.")))
}

// ---------------------------------------------------------------------------
// Fish
// ---------------------------------------------------------------------------

/// Add an adult fish of the given species.
pub fn add_fish<R: Rng + ?Sized>(
    state: &SimulationState,
    species: &str,
    config: &TunableConfig,
    rng: &mut R,
) -> Result<HandlerResult, ActionError> {
    let species = validation::fish_species(species)?;
    let sex = if rng.random_bool(0.5) {
        FishSex::Male
    } else {
        FishSex::Female
    };
    let mut next = state.clone();
    next.fish.push(Fish {
        id: FishId::new(),
        species,
        mass: species.adult_mass(),
        health: 100.0,
        age: 0.0,
        hunger: config.fish.initial_hunger,
        sex,
    });
    let name = species.common_name();
    Ok(HandlerResult::logged(next, format!("Added {} {name}.", article(name))))
}

/// Take a fish out of the tank.
pub fn remove_fish(state: &SimulationState, id: FishId) -> Result<HandlerResult, ActionError> {
    let index = state
        .fish
        .iter()
        .position(|f| f.id == id)
        .ok_or(ActionError::FishNotFound { id })?;
    let mut next = state.clone();
    let fish = next.fish.remove(index);
    let name = fish.species.common_name();
    Ok(HandlerResult::logged(next, format!("Removed {} {name}.", article(name))))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use aquarium_types::{FishSpecies, PlantSpecies};
    use aquarium_world::test_support::sample_state;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn feed_adds_rounded_amount_and_logs() {
        let state = sample_state(100.0);
        let result = feed(&state, 0.123).unwrap();
        assert!((result.state.resources.food - state.resources.food - 0.12).abs() < 1e-12);
        assert_eq!(result.message, "Fed 0.12 g of food.");
        assert_eq!(result.state.logs.last().map(|l| l.source), Some(LogSource::User));
    }

    #[test]
    fn water_change_removes_dissolved_mass_only() {
        let mut state = sample_state(100.0);
        state.resources.ammonia = 8.0;
        state.resources.nitrate = 400.0;
        state.resources.food = 1.0;
        state.resources.waste = 2.0;
        let result = water_change(&state, 0.25, &TunableConfig::default()).unwrap();
        let r = &result.state.resources;
        assert!((r.ammonia - 6.0).abs() < 1e-12);
        assert!((r.nitrate - 300.0).abs() < 1e-9);
        assert!((r.food - 1.0).abs() < f64::EPSILON);
        assert!((r.waste - 2.0).abs() < f64::EPSILON);
        assert!((r.water - 100.0).abs() < f64::EPSILON);
        assert!(result.message.contains("25.0 L"));
    }

    #[test]
    fn water_change_blends_temperature() {
        let mut state = sample_state(100.0);
        state.resources.temperature = 26.0;
        state.environment.tap_water_temperature = 20.0;
        let result = water_change(&state, 0.5, &TunableConfig::default()).unwrap();
        assert!((result.state.resources.temperature - 23.0).abs() < 1e-12);
    }

    #[test]
    fn water_change_refills_a_low_tank() {
        let mut state = sample_state(100.0);
        state.resources.water = 80.0;
        state.resources.ammonia = 10.0;
        let result = water_change(&state, 0.5, &TunableConfig::default()).unwrap();
        assert!((result.state.resources.water - 100.0).abs() < f64::EPSILON);
        assert!((result.state.resources.ammonia - 5.0).abs() < 1e-12);
        assert!(result.message.contains("removed 40.0 L, added 60.0 L"));
    }

    #[test]
    fn trim_reports_count_and_total() {
        let mut state = sample_state(100.0);
        state.resources.waste = 0.5;
        state.plants = [57.0, 55.0, 53.0]
            .into_iter()
            .map(|size| Plant {
                id: PlantId::new(),
                species: PlantSpecies::JavaFern,
                size,
            })
            .collect();
        let result = trim_plants(&state, 50).unwrap();
        assert!(result.state.plants.iter().all(|p| (p.size - 50.0).abs() < f64::EPSILON));
        assert!(result.message.contains("3 plants"), "{}", result.message);
        assert!(result.message.contains("15.0%"), "{}", result.message);
        assert!((result.state.resources.waste - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn add_fish_uses_species_defaults() {
        let state = sample_state(100.0);
        let mut rng = SmallRng::seed_from_u64(3);
        let result = add_fish(&state, "angelfish", &TunableConfig::default(), &mut rng).unwrap();
        let fish = result.state.fish.last().unwrap();
        assert_eq!(fish.species, FishSpecies::Angelfish);
        assert!((fish.mass - 15.0).abs() < f64::EPSILON);
        assert!((fish.health - 100.0).abs() < f64::EPSILON);
        assert!((fish.hunger - 30.0).abs() < f64::EPSILON);
        assert_eq!(result.message, "Added an Angelfish.");
    }

    #[test]
    fn remove_fish_by_id() {
        let state = sample_state(100.0);
        let id = state.fish[0].id;
        let result = remove_fish(&state, id).unwrap();
        assert_eq!(result.state.fish.len(), state.fish.len() - 1);
        assert!(result.state.fish.iter().all(|f| f.id != id));
        assert!(remove_fish(&state, FishId::new()).is_err());
    }

    #[test]
    fn top_off_blends_tap_water() {
        let mut state = sample_state(100.0);
        state.resources.water = 50.0;
        state.resources.temperature = 26.0;
        state.environment.tap_water_temperature = 20.0;
        let result = top_off(&state).unwrap();
        assert!((result.state.resources.water - 100.0).abs() < f64::EPSILON);
        assert!((result.state.resources.temperature - 23.0).abs() < 1e-12);
    }

    #[test]
    fn scrub_removes_share_of_algae() {
        let mut state = sample_state(100.0);
        state.resources.algae = 50.0;
        let mut rng = SmallRng::seed_from_u64(1);
        let result = scrub_algae(&state, Some(20.0), &mut rng).unwrap();
        assert!((result.state.resources.algae - 40.0).abs() < 1e-12);
    }

    #[test]
    fn dose_adds_every_nutrient() {
        let state = sample_state(100.0);
        let result = dose(&state, 2.0, &TunableConfig::default()).unwrap();
        let r = &result.state.resources;
        assert!((r.nitrate - state.resources.nitrate - 10.0).abs() < 1e-12);
        assert!(r.phosphate > state.resources.phosphate);
        assert!(r.potassium > state.resources.potassium);
        assert!(r.iron > state.resources.iron);
    }

    #[test]
    fn plants_come_and_go() {
        let state = sample_state(100.0);
        let planted = add_plant(&state, "hornwort", &TunableConfig::default()).unwrap();
        let plant = planted.state.plants.last().unwrap();
        assert!((plant.size - 50.0).abs() < f64::EPSILON);
        let removed = remove_plant(&planted.state, plant.id).unwrap();
        assert_eq!(removed.state.plants.len(), state.plants.len());
    }
}
