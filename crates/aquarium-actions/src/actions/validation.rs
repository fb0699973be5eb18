//! Precondition checks for operator actions.
//!
//! Each check either returns the normalized input the handler works with
//! (a rounded amount, a parsed species, a clamped percentage) or the
//! [`ActionError`] explaining the rejection. Checks never modify state.

use aquarium_types::{FishSpecies, PlantSpecies, SimulationState};
use rand::Rng;

use crate::error::ActionError;

/// Trim targets offered to the keeper, in percent.
pub const TRIM_TARGETS: [u32; 3] = [50, 85, 100];

/// Smallest and largest share of algae a scrub removes, in percent.
pub const SCRUB_RANGE: (f64, f64) = (10.0, 30.0);

/// Water below `capacity - FULL_TOLERANCE` liters counts as not full.
const FULL_TOLERANCE: f64 = 1e-9;

/// Round a feed amount to two decimals and check it is positive.
pub fn feed_amount(amount: f64) -> Result<f64, ActionError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ActionError::InvalidFeedAmount { amount });
    }
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded <= 0.0 {
        return Err(ActionError::InvalidFeedAmount { amount });
    }
    Ok(rounded)
}

/// Check a water change fraction against the current tank.
pub fn water_change(state: &SimulationState, fraction: f64) -> Result<(), ActionError> {
    if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
        return Err(ActionError::InvalidWaterChangeFraction { fraction });
    }
    if state.resources.water <= 0.0 {
        return Err(ActionError::EmptyTank);
    }
    Ok(())
}

/// Check a trim target and that at least one plant exceeds it.
pub fn trim_target(state: &SimulationState, target: u32) -> Result<f64, ActionError> {
    if !TRIM_TARGETS.contains(&target) {
        return Err(ActionError::InvalidTrimTarget { target });
    }
    let size = f64::from(target);
    if !state.plants.iter().any(|p| p.size > size) {
        return Err(ActionError::NothingToTrim { target });
    }
    Ok(size)
}

/// Parse a fish species key.
pub fn fish_species(key: &str) -> Result<FishSpecies, ActionError> {
    FishSpecies::from_key(key).ok_or_else(|| ActionError::UnknownFishSpecies {
        species: key.to_owned(),
    })
}

/// Parse a plant species key.
pub fn plant_species(key: &str) -> Result<PlantSpecies, ActionError> {
    PlantSpecies::from_key(key).ok_or_else(|| ActionError::UnknownPlantSpecies {
        species: key.to_owned(),
    })
}

/// Liters needed to fill the tank, rejecting a full tank.
pub fn top_off(state: &SimulationState) -> Result<f64, ActionError> {
    let missing = state.tank.capacity - state.resources.water;
    if missing <= FULL_TOLERANCE {
        return Err(ActionError::AlreadyFull);
    }
    Ok(missing)
}

/// Resolve the share of algae to scrub, in percent.
///
/// An explicit percentage is clamped into [`SCRUB_RANGE`]; without one a
/// share is drawn uniformly from that range.
pub fn scrub_percent<R: Rng + ?Sized>(
    state: &SimulationState,
    percent: Option<f64>,
    rng: &mut R,
) -> Result<f64, ActionError> {
    if state.resources.algae <= 0.0 {
        return Err(ActionError::NoAlgae);
    }
    let (min, max) = SCRUB_RANGE;
    match percent {
        Some(p) if p.is_nan() => Err(ActionError::InvalidScrubPercent { percent: p }),
        Some(p) => Ok(p.clamp(min, max)),
        None => Ok(rng.random_range(min..=max)),
    }
}

/// Check a fertilizer dose.
pub fn dose(millilitres: f64) -> Result<f64, ActionError> {
    if !millilitres.is_finite() || millilitres <= 0.0 {
        return Err(ActionError::InvalidDose { millilitres });
    }
    Ok(millilitres)
}

#[cfg(test)]
mod tests {
    use aquarium_world::test_support::sample_state;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn feed_rounds_to_cents() {
        assert_eq!(feed_amount(0.123), Ok(0.12));
        assert_eq!(feed_amount(0.005), Ok(0.01));
    }

    #[test]
    fn feed_rejects_non_positive() {
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY, 0.001] {
            assert!(feed_amount(amount).is_err(), "{amount} accepted");
        }
    }

    #[test]
    fn water_change_bounds() {
        let state = sample_state(100.0);
        assert!(water_change(&state, 0.25).is_ok());
        assert!(water_change(&state, 1.0).is_ok());
        assert!(water_change(&state, 0.0).is_err());
        assert!(water_change(&state, 1.01).is_err());

        let mut empty = state;
        empty.resources.water = 0.0;
        assert_eq!(water_change(&empty, 0.5), Err(ActionError::EmptyTank));
    }

    #[test]
    fn trim_needs_a_valid_target_and_work() {
        let mut state = sample_state(100.0);
        assert_eq!(
            trim_target(&state, 60),
            Err(ActionError::InvalidTrimTarget { target: 60 })
        );
        for plant in &mut state.plants {
            plant.size = 40.0;
        }
        assert_eq!(
            trim_target(&state, 50),
            Err(ActionError::NothingToTrim { target: 50 })
        );
    }

    #[test]
    fn unknown_species_are_rejected() {
        assert!(fish_species("kraken").is_err());
        assert_eq!(fish_species("betta"), Ok(FishSpecies::Betta));
        assert!(plant_species("cactus").is_err());
    }

    #[test]
    fn scrub_percent_clamps_and_draws() {
        let mut state = sample_state(100.0);
        let mut rng = SmallRng::seed_from_u64(7);
        state.resources.algae = 0.0;
        assert_eq!(scrub_percent(&state, Some(20.0), &mut rng), Err(ActionError::NoAlgae));

        state.resources.algae = 40.0;
        assert_eq!(scrub_percent(&state, Some(90.0), &mut rng), Ok(30.0));
        assert_eq!(scrub_percent(&state, Some(1.0), &mut rng), Ok(10.0));
        for _ in 0..50 {
            let drawn = scrub_percent(&state, None, &mut rng).unwrap_or(0.0);
            assert!((10.0..=30.0).contains(&drawn));
        }
    }

    #[test]
    fn top_off_rejects_full_tank() {
        let mut state = sample_state(100.0);
        assert_eq!(top_off(&state), Err(ActionError::AlreadyFull));
        state.resources.water = 97.5;
        assert!(top_off(&state).is_ok_and(|l| (l - 2.5).abs() < 1e-12));
    }
}
