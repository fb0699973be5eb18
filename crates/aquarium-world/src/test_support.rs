//! Shared fixtures for unit tests.
//!
//! Compiled for this crate's tests and, through the `test-support`
//! feature, for the tests of downstream crates.

use aquarium_types::{
    Fish, FishId, FishSex, FishSpecies, Plant, PlantId, PlantSpecies, SimulationState,
};

use crate::setup::{DEFAULT_ENVIRONMENT, initial_state};

/// A filled tank with two plants and two fish, at tick 0.
#[allow(clippy::panic)]
pub fn sample_state(capacity: f64) -> SimulationState {
    let mut state = match initial_state(capacity, DEFAULT_ENVIRONMENT) {
        Ok(state) => state,
        Err(e) => panic!("fixture tank: {e}"),
    };
    state.plants = vec![
        Plant {
            id: PlantId::new(),
            species: PlantSpecies::JavaFern,
            size: 50.0,
        },
        Plant {
            id: PlantId::new(),
            species: PlantSpecies::AmazonSword,
            size: 50.0,
        },
    ];
    state.fish = [FishSpecies::NeonTetra, FishSpecies::Guppy]
        .into_iter()
        .map(|species| Fish {
            id: FishId::new(),
            species,
            mass: species.adult_mass(),
            health: 100.0,
            age: 0.0,
            hunger: 30.0,
            sex: FishSex::Female,
        })
        .collect();
    state
}
