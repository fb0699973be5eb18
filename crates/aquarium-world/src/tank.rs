//! Tank geometry.
//!
//! A tank is modelled as a rectangular box with 2 : 1 : 1.25
//! (length : depth : height) proportions, so every dimension follows from
//! the capacity alone.

use aquarium_types::Tank;

use crate::error::WorldError;

/// Cubic centimetres per liter.
const CM3_PER_LITER: f64 = 1000.0;

/// Length, depth and height of the tank in cm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Front length.
    pub length: f64,
    /// Front-to-back depth.
    pub depth: f64,
    /// Height.
    pub height: f64,
}

/// Dimensions of a tank holding `capacity` liters.
///
/// With depth `w`, volume is `2w · w · 1.25w = 2.5w³`.
pub fn dimensions(capacity: f64) -> Dimensions {
    let depth = (capacity.max(0.0) * CM3_PER_LITER / 2.5).cbrt();
    Dimensions {
        length: 2.0 * depth,
        depth,
        height: 1.25 * depth,
    }
}

/// Floor area in cm².
pub fn bottom_area(capacity: f64) -> f64 {
    let d = dimensions(capacity);
    d.length * d.depth
}

/// Wetted glass area (bottom plus four walls) in cm².
pub fn glass_surface(capacity: f64) -> f64 {
    let d = dimensions(capacity);
    let walls = 2.0 * d.length * d.height + 2.0 * d.depth * d.height;
    d.length * d.depth + walls
}

/// Build a tank, rejecting non-finite or non-positive capacities.
pub fn build_tank(capacity: f64) -> Result<Tank, WorldError> {
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(WorldError::InvalidCapacity { capacity });
    }
    Ok(Tank {
        capacity,
        glass_surface: glass_surface(capacity),
    })
}
