//! Passive devices and the values derived from them.
//!
//! Surface, flow, light and aeration are not accumulated. They are
//! recomputed from the tank and the installed equipment at the start of
//! every tick, so toggling a device takes effect on the next tick without
//! any bookkeeping.

use aquarium_types::{FilterType, HardscapeType, LidType, SimulationState, SubstrateType};

use crate::schedule::is_schedule_active;
use crate::tank::bottom_area;

/// Liters per US gallon.
pub const LITERS_PER_GALLON: f64 = 3.785;

/// Hardware characteristics of a filter type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    /// Tank volumes pumped per hour.
    pub turnover: f64,
    /// Maximum flow (L/h).
    pub max_flow: f64,
    /// Biological media surface per liter of tank (cm²/L).
    pub surface_per_liter: f64,
    /// Maximum media surface (cm²).
    pub max_surface: f64,
}

/// Specification of a filter type.
pub const fn filter_spec(filter_type: FilterType) -> FilterSpec {
    match filter_type {
        FilterType::Sponge => FilterSpec {
            turnover: 4.0,
            max_flow: 400.0,
            surface_per_liter: 200.0,
            max_surface: 30_000.0,
        },
        FilterType::HangOnBack => FilterSpec {
            turnover: 6.0,
            max_flow: 1200.0,
            surface_per_liter: 100.0,
            max_surface: 20_000.0,
        },
        FilterType::Canister => FilterSpec {
            turnover: 8.0,
            max_flow: 2000.0,
            surface_per_liter: 250.0,
            max_surface: 60_000.0,
        },
        FilterType::Sump => FilterSpec {
            turnover: 10.0,
            max_flow: 4000.0,
            surface_per_liter: 400.0,
            max_surface: 120_000.0,
        },
    }
}

/// Colonizable surface per cm² of floor.
pub const fn substrate_surface_factor(substrate: SubstrateType) -> f64 {
    match substrate {
        SubstrateType::None => 0.0,
        SubstrateType::Sand => 5.0,
        SubstrateType::Gravel => 10.0,
        SubstrateType::AquaSoil => 15.0,
    }
}

/// Surface (cm²) added by one hardscape piece.
pub const fn hardscape_surface(kind: HardscapeType) -> f64 {
    match kind {
        HardscapeType::RiverRock => 500.0,
        HardscapeType::LavaRock => 2000.0,
        HardscapeType::Driftwood => 800.0,
    }
}

/// Evaporation multiplier of a lid.
pub const fn lid_evaporation_multiplier(lid: LidType) -> f64 {
    match lid {
        LidType::None => 1.0,
        LidType::Mesh => 0.75,
        LidType::Full => 0.25,
        LidType::Sealed => 0.0,
    }
}

/// Derived values of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassiveValues {
    /// Total colonizable surface (cm²).
    pub surface: f64,
    /// Total water flow (L/h).
    pub flow: f64,
    /// Light output (W).
    pub light: f64,
    /// Whether the water is aerated.
    pub aeration: bool,
    /// Whether the filter runs.
    pub filter_on: bool,
    /// Whether the powerhead runs.
    pub powerhead_on: bool,
    /// Whether the light is lit.
    pub light_on: bool,
    /// Whether the air pump runs.
    pub air_pump_on: bool,
}

/// Compute surface, flow, light and aeration from the installed equipment.
pub fn compute_passive(state: &SimulationState) -> PassiveValues {
    let capacity = state.tank.capacity.max(0.0);
    let eq = &state.equipment;

    let filter_on = eq.filter.enabled;
    let spec = filter_spec(eq.filter.filter_type);
    let (filter_flow, filter_surface) = if filter_on {
        (
            (capacity * spec.turnover).min(spec.max_flow),
            (capacity * spec.surface_per_liter).min(spec.max_surface),
        )
    } else {
        (0.0, 0.0)
    };

    let powerhead_on = eq.powerhead.enabled;
    let powerhead_flow = if powerhead_on {
        eq.powerhead.flow_rate_gph.max(0.0) * LITERS_PER_GALLON
    } else {
        0.0
    };

    let light_on = eq.light.enabled && is_schedule_active(state.hour_of_day(), &eq.light.schedule);
    let light = if light_on { eq.light.wattage.max(0.0) } else { 0.0 };

    let substrate = bottom_area(capacity) * substrate_surface_factor(eq.substrate.substrate_type);
    let hardscape: f64 = eq.hardscape.items.iter().map(|i| hardscape_surface(i.kind)).sum();

    let air_pump_on = eq.air_pump.enabled;
    let aeration = air_pump_on || (filter_on && eq.filter.filter_type == FilterType::Sponge);

    PassiveValues {
        surface: state.tank.glass_surface + filter_surface + substrate + hardscape,
        flow: filter_flow + powerhead_flow,
        light,
        aeration,
        filter_on,
        powerhead_on,
        light_on,
        air_pump_on,
    }
}

/// Write freshly computed passive values into a state.
pub fn apply_passive(mut state: SimulationState) -> SimulationState {
    let values = compute_passive(&state);
    state.resources.surface = values.surface;
    state.resources.flow = values.flow;
    state.resources.light = values.light;
    state.resources.aeration = values.aeration;
    state.equipment.filter.is_on = values.filter_on;
    state.equipment.powerhead.is_on = values.powerhead_on;
    state.equipment.light.is_on = values.light_on;
    state.equipment.air_pump.is_on = values.air_pump_on;
    state
}
