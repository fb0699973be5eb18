//! Static metadata for every tracked resource.
//!
//! The registry is the single source of truth for bounds, defaults and
//! display formatting. The effect system clamps against it, the alert layer
//! and the display collaborator read thresholds and units from it, and
//! simulation creation seeds initial values from it.

use aquarium_types::{ResourceKey, Resources};
use serde::Serialize;

/// An inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl ValueRange {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Metadata for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceDefinition {
    /// The resource this entry describes.
    pub key: ResourceKey,
    /// Display label.
    pub label: &'static str,
    /// Storage unit.
    pub unit: &'static str,
    /// Hard bounds. The water maximum is replaced by the tank capacity.
    pub bounds: ValueRange,
    /// Value in a freshly created tank.
    pub default: f64,
    /// Decimal places shown to the keeper.
    pub precision: usize,
    /// Comfortable range, in display units (ppm for mass-based resources).
    pub safe_range: Option<ValueRange>,
    /// Range beyond which livestock suffers, in display units.
    pub stress_range: Option<ValueRange>,
    /// Stored as absolute mass and displayed as a concentration.
    pub mass_based: bool,
}

impl ResourceDefinition {
    /// Format a stored value for display.
    ///
    /// Mass-based resources are divided by the water volume and shown in ppm.
    pub fn format(&self, value: f64, water: f64) -> String {
        let precision = self.precision;
        if self.mass_based {
            let ppm = if water > 0.0 { value / water } else { 0.0 };
            format!("{ppm:.precision$} ppm")
        } else if self.unit.is_empty() {
            format!("{value:.precision$}")
        } else {
            format!("{value:.precision$} {}", self.unit)
        }
    }

    /// Upper bound, with water capped at the tank capacity.
    pub fn effective_max(&self, capacity: f64) -> f64 {
        if self.key == ResourceKey::Water {
            capacity
        } else {
            self.bounds.max
        }
    }

    /// Clamp `value` into the resource's bounds.
    pub fn clamp(&self, value: f64, capacity: f64) -> f64 {
        value.min(self.effective_max(capacity)).max(self.bounds.min)
    }
}

const UNBOUNDED: f64 = f64::MAX;

const fn mass(
    key: ResourceKey,
    label: &'static str,
    safe: Option<ValueRange>,
    stress: Option<ValueRange>,
) -> ResourceDefinition {
    ResourceDefinition {
        key,
        label,
        unit: "mg",
        bounds: ValueRange::new(0.0, UNBOUNDED),
        default: 0.0,
        precision: 3,
        safe_range: safe,
        stress_range: stress,
        mass_based: true,
    }
}

const WATER: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Water,
    label: "Water",
    unit: "L",
    bounds: ValueRange::new(0.0, UNBOUNDED),
    default: 0.0,
    precision: 1,
    safe_range: None,
    stress_range: None,
    mass_based: false,
};

const TEMPERATURE: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Temperature,
    label: "Temperature",
    unit: "°C",
    bounds: ValueRange::new(0.0, 50.0),
    default: 25.0,
    precision: 1,
    safe_range: Some(ValueRange::new(22.0, 28.0)),
    stress_range: Some(ValueRange::new(18.0, 32.0)),
    mass_based: false,
};

const PH: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Ph,
    label: "pH",
    unit: "",
    bounds: ValueRange::new(0.0, 14.0),
    default: 7.0,
    precision: 1,
    safe_range: Some(ValueRange::new(6.5, 7.5)),
    stress_range: Some(ValueRange::new(6.0, 8.0)),
    mass_based: false,
};

const OXYGEN: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Oxygen,
    label: "Oxygen",
    unit: "mg/L",
    bounds: ValueRange::new(0.0, 20.0),
    default: 8.0,
    precision: 1,
    safe_range: Some(ValueRange::new(6.0, 20.0)),
    stress_range: Some(ValueRange::new(4.0, 20.0)),
    mass_based: false,
};

const CO2: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Co2,
    label: "CO2",
    unit: "mg/L",
    bounds: ValueRange::new(0.0, 100.0),
    default: 4.0,
    precision: 1,
    safe_range: Some(ValueRange::new(0.0, 20.0)),
    stress_range: Some(ValueRange::new(0.0, 30.0)),
    mass_based: false,
};

const AMMONIA: ResourceDefinition = mass(
    ResourceKey::Ammonia,
    "Ammonia",
    Some(ValueRange::new(0.0, 0.02)),
    Some(ValueRange::new(0.0, 0.05)),
);

const NITRITE: ResourceDefinition = mass(
    ResourceKey::Nitrite,
    "Nitrite",
    Some(ValueRange::new(0.0, 0.1)),
    Some(ValueRange::new(0.0, 0.5)),
);

const NITRATE: ResourceDefinition = mass(
    ResourceKey::Nitrate,
    "Nitrate",
    Some(ValueRange::new(0.0, 20.0)),
    Some(ValueRange::new(0.0, 40.0)),
);

const PHOSPHATE: ResourceDefinition = mass(
    ResourceKey::Phosphate,
    "Phosphate",
    Some(ValueRange::new(0.05, 2.0)),
    None,
);

const POTASSIUM: ResourceDefinition = mass(
    ResourceKey::Potassium,
    "Potassium",
    Some(ValueRange::new(5.0, 30.0)),
    None,
);

const IRON: ResourceDefinition = mass(
    ResourceKey::Iron,
    "Iron",
    Some(ValueRange::new(0.05, 0.5)),
    None,
);

const FOOD: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Food,
    label: "Food",
    unit: "g",
    bounds: ValueRange::new(0.0, UNBOUNDED),
    default: 0.0,
    precision: 2,
    safe_range: None,
    stress_range: None,
    mass_based: false,
};

const WASTE: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Waste,
    label: "Waste",
    unit: "g",
    bounds: ValueRange::new(0.0, UNBOUNDED),
    default: 0.0,
    precision: 2,
    safe_range: None,
    stress_range: None,
    mass_based: false,
};

const ALGAE: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Algae,
    label: "Algae",
    unit: "",
    bounds: ValueRange::new(0.0, 100.0),
    default: 0.0,
    precision: 1,
    safe_range: Some(ValueRange::new(0.0, 50.0)),
    stress_range: Some(ValueRange::new(0.0, 80.0)),
    mass_based: false,
};

const AOB: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Aob,
    label: "AOB",
    unit: "",
    bounds: ValueRange::new(0.0, UNBOUNDED),
    default: 0.0,
    precision: 2,
    safe_range: None,
    stress_range: None,
    mass_based: false,
};

const NOB: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Nob,
    label: "NOB",
    unit: "",
    bounds: ValueRange::new(0.0, UNBOUNDED),
    default: 0.0,
    precision: 2,
    safe_range: None,
    stress_range: None,
    mass_based: false,
};

const SURFACE: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Surface,
    label: "Surface",
    unit: "cm²",
    bounds: ValueRange::new(0.0, UNBOUNDED),
    default: 0.0,
    precision: 0,
    safe_range: None,
    stress_range: None,
    mass_based: false,
};

const FLOW: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Flow,
    label: "Flow",
    unit: "L/h",
    bounds: ValueRange::new(0.0, UNBOUNDED),
    default: 0.0,
    precision: 0,
    safe_range: None,
    stress_range: None,
    mass_based: false,
};

const LIGHT: ResourceDefinition = ResourceDefinition {
    key: ResourceKey::Light,
    label: "Light",
    unit: "W",
    bounds: ValueRange::new(0.0, UNBOUNDED),
    default: 0.0,
    precision: 0,
    safe_range: None,
    stress_range: None,
    mass_based: false,
};

/// Every resource definition, in [`ResourceKey::ALL`] order.
pub static REGISTRY: [ResourceDefinition; 19] = [
    WATER, TEMPERATURE, PH, OXYGEN, CO2,
    AMMONIA, NITRITE, NITRATE, PHOSPHATE, POTASSIUM,
    IRON, FOOD, WASTE, ALGAE, AOB,
    NOB, SURFACE, FLOW, LIGHT,
];

/// Look up the definition of a resource.
pub const fn definition(key: ResourceKey) -> &'static ResourceDefinition {
    match key {
        ResourceKey::Water => &WATER,
        ResourceKey::Temperature => &TEMPERATURE,
        ResourceKey::Ph => &PH,
        ResourceKey::Oxygen => &OXYGEN,
        ResourceKey::Co2 => &CO2,
        ResourceKey::Ammonia => &AMMONIA,
        ResourceKey::Nitrite => &NITRITE,
        ResourceKey::Nitrate => &NITRATE,
        ResourceKey::Phosphate => &PHOSPHATE,
        ResourceKey::Potassium => &POTASSIUM,
        ResourceKey::Iron => &IRON,
        ResourceKey::Food => &FOOD,
        ResourceKey::Waste => &WASTE,
        ResourceKey::Algae => &ALGAE,
        ResourceKey::Aob => &AOB,
        ResourceKey::Nob => &NOB,
        ResourceKey::Surface => &SURFACE,
        ResourceKey::Flow => &FLOW,
        ResourceKey::Light => &LIGHT,
    }
}

/// Resources of a freshly filled tank: registry defaults with full water.
pub fn default_resources(capacity: f64) -> Resources {
    let mut resources = Resources {
        water: 0.0,
        temperature: 0.0,
        ph: 0.0,
        oxygen: 0.0,
        co2: 0.0,
        ammonia: 0.0,
        nitrite: 0.0,
        nitrate: 0.0,
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
    };
    for def in &REGISTRY {
        resources.set(def.key, def.default);
    }
    resources.water = capacity;
    resources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_in_key_order() {
        for (def, key) in REGISTRY.iter().zip(ResourceKey::ALL) {
            assert_eq!(def.key, key);
            assert_eq!(definition(key).key, key);
        }
    }

    #[test]
    fn defaults_lie_within_bounds() {
        for def in &REGISTRY {
            assert!(def.bounds.contains(def.default), "{} default out of bounds", def.key);
        }
    }

    #[test]
    fn mass_based_format_shows_ppm() {
        let ammonia = definition(ResourceKey::Ammonia);
        assert_eq!(ammonia.format(5.0, 100.0), "0.050 ppm");
        assert_eq!(ammonia.format(5.0, 0.0), "0.000 ppm");
    }

    #[test]
    fn plain_format_uses_unit() {
        assert_eq!(definition(ResourceKey::Temperature).format(24.56, 100.0), "24.6 °C");
        assert_eq!(definition(ResourceKey::Ph).format(7.04, 100.0), "7.0");
    }

    #[test]
    fn water_is_capped_at_capacity() {
        let water = definition(ResourceKey::Water);
        assert!((water.clamp(120.0, 100.0) - 100.0).abs() < f64::EPSILON);
        assert!(water.clamp(-3.0, 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_resources_are_full() {
        let resources = default_resources(75.0);
        assert!((resources.water - 75.0).abs() < f64::EPSILON);
        assert!((resources.temperature - 25.0).abs() < f64::EPSILON);
        assert!(resources.ammonia.abs() < f64::EPSILON);
    }
}
