//! Water chemistry helpers shared by systems, controllers and actions.
//!
//! Pure functions only: gas solubility, Q10 temperature scaling and the
//! volume-weighted blending used whenever tap water enters the tank.

use crate::config::GasExchangeConfig;

/// Temperature at which the CO2 equilibrium constant is quoted (°C).
const CO2_REFERENCE_TEMPERATURE: f64 = 25.0;

/// Q10 rate multiplier: `q10^((T - T_ref) / 10)`.
pub fn q10_factor(q10: f64, temperature: f64, reference: f64) -> f64 {
    q10.powf((temperature - reference) / 10.0)
}

/// Dissolved O2 at saturation (mg/L) for fresh water at `temperature` °C.
///
/// Cubic fit valid for 0-40 °C. Never negative.
pub fn o2_saturation(temperature: f64) -> f64 {
    let t = temperature;
    (14.652 - 0.410_22 * t + 0.007_991 * t * t - 0.000_077_774 * t * t * t).max(0.0)
}

/// CO2 concentration (mg/L) in equilibrium with the atmosphere.
///
/// Colder water holds more CO2; the coefficient is linear around 25 °C.
pub fn co2_equilibrium(temperature: f64, config: &GasExchangeConfig) -> f64 {
    let factor =
        1.0 + config.co2_temperature_coefficient * (CO2_REFERENCE_TEMPERATURE - temperature);
    (config.atmospheric_co2 * factor).max(0.0)
}

/// Volume-weighted average of two concentrations or temperatures.
///
/// Returns `existing` when the combined volume is not positive.
pub fn blend_volume(existing: f64, existing_volume: f64, added: f64, added_volume: f64) -> f64 {
    let total = existing_volume + added_volume;
    if total <= 0.0 {
        return existing;
    }
    (existing * existing_volume + added * added_volume) / total
}

/// Temperature after mixing two water bodies.
pub fn blend_temperature(
    existing: f64,
    existing_volume: f64,
    added: f64,
    added_volume: f64,
) -> f64 {
    blend_volume(existing, existing_volume, added, added_volume)
}

/// pH after mixing two water bodies.
///
/// pH is logarithmic, so the H+ concentrations are blended and converted
/// back.
pub fn blend_ph(existing: f64, existing_volume: f64, added: f64, added_volume: f64) -> f64 {
    let h_existing = 10f64.powf(-existing);
    let h_added = 10f64.powf(-added);
    let h = blend_volume(h_existing, existing_volume, h_added, added_volume);
    if h <= 0.0 {
        return existing;
    }
    -h.log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_volumes_average() {
        assert!((blend_temperature(26.0, 50.0, 20.0, 50.0) - 23.0).abs() < 1e-12);
    }

    #[test]
    fn zero_volume_keeps_existing() {
        assert!((blend_volume(7.0, 0.0, 3.0, 0.0) - 7.0).abs() < f64::EPSILON);
        assert!((blend_volume(7.0, 0.0, 3.0, 10.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ph_blends_logarithmically() {
        let ph = blend_ph(6.0, 50.0, 8.0, 50.0);
        // H+ of pH 6 dominates: result ≈ 6.3, well below the linear mean 7.
        assert!((ph - 6.2967).abs() < 1e-3, "got {ph}");
        assert!((blend_ph(7.0, 30.0, 7.0, 70.0) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn o2_saturation_falls_with_temperature() {
        let cold = o2_saturation(10.0);
        let warm = o2_saturation(30.0);
        assert!(cold > warm);
        assert!((o2_saturation(25.0) - 8.18).abs() < 0.05);
    }

    #[test]
    fn co2_equilibrium_around_reference() {
        let config = GasExchangeConfig::default();
        assert!((co2_equilibrium(25.0, &config) - 0.5).abs() < 1e-12);
        assert!(co2_equilibrium(15.0, &config) > co2_equilibrium(30.0, &config));
    }

    #[test]
    fn q10_doubles_every_ten_degrees() {
        assert!((q10_factor(2.0, 35.0, 25.0) - 2.0).abs() < 1e-12);
        assert!((q10_factor(2.0, 15.0, 25.0) - 0.5).abs() < 1e-12);
    }
}
