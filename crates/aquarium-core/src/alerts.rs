//! Threshold alerts with hysteresis.
//!
//! An alert fires once when its condition becomes true and stays silent
//! while the condition holds. It re-arms as soon as the condition clears,
//! so a value that drops below the threshold and crosses it again fires a
//! second time. The latch of every alert lives in
//! [`SimulationState::alert_state`] and is persisted with the state.

use aquarium_types::{AlertKind, AlertState, LogEntry, LogSource, ResourceKey, Severity, SimulationState};
use aquarium_world::definition;
use tracing::info;

/// Water below this share of capacity is critical.
pub const WATER_LEVEL_CRITICAL_FRACTION: f64 = 0.2;
/// Algae level at which the glass is considered overgrown.
pub const HIGH_ALGAE: f64 = 80.0;
/// Ammonia above this concentration (ppm) is toxic.
pub const HIGH_AMMONIA_PPM: f64 = 0.02;
/// Nitrite above this concentration (ppm) is toxic.
pub const HIGH_NITRITE_PPM: f64 = 0.1;
/// Nitrate above this concentration (ppm) calls for a water change.
pub const HIGH_NITRATE_PPM: f64 = 20.0;
/// Dissolved oxygen below this level (mg/L) suffocates fish.
pub const LOW_OXYGEN: f64 = 4.0;
/// Dissolved CO2 above this level (mg/L) suffocates fish.
pub const HIGH_CO2: f64 = 30.0;

/// Outcome of evaluating one alert against a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertCheck {
    /// Entry to append when the alert fires this tick.
    pub log: Option<LogEntry>,
    /// New latch value.
    pub latched: bool,
}

/// A condition watched after every tick.
pub trait Alert: core::fmt::Debug + Send + Sync {
    /// Which latch this alert owns.
    fn kind(&self) -> AlertKind;

    /// Whether the alarming condition holds in `state`.
    fn triggered(&self, state: &SimulationState) -> bool;

    /// Message written when the alert fires.
    fn message(&self, state: &SimulationState) -> String;

    /// Evaluate the alert with hysteresis against the latch in `state`.
    fn check(&self, state: &SimulationState) -> AlertCheck {
        if !self.triggered(state) {
            return AlertCheck {
                log: None,
                latched: false,
            };
        }
        let log = if state.alert_state.get(self.kind()) {
            None
        } else {
            Some(LogEntry {
                tick: state.tick,
                source: LogSource::Alert,
                severity: Severity::Warning,
                message: self.message(state),
            })
        };
        AlertCheck { log, latched: true }
    }
}

fn show(state: &SimulationState, key: ResourceKey) -> String {
    definition(key).format(state.resources.get(key), state.resources.water)
}

/// Water level below a fifth of capacity, in a tank that still holds water.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaterLevelCritical;

impl Alert for WaterLevelCritical {
    fn kind(&self) -> AlertKind {
        AlertKind::WaterLevelCritical
    }

    fn triggered(&self, state: &SimulationState) -> bool {
        let water = state.resources.water;
        water > 0.0 && water < state.tank.capacity * WATER_LEVEL_CRITICAL_FRACTION
    }

    fn message(&self, state: &SimulationState) -> String {
        format!(
            "Water level critical: {} of {:.0} L left. Top off the tank.",
            show(state, ResourceKey::Water),
            state.tank.capacity
        )
    }
}

/// Algae covering the glass.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighAlgae;

impl Alert for HighAlgae {
    fn kind(&self) -> AlertKind {
        AlertKind::HighAlgae
    }

    fn triggered(&self, state: &SimulationState) -> bool {
        state.resources.algae >= HIGH_ALGAE
    }

    fn message(&self, state: &SimulationState) -> String {
        format!("Algae is taking over ({}). Scrub the glass.", show(state, ResourceKey::Algae))
    }
}

/// A dissolved compound above its concentration limit.
#[derive(Debug, Clone, Copy)]
pub struct Concentration {
    kind: AlertKind,
    key: ResourceKey,
    limit_ppm: f64,
}

impl Concentration {
    /// Ammonia above [`HIGH_AMMONIA_PPM`].
    pub const fn ammonia() -> Self {
        Self {
            kind: AlertKind::HighAmmonia,
            key: ResourceKey::Ammonia,
            limit_ppm: HIGH_AMMONIA_PPM,
        }
    }

    /// Nitrite above [`HIGH_NITRITE_PPM`].
    pub const fn nitrite() -> Self {
        Self {
            kind: AlertKind::HighNitrite,
            key: ResourceKey::Nitrite,
            limit_ppm: HIGH_NITRITE_PPM,
        }
    }

    /// Nitrate above [`HIGH_NITRATE_PPM`].
    pub const fn nitrate() -> Self {
        Self {
            kind: AlertKind::HighNitrate,
            key: ResourceKey::Nitrate,
            limit_ppm: HIGH_NITRATE_PPM,
        }
    }
}

impl Alert for Concentration {
    fn kind(&self) -> AlertKind {
        self.kind
    }

    fn triggered(&self, state: &SimulationState) -> bool {
        state.resources.ppm(self.key) > self.limit_ppm
    }

    fn message(&self, state: &SimulationState) -> String {
        let def = definition(self.key);
        format!(
            "High {} ({}, limit {} ppm). Change some water.",
            def.label.to_lowercase(),
            show(state, self.key),
            self.limit_ppm
        )
    }
}

/// Too little dissolved oxygen.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowOxygen;

impl Alert for LowOxygen {
    fn kind(&self) -> AlertKind {
        AlertKind::LowOxygen
    }

    fn triggered(&self, state: &SimulationState) -> bool {
        state.resources.oxygen < LOW_OXYGEN
    }

    fn message(&self, state: &SimulationState) -> String {
        format!("Low oxygen ({}). Add aeration.", show(state, ResourceKey::Oxygen))
    }
}

/// Too much dissolved CO2.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighCo2;

impl Alert for HighCo2 {
    fn kind(&self) -> AlertKind {
        AlertKind::HighCo2
    }

    fn triggered(&self, state: &SimulationState) -> bool {
        state.resources.co2 > HIGH_CO2
    }

    fn message(&self, state: &SimulationState) -> String {
        format!("High CO2 ({}). Reduce CO2 injection.", show(state, ResourceKey::Co2))
    }
}

/// Ordered collection of alerts.
#[derive(Debug, Default)]
pub struct AlertRegistry {
    alerts: Vec<Box<dyn Alert>>,
}

impl AlertRegistry {
    /// Registry over the given alerts, evaluated in this order.
    pub fn new(alerts: Vec<Box<dyn Alert>>) -> Self {
        Self { alerts }
    }

    /// The seven built-in alerts.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(WaterLevelCritical),
            Box::new(HighAlgae),
            Box::new(Concentration::ammonia()),
            Box::new(Concentration::nitrite()),
            Box::new(Concentration::nitrate()),
            Box::new(LowOxygen),
            Box::new(HighCo2),
        ])
    }

    /// Number of registered alerts.
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Whether no alert is registered.
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Evaluate every alert and return the new latches and the entries of
    /// the alerts that fired, in registration order.
    pub fn run(&self, state: &SimulationState) -> (AlertState, Vec<LogEntry>) {
        let mut latches = state.alert_state;
        let mut logs = Vec::new();
        for alert in &self.alerts {
            let check = alert.check(state);
            latches.set(alert.kind(), check.latched);
            if let Some(entry) = check.log {
                info!(tick = state.tick, alert = ?alert.kind(), message = %entry.message, "alert fired");
                logs.push(entry);
            }
        }
        (latches, logs)
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use aquarium_world::{DEFAULT_ENVIRONMENT, initial_state};

    use super::*;

    #[allow(clippy::panic)]
    fn clean_tank() -> SimulationState {
        let mut state = match initial_state(100.0, DEFAULT_ENVIRONMENT) {
            Ok(state) => state,
            Err(e) => panic!("fixture tank: {e}"),
        };
        state.resources.oxygen = 8.0;
        state.resources.co2 = 4.0;
        state.resources.algae = 0.0;
        state
    }

    /// Feed a sequence of ammonia masses through the registry, carrying the
    /// latches forward, and report which steps fired.
    fn ammonia_firings(masses: &[f64]) -> Vec<bool> {
        let registry = AlertRegistry::standard();
        let mut state = clean_tank();
        masses
            .iter()
            .map(|&mass| {
                state.resources.ammonia = mass;
                let (latches, logs) = registry.run(&state);
                state.alert_state = latches;
                !logs.is_empty()
            })
            .collect()
    }

    #[test]
    fn ammonia_fires_once_per_crossing() {
        // 0, 0.05, 0.05, 0.01, 0.08 ppm in 100 L.
        let fired = ammonia_firings(&[0.0, 5.0, 5.0, 1.0, 8.0]);
        assert_eq!(fired, vec![false, true, false, false, true]);
    }

    #[test]
    fn clean_tank_is_quiet() {
        let (latches, logs) = AlertRegistry::standard().run(&clean_tank());
        assert!(logs.is_empty(), "{logs:?}");
        assert_eq!(latches, AlertState::default());
    }

    #[test]
    fn empty_tank_is_not_critical() {
        let mut state = clean_tank();
        state.resources.water = 0.0;
        assert!(!WaterLevelCritical.triggered(&state));
        state.resources.water = 10.0;
        assert!(WaterLevelCritical.triggered(&state));
        state.resources.water = 20.0;
        assert!(!WaterLevelCritical.triggered(&state));
    }

    #[test]
    fn firing_entries_are_warnings_from_alerts() {
        let mut state = clean_tank();
        state.resources.oxygen = 2.0;
        state.resources.co2 = 40.0;
        let (latches, logs) = AlertRegistry::standard().run(&state);
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|l| l.source == LogSource::Alert && l.severity == Severity::Warning));
        assert!(logs[0].message.starts_with("Low oxygen"));
        assert!(logs[1].message.starts_with("High CO2"));
        assert!(latches.low_oxygen && latches.high_co2);
    }

    #[test]
    fn algae_threshold_is_inclusive() {
        let mut state = clean_tank();
        state.resources.algae = 80.0;
        assert!(HighAlgae.triggered(&state));
        state.resources.algae = 79.9;
        assert!(!HighAlgae.triggered(&state));
    }
}
