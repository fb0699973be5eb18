//! Equipment controllers.
//!
//! Active devices (heater, auto-top-off, CO2 generator, auto-feeder) are
//! [`Controller`]s: each hour they inspect the state, decide whether they
//! run, emit effects and record the decision on their device through
//! [`Controller::apply_state_change`]. The orchestrator runs every
//! controller against the same snapshot taken after the immediate tier.
//! A controller that wants a log line returns it with its output, so the
//! state writer only ever touches device flags.
//!
//! Passive devices (filter, powerhead, light, air pump, substrate,
//! hardscape, lid) do not emit effects. Their contribution to surface,
//! flow, light and aeration is recomputed from scratch at the start of
//! every tick by [`passive::compute_passive`].

pub mod auto_feeder;
pub mod auto_top_off;
pub mod co2_generator;
pub mod heater;
pub mod passive;

use aquarium_types::{
    AirPump, AutoFeeder, AutoTopOff, Co2Generator, DailySchedule, Equipment, Filter,
    FilterType, Hardscape, Heater, Lid, LidType, Light, LogEntry, LogSource, Powerhead,
    Severity, SimulationState, Substrate, SubstrateType,
};
use tracing::trace;

use crate::config::TunableConfig;
use crate::effects::Effect;

/// What a controller decided this hour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerOutput {
    /// Effects to apply.
    pub effects: Vec<Effect>,
    /// Whether the device ran.
    pub is_on: bool,
    /// Entry appended to the log when the decision is applied.
    pub log: Option<LogEntry>,
}

impl ControllerOutput {
    /// The device stayed off and did nothing.
    pub const fn off() -> Self {
        Self {
            effects: Vec::new(),
            is_on: false,
            log: None,
        }
    }
}

/// Info-level equipment log entry stamped with the state's tick.
pub fn equipment_log(state: &SimulationState, message: impl Into<String>) -> LogEntry {
    LogEntry {
        tick: state.tick,
        source: LogSource::Equipment,
        severity: Severity::Info,
        message: message.into(),
    }
}

/// Combined result of one controller pass.
#[derive(Debug, Default)]
pub struct ControllerPass<'a> {
    /// Effects of every controller, in registration order.
    pub effects: Vec<Effect>,
    /// Each controller with its on/off decision.
    pub decisions: Vec<(&'a dyn Controller, bool)>,
    /// Log entries the controllers asked for.
    pub logs: Vec<LogEntry>,
}

/// An active piece of equipment.
pub trait Controller: core::fmt::Debug + Send + Sync {
    /// Stable name, used as the [`Effect::source`] of produced effects.
    fn name(&self) -> &'static str;

    /// Decide this hour's behavior from the current state.
    fn update(&self, state: &SimulationState, config: &TunableConfig) -> ControllerOutput;

    /// Record the decision on the device, returning the new state.
    ///
    /// Only device flags are written, so applying the same decision twice
    /// gives the same state as applying it once.
    fn apply_state_change(&self, state: SimulationState, is_on: bool) -> SimulationState;
}

/// Ordered collection of controllers.
#[derive(Debug, Default)]
pub struct ControllerRegistry {
    controllers: Vec<Box<dyn Controller>>,
}

impl ControllerRegistry {
    /// Build a registry from an explicit list.
    pub fn new(controllers: Vec<Box<dyn Controller>>) -> Self {
        Self { controllers }
    }

    /// Every built-in controller.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(heater::HeaterController),
            Box::new(auto_top_off::AutoTopOffController),
            Box::new(co2_generator::Co2GeneratorController),
            Box::new(auto_feeder::AutoFeederController),
        ])
    }

    /// Number of registered controllers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Iterate over the registered controllers.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Controller> {
        self.controllers.iter().map(AsRef::as_ref)
    }

    /// Run every controller against the same snapshot.
    ///
    /// Effects, decisions and logs come back in registration order.
    pub fn run(&self, state: &SimulationState, config: &TunableConfig) -> ControllerPass<'_> {
        let mut pass = ControllerPass {
            decisions: Vec::with_capacity(self.controllers.len()),
            ..ControllerPass::default()
        };
        for controller in self.iter() {
            let output = controller.update(state, config);
            trace!(
                tick = state.tick,
                controller = controller.name(),
                is_on = output.is_on,
                "controller update"
            );
            pass.effects.extend(output.effects);
            pass.decisions.push((controller, output.is_on));
            pass.logs.extend(output.log);
        }
        pass
    }
}

/// Equipment of a new tank of `capacity` liters.
///
/// A heater (1 W/L, 25 °C) and a hang-on-back filter are running, the
/// light is on a 10-hour photoperiod from 08:00, the floor is gravel.
/// Everything else is installed but disabled.
pub fn default_equipment(capacity: f64) -> Equipment {
    let photoperiod = DailySchedule {
        start_hour: 8,
        duration: 10,
    };
    Equipment {
        heater: Heater {
            enabled: true,
            is_on: false,
            target_temperature: 25.0,
            wattage: capacity.max(0.0).round(),
        },
        auto_top_off: AutoTopOff {
            enabled: false,
            is_on: false,
        },
        filter: Filter {
            enabled: true,
            is_on: false,
            filter_type: FilterType::HangOnBack,
        },
        powerhead: Powerhead {
            enabled: false,
            is_on: false,
            flow_rate_gph: 100.0,
        },
        substrate: Substrate {
            substrate_type: SubstrateType::Gravel,
        },
        hardscape: Hardscape::default(),
        co2_generator: Co2Generator {
            enabled: false,
            is_on: false,
            bubble_rate: 1.0,
            schedule: photoperiod,
        },
        auto_feeder: AutoFeeder {
            enabled: false,
            is_on: false,
            amount: 0.2,
            feeding_hour: 8,
            fed_today: false,
        },
        light: Light {
            enabled: true,
            is_on: false,
            wattage: (capacity.max(0.0) * 0.5).round(),
            schedule: photoperiod,
        },
        air_pump: AirPump {
            enabled: false,
            is_on: false,
        },
        lid: Lid {
            lid_type: LidType::None,
        },
    }
}
