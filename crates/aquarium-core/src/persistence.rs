//! Save files.
//!
//! A save is a JSON envelope holding the state (without its log), the
//! tunables it ran with, a schema version and a timestamp. Loading is
//! forgiving: every top-level section of the state is validated on its own
//! and a broken or missing section falls back to the default of a fresh
//! tank, so one corrupt field never loses the whole aquarium. Restored
//! resources are clamped to their registry bounds, and a resource section
//! holding more water than the restored tank is replaced. Stored
//! tunables are merged key by key into the current defaults, which keeps
//! old saves loadable after new tunables are added.

use aquarium_types::{
    AlertState, Environment, Equipment, Fish, Plant, ResourceKey, Resources, SimulationState,
    Tank,
};
use aquarium_world::equipment::default_equipment;
use aquarium_world::registry::{default_resources, definition};
use aquarium_world::tank::build_tank;
use aquarium_world::{DEFAULT_ENVIRONMENT, TunableConfig};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Version written into new save files.
pub const SCHEMA_VERSION: u32 = 1;

/// Capacity assumed when a save has no usable tank section.
const FALLBACK_CAPACITY: f64 = 100.0;

/// Errors that can occur when reading or writing a save file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The save could not be serialized or is not JSON at all.
    #[error("save file JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The JSON does not have the shape of a save file.
    #[error("malformed save file: {reason}")]
    MalformedEnvelope {
        /// What is missing or has the wrong type.
        reason: String,
    },
}

#[derive(Serialize)]
struct SaveEnvelope<'a> {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    state: &'a SimulationState,
    config: &'a TunableConfig,
}

/// A state and its tunables read back from a save file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSimulation {
    /// The restored state. Its log is empty.
    pub state: SimulationState,
    /// The stored tunables merged into the current defaults.
    pub config: TunableConfig,
    /// When the save was written, if the timestamp was readable.
    pub saved_at: Option<DateTime<Utc>>,
    /// Schema version found in the file.
    pub schema_version: u32,
    /// Sections that were missing or invalid and fell back to defaults.
    pub fallbacks: Vec<&'static str>,
}

/// Serialize a state and its tunables, stamped with the current time.
pub fn save(state: &SimulationState, config: &TunableConfig) -> Result<String, PersistenceError> {
    save_at(state, config, Utc::now())
}

/// Serialize a state and its tunables with an explicit timestamp.
pub fn save_at(
    state: &SimulationState,
    config: &TunableConfig,
    saved_at: DateTime<Utc>,
) -> Result<String, PersistenceError> {
    let envelope = SaveEnvelope {
        schema_version: SCHEMA_VERSION,
        saved_at,
        state,
        config,
    };
    let json = serde_json::to_string_pretty(&envelope)?;
    debug!(tick = state.tick, bytes = json.len(), "state serialized");
    Ok(json)
}

/// Restore a simulation from a save file.
///
/// # Errors
///
/// Returns [`PersistenceError::Json`] if `json` is not JSON and
/// [`PersistenceError::MalformedEnvelope`] if it is not an object with a
/// `state` object. Invalid sections inside the state never fail the load.
pub fn load(json: &str) -> Result<LoadedSimulation, PersistenceError> {
    let root: Value = serde_json::from_str(json)?;
    let Value::Object(envelope) = root else {
        return Err(PersistenceError::MalformedEnvelope {
            reason: "top level is not an object".to_owned(),
        });
    };
    let Some(Value::Object(stored)) = envelope.get("state") else {
        return Err(PersistenceError::MalformedEnvelope {
            reason: "missing state object".to_owned(),
        });
    };

    let schema_version = envelope
        .get("schema_version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or_else(|| {
            warn!("save file has no schema version, assuming {SCHEMA_VERSION}");
            SCHEMA_VERSION
        });
    if schema_version > SCHEMA_VERSION {
        warn!(schema_version, supported = SCHEMA_VERSION, "save file is newer than this engine");
    }
    let saved_at = envelope
        .get("saved_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc));

    let mut fallbacks = Vec::new();
    let tank = section::<Tank>(stored, "tank", &mut fallbacks)
        .and_then(|t| build_tank(t.capacity).ok())
        .or_else(|| build_tank(FALLBACK_CAPACITY).ok());
    let Some(tank) = tank else {
        return Err(PersistenceError::MalformedEnvelope {
            reason: "no usable tank".to_owned(),
        });
    };
    let capacity = tank.capacity;

    let state = SimulationState {
        tick: section(stored, "tick", &mut fallbacks).unwrap_or(0),
        resources: restore_resources(stored, capacity, &mut fallbacks),
        environment: section::<Environment>(stored, "environment", &mut fallbacks)
            .unwrap_or(DEFAULT_ENVIRONMENT),
        equipment: section::<Equipment>(stored, "equipment", &mut fallbacks)
            .unwrap_or_else(|| default_equipment(capacity)),
        plants: section::<Vec<Plant>>(stored, "plants", &mut fallbacks).unwrap_or_default(),
        fish: section::<Vec<Fish>>(stored, "fish", &mut fallbacks).unwrap_or_default(),
        logs: Vec::new(),
        alert_state: section::<AlertState>(stored, "alert_state", &mut fallbacks)
            .unwrap_or_default(),
        tank,
    };

    let config = merge_config(envelope.get("config"));
    Ok(LoadedSimulation {
        state,
        config,
        saved_at,
        schema_version,
        fallbacks,
    })
}

/// Decode one state section, recording a fallback when it is missing or
/// does not decode.
fn section<T: DeserializeOwned>(
    stored: &Map<String, Value>,
    name: &'static str,
    fallbacks: &mut Vec<&'static str>,
) -> Option<T> {
    let Some(value) = stored.get(name) else {
        warn!(section = name, "save file section missing, using default");
        fallbacks.push(name);
        return None;
    };
    match serde_json::from_value::<T>(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(section = name, error = %e, "save file section invalid, using default");
            fallbacks.push(name);
            None
        }
    }
}

/// Decode the resource section and pull every value inside its bounds.
///
/// A section with more water than `capacity` belongs to a different tank;
/// its concentrations cannot be trusted, so the defaults are used instead.
fn restore_resources(
    stored: &Map<String, Value>,
    capacity: f64,
    fallbacks: &mut Vec<&'static str>,
) -> Resources {
    let decoded = section::<Resources>(stored, "resources", fallbacks).filter(|r| {
        let fits = r.water <= capacity;
        if !fits {
            warn!(water = r.water, capacity, "saved water exceeds tank capacity, using defaults");
            fallbacks.push("resources");
        }
        fits
    });
    let Some(mut resources) = decoded else {
        return default_resources(capacity);
    };
    for key in ResourceKey::ALL {
        let value = resources.get(key);
        let clamped = definition(key).clamp(value, capacity);
        if clamped.to_bits() != value.to_bits() {
            debug!(?key, value, clamped, "saved resource out of bounds");
            resources.set(key, clamped);
        }
    }
    resources
}

/// Merge stored tunables into the current defaults.
fn merge_config(stored: Option<&Value>) -> TunableConfig {
    let Some(stored) = stored else {
        return TunableConfig::default();
    };
    let Ok(mut merged) = serde_json::to_value(TunableConfig::default()) else {
        return TunableConfig::default();
    };
    merge_json(&mut merged, stored);
    serde_json::from_value(merged).unwrap_or_else(|e| {
        warn!(error = %e, "stored tunables invalid, using defaults");
        TunableConfig::default()
    })
}

/// Recursively overlay `overlay` onto `base`.
///
/// Objects merge key by key; only keys already present in `base` are taken
/// so unknown keys from older or newer engines are dropped. Any other value
/// replaces the base value when both have the same JSON type.
pub fn merge_json(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                if let Some(slot) = base_map.get_mut(key) {
                    merge_json(slot, value);
                }
            }
        }
        (base, overlay) if same_kind(base, overlay) => {
            *base = overlay.clone();
        }
        (_, overlay) => {
            debug!(value = %overlay, "ignoring stored value of the wrong type");
        }
    }
}

const fn same_kind(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Null, Value::Null)
            | (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Array(_), Value::Array(_))
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use aquarium_types::{LogSource, Severity};
    use aquarium_world::initial_state;
    use serde_json::json;

    use super::*;

    fn tank() -> SimulationState {
        initial_state(80.0, DEFAULT_ENVIRONMENT).unwrap()
    }

    #[test]
    fn save_and_load_restore_the_state() {
        let mut state = tank();
        state.tick = 42;
        state.resources.nitrate = 123.0;
        state.log(LogSource::User, Severity::Info, "hello");
        let json = save(&state, &TunableConfig::default()).unwrap();

        let loaded = load(&json).unwrap();
        assert!(loaded.fallbacks.is_empty(), "{:?}", loaded.fallbacks);
        assert_eq!(loaded.state.tick, 42);
        assert!(loaded.state.logs.is_empty());
        state.logs.clear();
        assert_eq!(loaded.state, state);
        assert_eq!(loaded.schema_version, SCHEMA_VERSION);
        assert!(loaded.saved_at.is_some());
    }

    #[test]
    fn logs_are_not_written() {
        let mut state = tank();
        state.log(LogSource::User, Severity::Info, "secret");
        let json = save(&state, &TunableConfig::default()).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn broken_section_falls_back_alone() {
        let state = tank();
        let json = save(&state, &TunableConfig::default()).unwrap();
        let mut value: Value = serde_json::from_str(&json).unwrap();
        value["state"]["fish"] = json!("not a list");
        if let Some(stored) = value["state"].as_object_mut() {
            stored.remove("environment");
        }

        let loaded = load(&value.to_string()).unwrap();
        assert_eq!(loaded.fallbacks, vec!["environment", "fish"]);
        assert!(loaded.state.fish.is_empty());
        assert_eq!(loaded.state.environment, DEFAULT_ENVIRONMENT);
        assert_eq!(loaded.state.resources, state.resources);
    }

    #[test]
    fn stored_config_merges_into_defaults() {
        let json = json!({
            "schema_version": 1,
            "state": {},
            "config": {
                "fish": { "hunger_rate": 4.0, "unknown": 1 },
                "decay": "oops"
            }
        });
        let loaded = load(&json.to_string()).unwrap();
        let defaults = TunableConfig::default();
        assert!((loaded.config.fish.hunger_rate - 4.0).abs() < f64::EPSILON);
        assert!((loaded.config.fish.eat_threshold - defaults.fish.eat_threshold).abs() < f64::EPSILON);
        assert_eq!(loaded.config.decay, defaults.decay);
        assert!((loaded.state.tank.capacity - FALLBACK_CAPACITY).abs() < f64::EPSILON);
    }

    #[test]
    fn corrupt_tank_does_not_overfill_the_fallback() {
        let state = initial_state(200.0, DEFAULT_ENVIRONMENT).unwrap();
        let json = save(&state, &TunableConfig::default()).unwrap();
        let mut value: Value = serde_json::from_str(&json).unwrap();
        value["state"]["tank"] = json!("broken");

        let loaded = load(&value.to_string()).unwrap();
        assert_eq!(loaded.fallbacks, vec!["tank", "resources"]);
        assert!((loaded.state.tank.capacity - FALLBACK_CAPACITY).abs() < f64::EPSILON);
        assert!(loaded.state.resources.water <= loaded.state.tank.capacity);
        assert_eq!(loaded.state.resources, default_resources(FALLBACK_CAPACITY));
    }

    #[test]
    fn out_of_range_resources_are_clamped() {
        let state = tank();
        let json = save(&state, &TunableConfig::default()).unwrap();
        let mut value: Value = serde_json::from_str(&json).unwrap();
        value["state"]["resources"]["ammonia"] = json!(-5.0);
        value["state"]["resources"]["water"] = json!(-1.0);
        value["state"]["tank"]["glass_surface"] = json!(1.0e9);

        let loaded = load(&value.to_string()).unwrap();
        assert!(loaded.fallbacks.is_empty(), "{:?}", loaded.fallbacks);
        for key in ResourceKey::ALL {
            let v = loaded.state.resources.get(key);
            let def = definition(key);
            assert!((def.clamp(v, 80.0) - v).abs() < f64::EPSILON, "{key:?} = {v}");
        }
        assert!(loaded.state.resources.ammonia >= 0.0);
        assert!(loaded.state.resources.water >= 0.0);
        assert_eq!(loaded.state.tank, state.tank);
    }

    #[test]
    fn malformed_envelopes_are_errors() {
        assert!(matches!(load("not json"), Err(PersistenceError::Json { .. })));
        assert!(matches!(load("[1, 2]"), Err(PersistenceError::MalformedEnvelope { .. })));
        assert!(matches!(
            load(r#"{"schema_version": 1}"#),
            Err(PersistenceError::MalformedEnvelope { .. })
        ));
    }

    #[test]
    fn merge_replaces_only_matching_types() {
        let mut base = json!({ "a": 1, "b": { "c": true, "d": "x" } });
        merge_json(&mut base, &json!({ "a": 2, "b": { "c": "no", "d": "y" }, "e": 3 }));
        assert_eq!(base, json!({ "a": 2, "b": { "c": true, "d": "y" } }));
    }
}
