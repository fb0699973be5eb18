//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup, the run itself and
//! writing the save file, so `main` can propagate with `?`.

use std::path::PathBuf;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: aquarium_core::ConfigError,
    },

    /// The tank could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: aquarium_world::WorldError,
    },

    /// A tick failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: aquarium_core::TickError,
    },

    /// A save file could not be encoded or decoded.
    #[error("persistence error: {source}")]
    Persistence {
        /// The underlying persistence error.
        #[from]
        source: aquarium_core::PersistenceError,
    },

    /// Reading or writing a save file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
