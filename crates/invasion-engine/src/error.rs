//! Error types for the `invasion` binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup, the run, and report output.

/// Top-level error for the `invasion` binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: invasion_core::ConfigError,
    },

    /// The map could not be loaded.
    #[error("map error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: invasion_world::WorldError,
    },

    /// The simulation failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: invasion_core::SimulationError,
    },

    /// Writing the report to stdout failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
