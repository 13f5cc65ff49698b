//! Step cycle, run loop, and configuration for the Invasion simulation.
//!
//! This crate owns the two-phase step (movement, then collision) that
//! drives agents across an [`invasion_world::LocationGraph`] and destroys
//! locations where they meet.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `invasion-config.yaml` into
//!   strongly-typed structs.
//! - [`simulation`] -- [`InvasionSimulation`]: agent placement, the step
//!   cycle, and occupancy queries.
//! - [`runner`] -- The bounded run loop with early exit and per-step
//!   callbacks.

pub mod config;
pub mod runner;
pub mod simulation;

pub use config::{ConfigError, SimulationConfig};
pub use runner::{
    NoOpCallback, RunBounds, SimulationEndReason, SimulationResult, StepCallback,
    log_simulation_end, run_simulation,
};
pub use simulation::{DEFAULT_MAX_STEPS, InvasionSimulation, SimulationError, StepReport};
