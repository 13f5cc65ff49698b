//! Bounded simulation loop.
//!
//! [`run_simulation`] drives [`InvasionSimulation::step`] until one of the
//! end conditions is met:
//!
//! - **Ceiling**: `max_steps` steps have run.
//! - **Extinction** (early exit only): no agents are left.
//! - **Stalemate** (early exit only): every surviving agent is alone on a
//!   location with no neighbors, so no further step can move or destroy
//!   anything.
//!
//! Both early-exit states are fixed points of the step cycle and consume no
//! randomness, so stopping early yields the same events and the same final
//! world as running to the ceiling.

use rand::Rng;
use tracing::info;

use crate::config::SimulationSettings;
use crate::simulation::{DEFAULT_MAX_STEPS, InvasionSimulation, SimulationError, StepReport};

/// Limits for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBounds {
    /// Iteration ceiling.
    pub max_steps: u64,
    /// Stop before the ceiling on extinction or stalemate.
    pub early_exit: bool,
}

impl RunBounds {
    /// Run exactly `max_steps` steps.
    pub const fn fixed(max_steps: u64) -> Self {
        Self {
            max_steps,
            early_exit: false,
        }
    }
}

impl Default for RunBounds {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            early_exit: true,
        }
    }
}

impl From<&SimulationSettings> for RunBounds {
    fn from(settings: &SimulationSettings) -> Self {
        Self {
            max_steps: settings.max_steps,
            early_exit: settings.early_exit,
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// The iteration ceiling was reached.
    MaxStepsReached,
    /// Every agent was destroyed.
    Extinction,
    /// Survivors remain but none can ever move or collide again.
    Stalemate,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// The reason the run ended.
    pub end_reason: SimulationEndReason,
    /// Number of steps executed by this run.
    pub total_steps: u64,
    /// Number of locations destroyed by this run.
    pub destroyed: usize,
    /// Agents alive when the run ended.
    pub agents_alive: usize,
}

/// Callback invoked after each step completes.
pub trait StepCallback {
    /// Called after a step completes successfully.
    fn on_step(&mut self, report: &StepReport);
}

/// A callback that ignores every step.
pub struct NoOpCallback;

impl StepCallback for NoOpCallback {
    fn on_step(&mut self, _report: &StepReport) {}
}

/// Run the simulation until a termination condition is met.
///
/// The ceiling is checked before each step, then the early-exit states
/// when enabled. A ceiling of zero runs no steps.
///
/// # Errors
///
/// Returns [`SimulationError`] if a step fails.
pub fn run_simulation<R: Rng>(
    sim: &mut InvasionSimulation<R>,
    bounds: RunBounds,
    callback: &mut dyn StepCallback,
) -> Result<SimulationResult, SimulationError> {
    let mut total_steps: u64 = 0;
    let mut destroyed: usize = 0;

    info!(
        max_steps = bounds.max_steps,
        early_exit = bounds.early_exit,
        agents = sim.agents_alive(),
        locations = sim.graph().location_count(),
        "Simulation starting"
    );

    let end_reason = loop {
        if total_steps >= bounds.max_steps {
            info!(max_steps = bounds.max_steps, "Step limit reached");
            break SimulationEndReason::MaxStepsReached;
        }

        if bounds.early_exit {
            if sim.agents_alive() == 0 {
                info!(step = sim.current_step(), "All agents destroyed -- extinction");
                break SimulationEndReason::Extinction;
            }
            if sim.is_settled() {
                info!(
                    step = sim.current_step(),
                    agents_alive = sim.agents_alive(),
                    "No agent can move or collide -- stalemate"
                );
                break SimulationEndReason::Stalemate;
            }
        }

        let report = sim.step()?;
        total_steps = total_steps.saturating_add(1);
        destroyed = destroyed.saturating_add(report.destroyed.len());

        callback.on_step(&report);
    };

    Ok(SimulationResult {
        end_reason,
        total_steps,
        destroyed,
        agents_alive: sim.agents_alive(),
    })
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_steps = result.total_steps,
        destroyed = result.destroyed,
        agents_alive = result.agents_alive,
        "Simulation ended"
    );
}
