//! `invasion` binary: agents random-walk a map and destroy every location
//! where two or more of them meet.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments (agent count, map file)
//! 2. Load configuration from `invasion-config.yaml` if present
//! 3. Initialize structured logging (tracing, to stderr)
//! 4. Load the map
//! 5. Place agents and run the simulation, printing each destroyed location
//! 6. Print the surviving map and log the result

mod cli;
mod error;
mod report;

use std::io::{self, Write as _};
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use invasion_core::config::CONFIG_FILE;
use invasion_core::{
    InvasionSimulation, RunBounds, SimulationConfig, SimulationResult, log_simulation_end,
    run_simulation,
};
use invasion_world::{load_map, to_map_file};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::EngineError;
use crate::report::ReportPrinter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the config or map cannot be loaded, or the run fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = Path::new(CONFIG_FILE);
    let config = SimulationConfig::load_or_default(config_path)?;

    init_tracing(&config.logging.level);
    info!(
        config_file = config_path.exists(),
        max_steps = config.simulation.max_steps,
        seed = config.simulation.seed,
        early_exit = config.simulation.early_exit,
        "Configuration loaded"
    );

    let result = run(&cli, &config)?;
    log_simulation_end(&result);

    info!(
        end_reason = ?result.end_reason,
        total_steps = result.total_steps,
        "invasion shutdown complete"
    );
    Ok(())
}

/// Logs go to stderr so stdout carries only the report. `RUST_LOG` wins over
/// the configured level; an unparsable level falls back to `info`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli, config: &SimulationConfig) -> Result<SimulationResult, EngineError> {
    let graph = Arc::new(load_map(&cli.map)?);
    info!(
        map = %cli.map.display(),
        locations = graph.location_count(),
        "Map loaded"
    );

    let mut sim = match config.simulation.seed {
        Some(seed) => InvasionSimulation::seeded(Arc::clone(&graph), seed),
        None => InvasionSimulation::from_entropy(Arc::clone(&graph)),
    };
    sim.initialize(cli.agents)?;
    info!(
        agents = cli.agents,
        occupied_locations = sim.occupancy().len(),
        "Agents placed"
    );

    let stdout = io::stdout();
    let mut printer = ReportPrinter::new(stdout.lock());
    let result = run_simulation(
        &mut sim,
        RunBounds::from(&config.simulation),
        &mut printer,
    )?;
    info!(events_reported = printer.lines(), "Run complete");
    let mut out = printer.finish()?;

    if config.output.print_final_map {
        out.write_all(to_map_file(&graph).as_bytes())?;
        out.flush()?;
    }
    Ok(result)
}
