//! Seeded runs are reproducible, and early exit never changes the outcome.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::sync::Arc;

use invasion_core::{
    InvasionSimulation, RunBounds, SimulationEndReason, StepCallback, StepReport, run_simulation,
};
use invasion_types::{AgentId, LocationName};
use invasion_world::{map_lines, parse_map};

/// Map text for a `size` x `size` grid of `c{x}_{y}` cells.
fn grid_map(size: usize) -> String {
    let mut text = String::new();
    for y in 0..size {
        for x in 0..size {
            let _ = write!(text, "c{x}_{y}");
            if x + 1 < size {
                let _ = write!(text, " east=c{}_{y}", x + 1);
            }
            if y + 1 < size {
                let _ = write!(text, " south=c{x}_{}", y + 1);
            }
            text.push('\n');
        }
    }
    text
}

#[derive(Default)]
struct EventLog {
    lines: Vec<String>,
}

impl StepCallback for EventLog {
    fn on_step(&mut self, report: &StepReport) {
        for event in &report.destroyed {
            self.lines.push(format!("{}: {event}", event.step));
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<String>,
    occupancy: BTreeMap<LocationName, BTreeSet<AgentId>>,
    map: Vec<String>,
    end_reason: SimulationEndReason,
}

fn replay(seed: u64, agents: u32, bounds: RunBounds) -> ReplayOutcome {
    let graph = Arc::new(parse_map(&grid_map(6)).unwrap());
    let mut sim = InvasionSimulation::seeded(Arc::clone(&graph), seed);
    sim.initialize(agents).unwrap();

    let mut log = EventLog::default();
    let result = run_simulation(&mut sim, bounds, &mut log).unwrap();

    ReplayOutcome {
        events: log.lines,
        occupancy: sim.occupancy().clone(),
        map: map_lines(&graph),
        end_reason: result.end_reason,
    }
}

#[test]
fn same_seed_replays_identically() {
    for seed in [1, 7, 42, 1_234] {
        let first = replay(seed, 20, RunBounds::default());
        let second = replay(seed, 20, RunBounds::default());
        assert_eq!(first, second, "replay diverged for seed {seed}");
        assert!(!first.events.is_empty(), "seed {seed} destroyed nothing");
    }
}

#[test]
fn early_exit_matches_full_run() {
    for seed in 0..20 {
        let early = replay(
            seed,
            12,
            RunBounds {
                max_steps: 2_000,
                early_exit: true,
            },
        );
        let full = replay(seed, 12, RunBounds::fixed(2_000));

        assert_eq!(early.events, full.events, "events differ for seed {seed}");
        assert_eq!(early.occupancy, full.occupancy, "occupancy differs for seed {seed}");
        assert_eq!(early.map, full.map, "map differs for seed {seed}");
        assert_eq!(full.end_reason, SimulationEndReason::MaxStepsReached);
    }
}

#[test]
fn two_agents_on_a_single_edge_collide_at_once() {
    let graph = Arc::new(parse_map("X north=Y\n").unwrap());
    let mut sim = InvasionSimulation::seeded(Arc::clone(&graph), 99);
    sim.place_agent(AgentId::new(1), "X").unwrap();
    sim.place_agent(AgentId::new(2), "X").unwrap();

    let mut log = EventLog::default();
    let result = run_simulation(&mut sim, RunBounds::default(), &mut log).unwrap();

    assert_eq!(log.lines, vec!["1: Y has been destroyed by alien 1 and alien 2!"]);
    assert_eq!(result.end_reason, SimulationEndReason::Extinction);
    assert_eq!(map_lines(&graph), vec!["X north=- south=- east=- west=-"]);
}
