//! Step cycle: random-walk movement followed by collision resolution.
//!
//! Each call to [`InvasionSimulation::step`] runs two phases:
//!
//! 1. **Movement** -- from a snapshot of the occupancy map taken at the start
//!    of the step, every agent on a location with at least one neighbor
//!    draws an independent, uniformly random neighbor. All draws happen
//!    before any move is applied, so every agent moves at most once per step.
//!    Agents on locations without neighbors stay put.
//!
//! 2. **Collision** -- every location now holding two or more agents is
//!    reported as a [`DestructionEvent`], removed from the graph, and dropped
//!    from the occupancy map together with its agents.
//!
//! Agents are never checked for collisions at placement time; initial
//! co-location only matters once the first collision phase runs.
//!
//! The simulation owns exactly one random source for its whole lifetime. With
//! a seeded source and the ordered maps used throughout, a run is fully
//! reproducible.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use invasion_types::{AgentId, DestructionEvent, LocationName};
use invasion_world::{LocationGraph, WorldError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::runner::{self, NoOpCallback, RunBounds, SimulationResult};

/// Iteration ceiling used when none is configured.
pub const DEFAULT_MAX_STEPS: u64 = 10_000;

/// Errors that can occur while driving the simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// A graph operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// An agent was placed on a location that does not exist.
    #[error("cannot place agent {agent} on unknown location {location}")]
    UnknownLocation {
        /// The agent being placed.
        agent: AgentId,
        /// The missing location.
        location: String,
    },
}

/// Summary of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// The step number (1-based) that was executed.
    pub step: u64,
    /// Number of agents that moved during the movement phase.
    pub moves: usize,
    /// Locations destroyed during the collision phase.
    pub destroyed: Vec<DestructionEvent>,
    /// Agents still alive at the end of the step.
    pub agents_alive: usize,
}

/// A move drawn during the movement phase, applied afterwards.
#[derive(Debug)]
struct PlannedMove {
    agent: AgentId,
    from: LocationName,
    to: LocationName,
}

/// Agents walking a [`LocationGraph`] and destroying it as they collide.
///
/// Occupancy entries are removed as soon as they become empty, so every key
/// in [`occupancy`](Self::occupancy) has at least one agent.
#[derive(Debug)]
pub struct InvasionSimulation<R = SmallRng> {
    /// The graph agents walk on. Destroyed locations are removed from it.
    graph: Arc<LocationGraph>,
    /// Location -> agents currently there.
    occupancy: BTreeMap<LocationName, BTreeSet<AgentId>>,
    /// The single random source for placement and neighbor draws.
    rng: R,
    /// Number of steps executed so far.
    step: u64,
}

impl InvasionSimulation<SmallRng> {
    /// Create a simulation whose random source is seeded with `seed`.
    pub fn seeded(graph: Arc<LocationGraph>, seed: u64) -> Self {
        Self::new(graph, SmallRng::seed_from_u64(seed))
    }

    /// Create a simulation whose random source is seeded from the OS.
    pub fn from_entropy(graph: Arc<LocationGraph>) -> Self {
        Self::new(graph, SmallRng::from_os_rng())
    }
}

impl<R: Rng> InvasionSimulation<R> {
    /// Create a simulation over `graph` drawing from `rng`. No agents are
    /// placed until [`initialize`](Self::initialize).
    pub const fn new(graph: Arc<LocationGraph>, rng: R) -> Self {
        Self {
            graph,
            occupancy: BTreeMap::new(),
            rng,
            step: 0,
        }
    }

    /// Place agents `1..=agent_count`, each on an independently and
    /// uniformly chosen location. Several agents may share a location.
    ///
    /// Any previous occupancy is discarded and the step counter is reset.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptySelection`] (wrapped) if the graph is empty
    /// and `agent_count > 0`.
    pub fn initialize(&mut self, agent_count: u32) -> Result<(), SimulationError> {
        self.occupancy.clear();
        self.step = 0;
        for raw in 1..=agent_count {
            let location = self.graph.pick_random_location(&mut self.rng)?;
            let _ = self
                .occupancy
                .entry(location)
                .or_default()
                .insert(AgentId::new(raw));
        }
        debug!(
            agents = agent_count,
            occupied_locations = self.occupancy.len(),
            "agents placed"
        );
        Ok(())
    }

    /// Put an agent on a specific location.
    ///
    /// The agent is first taken off any location it currently occupies.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownLocation`] if the location is not
    /// in the graph.
    pub fn place_agent(&mut self, agent: AgentId, location: &str) -> Result<(), SimulationError> {
        if !self.graph.contains(location) {
            return Err(SimulationError::UnknownLocation {
                agent,
                location: location.to_owned(),
            });
        }
        if let Some(current) = self.location_of(agent).cloned() {
            self.vacate(agent, current.as_str());
        }
        let _ = self
            .occupancy
            .entry(LocationName::from(location))
            .or_default()
            .insert(agent);
        Ok(())
    }

    /// Run one movement phase and one collision phase.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::World`] if a neighbor draw fails, which
    /// only happens if another thread removes a location's last neighbor
    /// between the check and the draw.
    pub fn step(&mut self) -> Result<StepReport, SimulationError> {
        self.step = self.step.saturating_add(1);

        let moves = self.plan_moves()?;
        let move_count = moves.len();
        self.apply_moves(moves);

        let destroyed = self.resolve_collisions();

        let report = StepReport {
            step: self.step,
            moves: move_count,
            destroyed,
            agents_alive: self.agents_alive(),
        };
        debug!(
            step = report.step,
            moves = report.moves,
            destroyed = report.destroyed.len(),
            agents_alive = report.agents_alive,
            "step complete"
        );
        Ok(report)
    }

    /// Execute exactly `max_steps` steps, without early exit.
    ///
    /// # Errors
    ///
    /// Propagates the first [`step`](Self::step) failure.
    pub fn run(&mut self, max_steps: u64) -> Result<SimulationResult, SimulationError> {
        runner::run_simulation(self, RunBounds::fixed(max_steps), &mut NoOpCallback)
    }

    fn plan_moves(&mut self) -> Result<Vec<PlannedMove>, SimulationError> {
        let mut moves = Vec::new();
        for (location, agents) in &self.occupancy {
            if !self.graph.has_neighbors(location.as_str()) {
                continue;
            }
            for &agent in agents {
                let to = self.graph.random_neighbor(location.as_str(), &mut self.rng)?;
                moves.push(PlannedMove {
                    agent,
                    from: location.clone(),
                    to,
                });
            }
        }
        Ok(moves)
    }

    fn apply_moves(&mut self, moves: Vec<PlannedMove>) {
        for PlannedMove { agent, from, to } in moves {
            self.vacate(agent, from.as_str());
            let _ = self.occupancy.entry(to).or_default().insert(agent);
        }
    }

    /// Take `agent` off `location`, dropping the entry if it empties.
    fn vacate(&mut self, agent: AgentId, location: &str) {
        if let Some(agents) = self.occupancy.get_mut(location) {
            let _ = agents.remove(&agent);
            if agents.is_empty() {
                let _ = self.occupancy.remove(location);
            }
        }
    }

    fn resolve_collisions(&mut self) -> Vec<DestructionEvent> {
        let colliding: Vec<LocationName> = self
            .occupancy
            .iter()
            .filter(|(_, agents)| agents.len() >= 2)
            .map(|(location, _)| location.clone())
            .collect();

        let mut events = Vec::with_capacity(colliding.len());
        for location in colliding {
            let Some(agents) = self.occupancy.remove(location.as_str()) else {
                continue;
            };
            let _ = self.graph.remove_location(location.as_str());
            debug!(
                step = self.step,
                location = %location,
                agents = agents.len(),
                "location destroyed"
            );
            events.push(DestructionEvent {
                step: self.step,
                location,
                agents: agents.into_iter().collect(),
            });
        }
        events
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Location -> agents currently there. Never contains empty sets.
    pub const fn occupancy(&self) -> &BTreeMap<LocationName, BTreeSet<AgentId>> {
        &self.occupancy
    }

    /// Agents on a location, if any.
    pub fn occupants(&self, location: &str) -> Option<&BTreeSet<AgentId>> {
        self.occupancy.get(location)
    }

    /// Where an agent currently is, or `None` if it was destroyed (or never
    /// placed).
    pub fn location_of(&self, agent: AgentId) -> Option<&LocationName> {
        self.occupancy
            .iter()
            .find(|(_, agents)| agents.contains(&agent))
            .map(|(location, _)| location)
    }

    /// Number of agents still alive.
    pub fn agents_alive(&self) -> usize {
        self.occupancy.values().map(BTreeSet::len).sum()
    }

    /// Number of steps executed since [`initialize`](Self::initialize).
    pub const fn current_step(&self) -> u64 {
        self.step
    }

    /// The graph the agents walk on.
    pub const fn graph(&self) -> &Arc<LocationGraph> {
        &self.graph
    }

    /// Whether no further step can change anything: no occupied location
    /// has a neighbor to move to, and none holds a pending collision.
    ///
    /// In that state a step draws no random numbers and destroys nothing.
    pub fn is_settled(&self) -> bool {
        self.occupancy
            .iter()
            .all(|(location, agents)| agents.len() < 2 && !self.graph.has_neighbors(location.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use invasion_types::Direction;

    use super::*;

    fn line_graph(names: &[&str]) -> Arc<LocationGraph> {
        let graph = LocationGraph::new();
        for name in names {
            graph.add_location(*name);
        }
        for pair in names.windows(2) {
            if let [a, b] = pair {
                let _ = graph.add_edge(a, b, Direction::East);
            }
        }
        Arc::new(graph)
    }

    #[test]
    fn initialize_places_every_agent() {
        let mut sim = InvasionSimulation::seeded(line_graph(&["A", "B", "C"]), 1);
        sim.initialize(10).unwrap();
        assert_eq!(sim.agents_alive(), 10);
        for raw in 1..=10 {
            assert!(sim.location_of(AgentId::new(raw)).is_some());
        }
        assert!(sim.location_of(AgentId::new(11)).is_none());
        assert_eq!(sim.current_step(), 0);
    }

    #[test]
    fn initialize_zero_agents_on_empty_graph_is_fine() {
        let mut sim = InvasionSimulation::seeded(Arc::new(LocationGraph::new()), 1);
        assert!(sim.initialize(0).is_ok());
        assert_eq!(sim.agents_alive(), 0);
    }

    #[test]
    fn initialize_on_empty_graph_fails() {
        let mut sim = InvasionSimulation::seeded(Arc::new(LocationGraph::new()), 1);
        let result = sim.initialize(1);
        assert!(matches!(
            result,
            Err(SimulationError::World {
                source: WorldError::EmptySelection { .. }
            })
        ));
    }

    #[test]
    fn lone_agent_moves_along_the_only_edge() {
        let mut sim = InvasionSimulation::seeded(line_graph(&["A", "B"]), 3);
        sim.place_agent(AgentId::new(1), "A").unwrap();
        let report = sim.step().unwrap();
        assert_eq!(report.moves, 1);
        assert!(report.destroyed.is_empty());
        assert_eq!(sim.location_of(AgentId::new(1)).unwrap(), "B");
        let _ = sim.step().unwrap();
        assert_eq!(sim.location_of(AgentId::new(1)).unwrap(), "A");
    }

    #[test]
    fn swapping_agents_do_not_collide() {
        let mut sim = InvasionSimulation::seeded(line_graph(&["A", "B"]), 3);
        sim.place_agent(AgentId::new(1), "A").unwrap();
        sim.place_agent(AgentId::new(2), "B").unwrap();
        let report = sim.step().unwrap();
        assert_eq!(report.moves, 2);
        assert!(report.destroyed.is_empty());
        assert_eq!(sim.location_of(AgentId::new(1)).unwrap(), "B");
        assert_eq!(sim.location_of(AgentId::new(2)).unwrap(), "A");
    }

    #[test]
    fn stranded_agent_stays_and_survives() {
        let mut sim = InvasionSimulation::seeded(line_graph(&["Island", "A", "B"]), 3);
        let _ = sim.graph().remove_location("A");
        sim.place_agent(AgentId::new(1), "Island").unwrap();
        for _ in 0..5 {
            let report = sim.step().unwrap();
            assert_eq!(report.moves, 0);
            assert!(report.destroyed.is_empty());
        }
        assert_eq!(sim.location_of(AgentId::new(1)).unwrap(), "Island");
        assert!(sim.is_settled());
    }

    #[test]
    fn co_located_stranded_agents_still_collide() {
        let graph = Arc::new(LocationGraph::new());
        graph.add_location("Island");
        let mut sim = InvasionSimulation::seeded(graph, 3);
        sim.place_agent(AgentId::new(1), "Island").unwrap();
        sim.place_agent(AgentId::new(2), "Island").unwrap();
        assert!(!sim.is_settled());

        let report = sim.step().unwrap();
        assert_eq!(report.moves, 0);
        assert_eq!(report.destroyed.len(), 1);
        assert_eq!(
            report.destroyed.first().unwrap().to_string(),
            "Island has been destroyed by alien 1 and alien 2!"
        );
        assert!(sim.graph().is_empty());
        assert_eq!(sim.agents_alive(), 0);
    }

    #[test]
    fn place_agent_rejects_unknown_location() {
        let mut sim = InvasionSimulation::seeded(line_graph(&["A"]), 3);
        let result = sim.place_agent(AgentId::new(1), "Nowhere");
        assert!(matches!(result, Err(SimulationError::UnknownLocation { .. })));
    }

    #[test]
    fn place_agent_moves_an_already_placed_agent() {
        let mut sim = InvasionSimulation::seeded(line_graph(&["A", "B"]), 3);
        sim.place_agent(AgentId::new(1), "A").unwrap();
        sim.place_agent(AgentId::new(1), "B").unwrap();
        assert_eq!(sim.agents_alive(), 1);
        assert!(sim.occupants("A").is_none());
    }

    #[test]
    fn run_executes_exact_step_count() {
        let mut sim = InvasionSimulation::seeded(line_graph(&["A", "B", "C"]), 9);
        sim.place_agent(AgentId::new(1), "B").unwrap();
        let result = sim.run(25).unwrap();
        assert_eq!(result.total_steps, 25);
        assert_eq!(sim.current_step(), 25);
    }
}
