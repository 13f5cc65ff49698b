//! Location graph: named nodes joined along the four compass directions.
//!
//! The [`LocationGraph`] owns every [`Location`] and its [`Neighbors`]
//! record. Two invariants hold whenever the lock is released:
//!
//! - **Symmetry**: if `A`'s `north` slot holds `B`, then `B`'s `south` slot
//!   holds `A`, and likewise for every opposite pair.
//! - **Referential integrity**: no slot names a location that is not in the
//!   graph.
//!
//! All state sits behind one [`RwLock`]. Mutations hold the write lock for
//! their whole duration and reads take the read lock, so another thread
//! inspecting the graph sees either the state before a mutation or after it.
//!
//! Both maps are keyed by [`LocationName`] and ordered, which keeps iteration
//! (and therefore seeded random selection) deterministic.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use invasion_types::{Direction, LocationName};
use rand::Rng;
use rand::seq::IteratorRandom;
use tracing::{debug, warn};

use crate::error::WorldError;
use crate::location::{Location, Neighbors};

/// The graph contents guarded by the lock.
#[derive(Debug, Default)]
struct GraphState {
    /// All locations indexed by name.
    locations: BTreeMap<LocationName, Location>,
    /// Exactly one adjacency record per location.
    adjacency: BTreeMap<LocationName, Neighbors>,
}

impl GraphState {
    fn insert(&mut self, name: LocationName) {
        self.locations
            .insert(name.clone(), Location::new(name.clone()));
        self.adjacency.insert(name, Neighbors::new());
    }

    /// Empty every slot of `name` and clear the matching back-references.
    ///
    /// Only the location's own (at most four) neighbors are visited.
    fn detach(&mut self, name: &str) {
        let Some(slots) = self.adjacency.get_mut(name) else {
            return;
        };
        let former = std::mem::take(slots);
        for (direction, neighbor) in former.iter() {
            self.clear_back_reference(neighbor.as_str(), direction.opposite(), name);
        }
    }

    /// Clear `holder`'s slot in `direction` if it points at `target`.
    fn clear_back_reference(&mut self, holder: &str, direction: Direction, target: &str) {
        if let Some(slots) = self.adjacency.get_mut(holder)
            && slots.get(direction).is_some_and(|n| n == target)
        {
            let _ = slots.clear(direction);
        }
    }

    /// Point `from`'s `direction` slot at `to` and `to`'s opposite slot back.
    ///
    /// Partners displaced from either slot lose their back-reference, so
    /// overwriting an edge never leaves a one-sided link behind.
    fn link(&mut self, from: &LocationName, to: &LocationName, direction: Direction) {
        let back = direction.opposite();

        let displaced = self
            .adjacency
            .get_mut(from.as_str())
            .and_then(|slots| slots.set(direction, to.clone()));
        if let Some(old) = displaced
            && old != *to
        {
            self.clear_back_reference(old.as_str(), back, from.as_str());
        }

        let displaced = self
            .adjacency
            .get_mut(to.as_str())
            .and_then(|slots| slots.set(back, from.clone()));
        if let Some(old) = displaced
            && old != *from
        {
            self.clear_back_reference(old.as_str(), direction, to.as_str());
        }
    }

    fn name_of(&self, name: &str) -> Option<LocationName> {
        self.locations.get(name).map(|loc| loc.name().clone())
    }
}

/// The set of named locations and their directional adjacency.
///
/// Every method takes `&self`; interior locking makes the graph shareable
/// across threads behind an `Arc`.
#[derive(Debug, Default)]
pub struct LocationGraph {
    state: RwLock<GraphState>,
}

impl LocationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // Mutations never panic while holding the lock, so a poisoned lock
    // still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, GraphState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, GraphState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    /// Add a location with all four slots empty.
    ///
    /// An existing location of the same name is overwritten: it is detached
    /// from all its neighbors first, then replaced by a fresh, isolated one.
    pub fn add_location(&self, name: impl Into<LocationName>) {
        let name = name.into();
        let mut state = self.write();
        if state.locations.contains_key(name.as_str()) {
            debug!(location = %name, "overwriting existing location");
            state.detach(name.as_str());
        }
        state.insert(name);
    }

    /// Add the location only if no location of that name exists.
    ///
    /// Returns `true` if it was created.
    pub fn ensure_location(&self, name: impl Into<LocationName>) -> bool {
        let name = name.into();
        let mut state = self.write();
        if state.locations.contains_key(name.as_str()) {
            return false;
        }
        state.insert(name);
        true
    }

    /// Join `from` to `to` along `direction` (and `to` back to `from` along
    /// the opposite direction).
    ///
    /// Existing edges in either slot are overwritten. If either location is
    /// unknown nothing changes and `false` is returned.
    pub fn add_edge(&self, from: &str, to: &str, direction: Direction) -> bool {
        let mut state = self.write();
        let (Some(from_name), Some(to_name)) = (state.name_of(from), state.name_of(to)) else {
            warn!(from, to, %direction, "edge references unknown location, ignored");
            return false;
        };
        state.link(&from_name, &to_name, direction);
        true
    }

    /// Remove a location and every slot that pointed at it.
    ///
    /// Only the removed location's own neighbors are visited to clear
    /// back-references. Returns `false` if the name was unknown.
    pub fn remove_location(&self, name: &str) -> bool {
        let mut state = self.write();
        if !state.locations.contains_key(name) {
            return false;
        }
        state.detach(name);
        let _ = state.locations.remove(name);
        let _ = state.adjacency.remove(name);
        debug!(location = name, remaining = state.locations.len(), "location removed");
        true
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Whether a location of that name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.read().locations.contains_key(name)
    }

    /// Number of locations in the graph.
    pub fn location_count(&self) -> usize {
        self.read().locations.len()
    }

    /// Whether the graph has no locations.
    pub fn is_empty(&self) -> bool {
        self.read().locations.is_empty()
    }

    /// All location names in ascending order.
    pub fn location_names(&self) -> Vec<LocationName> {
        self.read().locations.keys().cloned().collect()
    }

    /// The non-empty neighbor slots of a location.
    ///
    /// Empty for unknown names and isolated locations.
    pub fn neighbors(&self, name: &str) -> BTreeMap<Direction, LocationName> {
        self.read()
            .adjacency
            .get(name)
            .map(|slots| {
                slots
                    .iter()
                    .map(|(dir, neighbor)| (dir, neighbor.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All four slots of a location, or `None` if it does not exist.
    pub fn neighbor_slots(&self, name: &str) -> Option<Neighbors> {
        self.read().adjacency.get(name).cloned()
    }

    /// Whether at least one of the location's slots is non-empty.
    pub fn has_neighbors(&self, name: &str) -> bool {
        self.read()
            .adjacency
            .get(name)
            .is_some_and(|slots| !slots.is_empty())
    }

    /// Every location with its slots, in name order, read under one lock.
    pub fn entries(&self) -> Vec<(LocationName, Neighbors)> {
        self.read()
            .adjacency
            .iter()
            .map(|(name, slots)| (name.clone(), slots.clone()))
            .collect()
    }

    // -------------------------------------------------------------------
    // Random selection
    // -------------------------------------------------------------------

    /// Pick one of the location's non-empty slots uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptySelection`] if the location has no
    /// neighbors or does not exist. Check [`has_neighbors`] first.
    ///
    /// [`has_neighbors`]: Self::has_neighbors
    pub fn random_neighbor<R>(&self, name: &str, rng: &mut R) -> Result<LocationName, WorldError>
    where
        R: Rng + ?Sized,
    {
        let state = self.read();
        state
            .adjacency
            .get(name)
            .and_then(|slots| slots.iter().map(|(_, neighbor)| neighbor).choose(rng))
            .cloned()
            .ok_or_else(|| WorldError::EmptySelection {
                context: format!("neighbors of {name}"),
            })
    }

    /// Pick one location uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptySelection`] on an empty graph.
    pub fn pick_random_location<R>(&self, rng: &mut R) -> Result<LocationName, WorldError>
    where
        R: Rng + ?Sized,
    {
        let state = self.read();
        state
            .locations
            .keys()
            .choose(rng)
            .cloned()
            .ok_or_else(|| WorldError::EmptySelection {
                context: String::from("locations of an empty graph"),
            })
    }

    // -------------------------------------------------------------------
    // Invariant checks
    // -------------------------------------------------------------------

    /// Check symmetry and referential integrity across the whole graph.
    pub fn is_consistent(&self) -> bool {
        let state = self.read();
        if !state.locations.keys().eq(state.adjacency.keys()) {
            return false;
        }
        state.adjacency.iter().all(|(name, slots)| {
            slots.iter().all(|(direction, neighbor)| {
                state
                    .adjacency
                    .get(neighbor.as_str())
                    .and_then(|back| back.get(direction.opposite()))
                    .is_some_and(|back| back == name)
            })
        })
    }
}
