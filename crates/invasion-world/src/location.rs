//! Location nodes and their four directional adjacency slots.
//!
//! A [`Location`] is just an immutable name. Its edges live in a separate
//! [`Neighbors`] record held by the graph, with exactly one optional slot per
//! [`Direction`]. Four slots is the whole degree bound of the model: removal
//! relies on it to clear back-references without scanning the graph.

use invasion_types::{Direction, LocationName};

/// A named node in the location graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    name: LocationName,
}

impl Location {
    /// Create a location with the given name.
    pub const fn new(name: LocationName) -> Self {
        Self { name }
    }

    /// The location's name (its identity).
    pub const fn name(&self) -> &LocationName {
        &self.name
    }
}

/// The four directional neighbor slots of one location.
///
/// An empty slot is the common case; an all-empty record is a valid,
/// isolated location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    north: Option<LocationName>,
    south: Option<LocationName>,
    east: Option<LocationName>,
    west: Option<LocationName>,
}

impl Neighbors {
    /// Create a record with all four slots empty.
    pub const fn new() -> Self {
        Self {
            north: None,
            south: None,
            east: None,
            west: None,
        }
    }

    /// The neighbor in the given direction, if any.
    pub const fn get(&self, direction: Direction) -> Option<&LocationName> {
        match direction {
            Direction::North => self.north.as_ref(),
            Direction::South => self.south.as_ref(),
            Direction::East => self.east.as_ref(),
            Direction::West => self.west.as_ref(),
        }
    }

    const fn slot_mut(&mut self, direction: Direction) -> &mut Option<LocationName> {
        match direction {
            Direction::North => &mut self.north,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
            Direction::West => &mut self.west,
        }
    }

    /// Point the slot at `name`, returning the neighbor it replaced.
    pub fn set(&mut self, direction: Direction, name: LocationName) -> Option<LocationName> {
        self.slot_mut(direction).replace(name)
    }

    /// Empty the slot, returning the neighbor it held.
    pub fn clear(&mut self, direction: Direction) -> Option<LocationName> {
        self.slot_mut(direction).take()
    }

    /// Iterate the non-empty slots in north, south, east, west order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &LocationName)> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.get(dir).map(|name| (dir, name)))
    }

    /// Number of non-empty slots (0 to 4).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether every slot is empty.
    pub const fn is_empty(&self) -> bool {
        self.north.is_none() && self.south.is_none() && self.east.is_none() && self.west.is_none()
    }
}
