//! Location graph, map loading, and rendering for the Invasion simulation.
//!
//! This crate models the physical world: named locations joined along the
//! four compass directions, with symmetric edges and bounded degree.
//!
//! # Modules
//!
//! - [`error`] -- Error types for graph operations and map loading.
//! - [`location`] -- [`Location`] nodes and their four-slot [`Neighbors`]
//!   record.
//! - [`location_graph`] -- The lock-guarded [`LocationGraph`]: mutation,
//!   neighbor queries, and seeded random selection.
//! - [`map_file`] -- Building a graph from `Name dir=Neighbor ...` lines.
//! - [`render`] -- Listing the graph, and writing it back in map file format.

pub mod error;
pub mod location;
pub mod location_graph;
pub mod map_file;
pub mod render;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use location::{Location, Neighbors};
pub use location_graph::LocationGraph;
pub use map_file::{load_map, parse_map};
pub use render::{map_lines, to_map_file};
