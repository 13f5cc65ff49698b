//! Shared type definitions for the Invasion simulation.
//!
//! This crate is the single source of truth for the value types used across
//! the workspace: the graph engine, the simulation and the binary all speak
//! in these types.
//!
//! # Modules
//!
//! - [`ids`] -- Agent identifiers and location names
//! - [`enums`] -- Compass [`Direction`] and its parse error
//! - [`structs`] -- Records emitted by the simulation ([`DestructionEvent`])

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Direction, ParseDirectionError};
pub use ids::{AgentId, LocationName};
pub use structs::DestructionEvent;
