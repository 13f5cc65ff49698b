//! Identifier types for agents and locations.
//!
//! Agents carry an opaque integer that is unique only within a single run.
//! Locations are identified by their name: every adjacency and occupancy map
//! in the workspace is keyed by [`LocationName`], never by a composite value
//! that could change after insertion.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Identifier of an agent, unique within one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl AgentId {
    /// Wrap a raw agent number.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Return the raw agent number.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AgentId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Name of a location in the graph.
///
/// Immutable once created. Implements [`Borrow<str>`] so maps keyed by
/// `LocationName` can be queried with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationName(String);

impl LocationName {
    /// Create a location name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for LocationName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for LocationName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&Self> for LocationName {
    fn from(name: &Self) -> Self {
        name.clone()
    }
}

impl AsRef<str> for LocationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LocationName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocationName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
