//! Enumeration types for the Invasion simulation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four compass directions an edge can run along.
///
/// North/south and east/west are paired opposites. Map files and rendered
/// output use the lowercase words `north`, `south`, `east` and `west`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward the top of the map.
    North,
    /// Toward the bottom of the map.
    South,
    /// Toward the right of the map.
    East,
    /// Toward the left of the map.
    West,
}

impl Direction {
    /// All directions in rendering order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// The direction pointing back the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// The lowercase word used in map files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token that is not one of `north`, `south`, `east` or `west`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction {token:?} (expected north, south, east or west)")]
pub struct ParseDirectionError {
    /// The rejected token.
    pub token: String,
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Self::North),
            "south" => Ok(Self::South),
            "east" => Ok(Self::East),
            "west" => Ok(Self::West),
            other => Err(ParseDirectionError {
                token: other.to_owned(),
            }),
        }
    }
}
