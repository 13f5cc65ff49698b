//! Records produced by the simulation.

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, LocationName};

/// A location destroyed by a collision at the end of a step.
///
/// `Display` renders the report line, e.g.
/// `Foo has been destroyed by alien 3 and alien 7!`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestructionEvent {
    /// The step (1-based) whose collision phase destroyed the location.
    pub step: u64,
    /// The destroyed location.
    pub location: LocationName,
    /// Every agent that was at the location, in ascending order.
    pub agents: Vec<AgentId>,
}

impl core::fmt::Display for DestructionEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} has been destroyed", self.location)?;
        if let Some((last, rest)) = self.agents.split_last() {
            f.write_str(" by")?;
            for (i, agent) in rest.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, " alien {agent}")?;
            }
            if !rest.is_empty() {
                f.write_str(" and")?;
            }
            write!(f, " alien {last}")?;
        }
        f.write_str("!")
    }
}
