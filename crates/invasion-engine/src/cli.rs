//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Unleash agents on a map and report which locations they destroy.
#[derive(Debug, Parser)]
#[command(name = "invasion")]
#[command(version, about = "Random-walk invasion simulation")]
pub struct Cli {
    /// Number of agents to place on the map
    pub agents: u32,

    /// Path to the map file
    pub map: PathBuf,
}
