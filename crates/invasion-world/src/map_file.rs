//! Map file loading.
//!
//! A map file lists one location per line followed by its links:
//!
//! ```text
//! Foo north=Bar west=Baz south=Qu-ux
//! Bar south=Foo west=Bee
//! ```
//!
//! Any name seen for the first time, as the line's primary location or as a
//! link target, is created before edges reference it. Blank lines are
//! ignored. Every other deviation from the format (a token without `=`, an
//! empty name, a direction other than `north`, `south`, `east` or `west`)
//! rejects the whole file with [`WorldError::MalformedLine`].

use std::path::Path;

use invasion_types::Direction;
use tracing::debug;

use crate::error::WorldError;
use crate::location_graph::LocationGraph;

/// One parsed, non-blank line.
#[derive(Debug, PartialEq, Eq)]
struct MapLine<'a> {
    name: &'a str,
    links: Vec<(Direction, &'a str)>,
}

fn malformed(line: usize, reason: impl Into<String>) -> WorldError {
    WorldError::MalformedLine {
        line,
        reason: reason.into(),
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<MapLine<'_>>, WorldError> {
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    if name.contains('=') {
        return Err(malformed(
            line_no,
            format!("line starts with link {name:?} instead of a location name"),
        ));
    }

    let mut links = Vec::new();
    for token in tokens {
        let Some((dir, target)) = token.split_once('=') else {
            return Err(malformed(
                line_no,
                format!("link {token:?} is missing its \"=<name>\" half"),
            ));
        };
        let direction: Direction = dir
            .parse()
            .map_err(|e| malformed(line_no, format!("{e}")))?;
        if target.is_empty() || target.contains('=') {
            return Err(malformed(
                line_no,
                format!("link {token:?} has an invalid location name"),
            ));
        }
        links.push((direction, target));
    }

    Ok(Some(MapLine { name, links }))
}

/// Build a graph from map file text.
///
/// # Errors
///
/// Returns [`WorldError::MalformedLine`] for the first line that does not
/// follow the format. No partial graph is returned.
pub fn parse_map(text: &str) -> Result<LocationGraph, WorldError> {
    let graph = LocationGraph::new();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index.saturating_add(1);
        let Some(line) = parse_line(line_no, raw)? else {
            continue;
        };
        let _ = graph.ensure_location(line.name);
        for (direction, target) in line.links {
            let _ = graph.ensure_location(target);
            let _ = graph.add_edge(line.name, target, direction);
        }
    }
    debug_assert!(graph.is_consistent());
    debug!(locations = graph.location_count(), "map parsed");
    Ok(graph)
}

/// Read and parse a map file.
///
/// # Errors
///
/// Returns [`WorldError::Io`] if the file cannot be read, or
/// [`WorldError::MalformedLine`] if its content is malformed.
pub fn load_map(path: &Path) -> Result<LocationGraph, WorldError> {
    let text = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_map(&text)
}
