//! Text renderings of a [`LocationGraph`].
//!
//! [`map_lines`] lists every location with all four slots, marking empty ones
//! with [`EMPTY_SLOT`]. [`to_map_file`] writes only the present links, in the
//! same format [`parse_map`] reads.
//!
//! Both take one consistent snapshot of the graph and list locations in name
//! order, directions in north, south, east, west order.
//!
//! [`parse_map`]: crate::map_file::parse_map

use std::fmt::Write as _;

use invasion_types::Direction;

use crate::location_graph::LocationGraph;

/// Marker printed for an empty direction slot.
pub const EMPTY_SLOT: &str = "-";

/// One line per location: `Name north=X south=- east=Y west=-`.
pub fn map_lines(graph: &LocationGraph) -> Vec<String> {
    graph
        .entries()
        .into_iter()
        .map(|(name, slots)| {
            let mut line = name.to_string();
            for direction in Direction::ALL {
                let target = slots.get(direction).map_or(EMPTY_SLOT, |n| n.as_str());
                let _ = write!(line, " {direction}={target}");
            }
            line
        })
        .collect()
}

/// The graph in map file format, one line per location, newline-terminated.
pub fn to_map_file(graph: &LocationGraph) -> String {
    let mut out = String::new();
    for (name, slots) in graph.entries() {
        out.push_str(name.as_str());
        for (direction, target) in slots.iter() {
            let _ = write!(out, " {direction}={target}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LocationGraph {
        let graph = LocationGraph::new();
        graph.add_location("Foo");
        graph.add_location("Bar");
        graph.add_location("Baz");
        let _ = graph.add_edge("Foo", "Bar", Direction::North);
        let _ = graph.add_edge("Foo", "Baz", Direction::West);
        graph
    }

    #[test]
    fn map_lines_list_all_slots_sorted() {
        assert_eq!(
            map_lines(&sample()),
            vec![
                "Bar north=- south=Foo east=- west=-",
                "Baz north=- south=- east=Foo west=-",
                "Foo north=Bar south=- east=- west=Baz",
            ]
        );
    }

    #[test]
    fn map_file_lists_present_links_only() {
        assert_eq!(
            to_map_file(&sample()),
            "Bar south=Foo\nBaz east=Foo\nFoo north=Bar west=Baz\n"
        );
    }

    #[test]
    fn empty_graph_renders_nothing() {
        let graph = LocationGraph::new();
        assert!(map_lines(&graph).is_empty());
        assert_eq!(to_map_file(&graph), "");
    }
}
