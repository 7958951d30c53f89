//! Cycle detection over the union requirement graph.
//!
//! Each parameter points at every name any of its options requires. This
//! over-approximates the dependencies actually used by a plan: a configuration
//! is rejected if the union graph has a cycle, even when no combination of
//! chosen options would close it.

use crate::store::StrategyTable;
use indexmap::IndexSet;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("circular dependency detected near '{node}' (checking '{origin}': {})", .path.join(" -> "))]
pub struct CircularDependencyError {
    /// The top-level parameter whose check found the cycle.
    pub origin: String,
    /// The node recursion re-entered while it was still on the path.
    pub node: String,
    /// The cycle itself, starting and ending at `node`.
    pub path: Vec<String>,
}

/// A cycle found by [`detect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub node: String,
    pub path: Vec<String>,
}

/// Parameter -> required-name edges, unioned over all options.
/// Names without a table entry (raw inputs) are leaves.
#[derive(Debug, Clone, Default)]
pub struct RequirementGraph<'a> {
    graph: DiGraphMap<&'a str, ()>,
}

impl<'a> RequirementGraph<'a> {
    pub fn from_table<S>(table: &'a StrategyTable<S>) -> Self {
        let mut graph = DiGraphMap::new();
        for (_, name, options) in table.iter() {
            graph.add_node(name);
            for option in options {
                for dep in option.requires.iter() {
                    graph.add_edge(name, dep, ());
                }
            }
        }
        Self { graph }
    }

    pub fn requirements_of(&self, node: &'a str) -> impl Iterator<Item = &'a str> + '_ {
        self.graph.neighbors_directed(node, Direction::Outgoing)
    }

    pub fn edge_count(&self) -> usize { self.graph.edge_count() }
}

/// Depth-first search for a cycle reachable from `node`.
///
/// `on_path` holds the current recursion path only. A node is pushed on entry
/// and popped again once all of its requirements came back clean, so nodes
/// reached twice through different branches are not mistaken for cycles.
pub fn detect<'a>(
    node: &'a str,
    on_path: &mut IndexSet<&'a str>,
    graph: &RequirementGraph<'a>,
) -> Option<Cycle> {
    if let Some(start) = on_path.get_index_of(node) {
        let mut path: Vec<String> = on_path.iter().skip(start).map(|n| n.to_string()).collect();
        path.push(node.to_string());
        return Some(Cycle { node: node.to_string(), path });
    }

    on_path.insert(node);
    for dep in graph.requirements_of(node) {
        if let Some(cycle) = detect(dep, on_path, graph) {
            return Some(cycle);
        }
    }
    on_path.pop();
    None
}

/// Runs [`detect`] from every parameter in table order, each with a fresh path.
/// Fails on the first cycle found.
pub fn check_acyclic<S>(table: &StrategyTable<S>) -> Result<(), CircularDependencyError> {
    let graph = RequirementGraph::from_table(table);

    for (_, name, _) in table.iter() {
        let mut on_path = IndexSet::new();
        if let Some(cycle) = detect(name, &mut on_path, &graph) {
            warn!(origin = name, node = %cycle.node, "circular dependency in requirement graph");
            return Err(CircularDependencyError {
                origin: name.to_string(),
                node: cycle.node,
                path: cycle.path,
            });
        }
    }

    debug!(edges = graph.edge_count(), "requirement graph is acyclic");
    Ok(())
}
