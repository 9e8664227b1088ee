//! Level-by-level breadth-first search.
//!
//! Both searches are iterators that yield one set per hop and stop at the
//! first empty hop. Visited tracking spans the whole iterator, so an id is
//! yielded at most once no matter how many cycles the graph has.
//!
//! [`NodeLevels`] yields the entities first reached at each hop.
//! [`EdgeLevels`] yields relationship ids instead: hop 1 is every
//! relationship touching a root, hop `k` is every not yet seen relationship
//! touching an endpoint of hop `k - 1`.

use crate::error::{check_depth, GraphError};
use crate::graph::RelationshipsGraph;
use interlock_core::{EntityId, RelationshipId};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeSet, HashSet};
use std::iter::FusedIterator;
use tracing::debug;

/// Entities grouped by hop distance from a root set.
pub type NodeLevel = BTreeSet<EntityId>;

/// Relationship ids grouped by hop distance from a root set.
pub type EdgeLevel = BTreeSet<RelationshipId>;

/// Iterator over the entity levels of a breadth-first search.
#[derive(Debug, Clone)]
pub struct NodeLevels<'g> {
    graph: &'g RelationshipsGraph,
    visited: HashSet<NodeIndex>,
    frontier: Vec<NodeIndex>,
}

impl<'g> NodeLevels<'g> {
    /// Starts a search from `roots`. Roots that are not in the graph are
    /// ignored; the roots themselves are never yielded.
    pub fn new<I>(graph: &'g RelationshipsGraph, roots: I) -> Self
    where
        I: IntoIterator<Item = EntityId>,
    {
        Self::from_indexes(graph, graph.root_indexes(roots))
    }

    pub(crate) fn from_indexes(graph: &'g RelationshipsGraph, roots: Vec<NodeIndex>) -> Self {
        Self {
            graph,
            visited: roots.iter().copied().collect(),
            frontier: roots,
        }
    }
}

impl Iterator for NodeLevels<'_> {
    type Item = NodeLevel;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frontier.is_empty() {
            return None;
        }

        let mut found = NodeLevel::new();
        let mut next_frontier = Vec::new();

        for current in self.frontier.drain(..) {
            for neighbor in self.graph.graph.neighbors(current) {
                if self.visited.insert(neighbor) {
                    found.insert(self.graph.graph[neighbor]);
                    next_frontier.push(neighbor);
                }
            }
        }

        self.frontier = next_frontier;

        if found.is_empty() {
            None
        } else {
            Some(found)
        }
    }
}

impl FusedIterator for NodeLevels<'_> {}

/// Iterator over the relationship levels of a breadth-first search.
#[derive(Debug, Clone)]
pub struct EdgeLevels<'g> {
    graph: &'g RelationshipsGraph,
    visited: HashSet<EdgeIndex>,
    /// Entities whose relationships make up the next level.
    frontier: Vec<NodeIndex>,
}

impl<'g> EdgeLevels<'g> {
    /// Starts a search from `roots`. The first level is every relationship
    /// touching a known root.
    pub fn new<I>(graph: &'g RelationshipsGraph, roots: I) -> Self
    where
        I: IntoIterator<Item = EntityId>,
    {
        Self::from_indexes(graph, graph.root_indexes(roots))
    }

    pub(crate) fn from_indexes(graph: &'g RelationshipsGraph, roots: Vec<NodeIndex>) -> Self {
        Self {
            graph,
            visited: HashSet::new(),
            frontier: roots,
        }
    }

    /// Continues a search from levels produced earlier.
    ///
    /// Every relationship in `levels` counts as visited and the endpoints
    /// of the last level form the frontier, so the first item yielded is
    /// the level that would have followed `levels`. Ids that are not in
    /// this graph are ignored.
    pub fn resume(graph: &'g RelationshipsGraph, levels: &[EdgeLevel]) -> Self {
        let visited: HashSet<EdgeIndex> = levels
            .iter()
            .flatten()
            .filter_map(|id| graph.edge_index.get(id).copied())
            .collect();

        let frontier = match levels.last() {
            Some(last) => endpoints(
                graph,
                last.iter()
                    .filter_map(|id| graph.edge_index.get(id).copied()),
            ),
            None => Vec::new(),
        };

        Self {
            graph,
            visited,
            frontier,
        }
    }
}

/// The distinct endpoints of a set of edges.
fn endpoints<I>(graph: &RelationshipsGraph, edges: I) -> Vec<NodeIndex>
where
    I: IntoIterator<Item = EdgeIndex>,
{
    let mut nodes: Vec<NodeIndex> = edges
        .into_iter()
        .filter_map(|edge| graph.graph.edge_endpoints(edge))
        .flat_map(|(a, b)| [a, b])
        .collect();
    nodes.sort_unstable();
    nodes.dedup();
    nodes
}

impl Iterator for EdgeLevels<'_> {
    type Item = EdgeLevel;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frontier.is_empty() {
            return None;
        }

        let mut found = EdgeLevel::new();
        let mut found_edges = Vec::new();

        for current in self.frontier.drain(..) {
            for edge_ref in self.graph.graph.edges(current) {
                if self.visited.insert(edge_ref.id()) {
                    found.insert(edge_ref.weight().id);
                    found_edges.push(edge_ref.id());
                }
            }
        }

        self.frontier = endpoints(self.graph, found_edges);

        if found.is_empty() {
            None
        } else {
            Some(found)
        }
    }
}

impl FusedIterator for EdgeLevels<'_> {}

impl RelationshipsGraph {
    /// Searches through the graph by levels.
    ///
    /// Returns the entities first reached at each hop from `roots`, one set
    /// per hop. The result has `max_depth` levels unless a hop finds
    /// nothing new, in which case it stops there.
    ///
    /// # Errors
    /// `InvalidDepth` if `max_depth` is zero.
    pub fn connected_nodes<I>(&self, roots: I, max_depth: usize) -> Result<Vec<NodeLevel>, GraphError>
    where
        I: IntoIterator<Item = EntityId>,
    {
        check_depth(max_depth)?;

        let levels: Vec<NodeLevel> = NodeLevels::new(self, roots).take(max_depth).collect();
        debug!(
            "connected_nodes: depth {}, {} levels, {} entities",
            max_depth,
            levels.len(),
            levels.iter().map(BTreeSet::len).sum::<usize>()
        );

        Ok(levels)
    }

    /// Searches through the graph by levels, returning relationship ids.
    ///
    /// Like [`connected_nodes`](Self::connected_nodes), but each level holds
    /// the relationships first reached at that hop.
    ///
    /// # Errors
    /// `InvalidDepth` if `max_depth` is zero.
    pub fn connected_edge_ids<I>(
        &self,
        roots: I,
        max_depth: usize,
    ) -> Result<Vec<EdgeLevel>, GraphError>
    where
        I: IntoIterator<Item = EntityId>,
    {
        check_depth(max_depth)?;

        let levels: Vec<EdgeLevel> = EdgeLevels::new(self, roots).take(max_depth).collect();
        debug!(
            "connected_edge_ids: depth {}, {} levels, {} relationships",
            max_depth,
            levels.len(),
            levels.iter().map(BTreeSet::len).sum::<usize>()
        );

        Ok(levels)
    }

    /// Extends an earlier edge search by up to `max_depth` more levels.
    ///
    /// Only the new levels are returned.
    ///
    /// # Errors
    /// `InvalidDepth` if `max_depth` is zero.
    pub fn resume_edge_ids(
        &self,
        levels: &[EdgeLevel],
        max_depth: usize,
    ) -> Result<Vec<EdgeLevel>, GraphError> {
        check_depth(max_depth)?;
        Ok(EdgeLevels::resume(self, levels).take(max_depth).collect())
    }
}
