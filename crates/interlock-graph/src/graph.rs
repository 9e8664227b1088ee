//! Core graph data structure.
//!
//! The RelationshipsGraph wraps an undirected petgraph graph and adds id
//! indexes so entities and relationships can be looked up by the ids the
//! data store uses. It is only ever produced by [`GraphBuilder`] and
//! exposes no way to change it afterwards.
//!
//! [`GraphBuilder`]: crate::GraphBuilder

use crate::builder::GraphBuilder;
use crate::error::GraphError;
use interlock_core::{EdgeRecord, EntityId, Relationship, RelationshipId};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// An immutable snapshot of the relationships known at build time.
///
/// Nodes carry the entity id, edges carry the full relationship. Stored
/// direction (`entity1 -> entity2`) is kept on the edge weight but the
/// graph itself is undirected, so either endpoint can be walked from.
#[derive(Debug, Clone, Default)]
pub struct RelationshipsGraph {
    pub(crate) graph: UnGraph<EntityId, Relationship>,

    /// Maps entity ids to graph node indexes.
    pub(crate) node_index: HashMap<EntityId, NodeIndex>,

    /// Maps relationship ids to graph edge indexes.
    pub(crate) edge_index: HashMap<RelationshipId, EdgeIndex>,
}

impl RelationshipsGraph {
    /// Builds a graph from a flat list of edge records.
    ///
    /// Fails on the first malformed or duplicate record; no partial graph
    /// is returned.
    pub fn build<I>(records: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let mut builder = GraphBuilder::new();
        for record in records {
            builder.add_record(&record)?;
        }
        Ok(builder.build())
    }

    /// Returns true if the entity takes part in at least one relationship.
    pub fn contains_entity(&self, entity: EntityId) -> bool {
        self.node_index.contains_key(&entity)
    }

    /// Gets a relationship by its id.
    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        let index = self.edge_index.get(&id)?;
        self.graph.edge_weight(*index)
    }

    /// The set of entities directly connected to `entity`.
    ///
    /// Empty for entities that are not in the graph.
    pub fn neighbors(&self, entity: EntityId) -> BTreeSet<EntityId> {
        match self.node_index.get(&entity) {
            Some(&index) => self
                .graph
                .neighbors(index)
                .map(|neighbor| self.graph[neighbor])
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// The ids of every relationship `entity` takes part in.
    pub fn incident_edges(&self, entity: EntityId) -> BTreeSet<RelationshipId> {
        match self.node_index.get(&entity) {
            Some(&index) => self
                .graph
                .edges(index)
                .map(|edge_ref| edge_ref.weight().id)
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Iterates over all entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.graph.node_weights().copied()
    }

    /// Iterates over all relationships in insertion order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.graph.edge_weights()
    }

    /// Returns the number of entities.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of relationships.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// Resolves roots to node indexes, dropping entities that are not in
    /// the graph. Duplicated roots are kept once.
    pub(crate) fn root_indexes<I>(&self, roots: I) -> Vec<NodeIndex>
    where
        I: IntoIterator<Item = EntityId>,
    {
        let mut indexes = Vec::new();
        let mut missing = 0usize;

        for entity in roots {
            match self.node_index.get(&entity) {
                Some(&index) => indexes.push(index),
                None => missing += 1,
            }
        }
        indexes.sort_unstable();
        indexes.dedup();

        if missing > 0 {
            debug!("Skipping {} roots not in graph", missing);
        }

        indexes
    }
}

/// Graph statistics for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}

impl RelationshipsGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interlock_core::Category;

    fn record(id: u64, a: u64, b: u64) -> EdgeRecord {
        EdgeRecord::new(id, a, b, Category::Position)
    }

    #[test]
    fn test_empty_graph() {
        let graph = RelationshipsGraph::build(Vec::new()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(EntityId(1)).is_empty());
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let graph = RelationshipsGraph::build(vec![record(1, 10, 20), record(2, 20, 30)]).unwrap();

        assert_eq!(graph.neighbors(EntityId(10)), BTreeSet::from([EntityId(20)]));
        assert_eq!(
            graph.neighbors(EntityId(20)),
            BTreeSet::from([EntityId(10), EntityId(30)])
        );
        assert_eq!(
            graph.incident_edges(EntityId(20)),
            BTreeSet::from([RelationshipId(1), RelationshipId(2)])
        );
        assert_eq!(
            graph.incident_edges(EntityId(30)),
            BTreeSet::from([RelationshipId(2)])
        );
    }

    #[test]
    fn test_parallel_relationships() {
        // Two relationships between the same pair
        let graph = RelationshipsGraph::build(vec![record(1, 1, 2), record(2, 2, 1)]).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(EntityId(1)), BTreeSet::from([EntityId(2)]));
        assert_eq!(graph.incident_edges(EntityId(1)).len(), 2);
    }

    #[test]
    fn test_relationship_lookup() {
        let graph = RelationshipsGraph::build(vec![record(7, 1, 2)]).unwrap();

        let rel = graph.relationship(RelationshipId(7)).unwrap();
        assert_eq!(rel.endpoints(), [EntityId(1), EntityId(2)]);
        assert!(graph.relationship(RelationshipId(8)).is_none());
        assert!(graph.contains_entity(EntityId(2)));
        assert!(!graph.contains_entity(EntityId(3)));
    }

    #[test]
    fn test_root_indexes_filters_unknown() {
        let graph = RelationshipsGraph::build(vec![record(1, 1, 2)]).unwrap();

        let roots = graph.root_indexes([EntityId(1), EntityId(99), EntityId(1)]);
        assert_eq!(roots.len(), 1);
        assert_eq!(graph.graph[roots[0]], EntityId(1));
    }

    #[test]
    fn test_stats() {
        let graph = RelationshipsGraph::build(vec![record(1, 1, 2), record(2, 1, 3)]).unwrap();
        assert_eq!(
            graph.stats(),
            GraphStats {
                node_count: 3,
                edge_count: 2
            }
        );
    }
}
