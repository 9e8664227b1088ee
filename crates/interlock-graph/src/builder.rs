//! Graph builder for constructing the relationships graph from edge records.
//!
//! The builder validates records as they are added and defers all graph
//! allocation to [`GraphBuilder::build`], so a failed record never leaves a
//! half-built graph behind.

use crate::error::GraphError;
use crate::graph::RelationshipsGraph;
use interlock_core::{EdgeRecord, Relationship, RelationshipId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Builds a RelationshipsGraph from edge records.
///
/// The builder handles the two-pass process:
/// 1. Allocate a node for every entity any relationship mentions
/// 2. Connect the nodes with one edge per relationship
#[derive(Debug)]
pub struct GraphBuilder {
    relationships: Vec<Relationship>,
    /// Position of each accepted relationship id in the input, for
    /// duplicate detection.
    seen: HashMap<RelationshipId, usize>,
    /// Number of records offered so far, accepted or not.
    offered: usize,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            relationships: Vec::new(),
            seen: HashMap::new(),
            offered: 0,
        }
    }

    /// Validates a raw record and queues it for the graph.
    pub fn add_record(&mut self, record: &EdgeRecord) -> Result<&mut Self, GraphError> {
        let index = self.offered;
        self.offered += 1;

        let relationship = record
            .validate()
            .map_err(|source| GraphError::MalformedEdge {
                index,
                id: record.id,
                source,
            })?;

        self.push(relationship, index)?;
        Ok(self)
    }

    /// Queues an already validated relationship.
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<&mut Self, GraphError> {
        let index = self.offered;
        self.offered += 1;

        self.push(relationship, index)?;
        Ok(self)
    }

    fn push(&mut self, relationship: Relationship, index: usize) -> Result<(), GraphError> {
        match self.seen.entry(relationship.id) {
            Entry::Occupied(_) => Err(GraphError::DuplicateEdge {
                id: relationship.id,
                index,
            }),
            Entry::Vacant(slot) => {
                slot.insert(index);
                self.relationships.push(relationship);
                Ok(())
            }
        }
    }

    /// Returns the number of relationships queued so far.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Finishes building and returns the graph.
    pub fn build(self) -> RelationshipsGraph {
        let mut result = RelationshipsGraph::default();
        result.graph.reserve_edges(self.relationships.len());

        // First pass: one node per entity
        for relationship in &self.relationships {
            for entity in relationship.endpoints() {
                result
                    .node_index
                    .entry(entity)
                    .or_insert_with(|| result.graph.add_node(entity));
            }
        }

        // Second pass: connect them
        for relationship in self.relationships {
            let a = result.node_index[&relationship.entity1];
            let b = result.node_index[&relationship.entity2];
            let edge = result.graph.add_edge(a, b, relationship);
            result.edge_index.insert(relationship.id, edge);
        }

        debug!(
            "Built relationships graph: {} entities, {} relationships",
            result.node_count(),
            result.edge_count()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interlock_core::{Category, EntityId, RecordError};

    #[test]
    fn test_builder_creates_nodes_implicitly() {
        let mut builder = GraphBuilder::new();
        builder
            .add_record(&EdgeRecord::new(1u64, 1u64, 2u64, Category::Position))
            .unwrap()
            .add_record(&EdgeRecord::new(2u64, 2u64, 3u64, Category::Donation))
            .unwrap();

        assert_eq!(builder.len(), 2);
        let graph = builder.build();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_builder_rejects_malformed_record() {
        let mut builder = GraphBuilder::new();
        builder
            .add_record(&EdgeRecord::new(1u64, 1u64, 2u64, Category::Position))
            .unwrap();

        let broken = EdgeRecord {
            id: Some(RelationshipId(2)),
            entity1_id: Some(EntityId(2)),
            entity2_id: None,
            category_id: Some(1),
        };

        match builder.add_record(&broken) {
            Err(GraphError::MalformedEdge { index, id, source }) => {
                assert_eq!(index, 1);
                assert_eq!(id, Some(RelationshipId(2)));
                assert_eq!(source, RecordError::MissingField("entity2_id"));
            }
            other => panic!("expected MalformedEdge, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_rejects_duplicate_ids() {
        let mut builder = GraphBuilder::new();
        builder
            .add_record(&EdgeRecord::new(5u64, 1u64, 2u64, Category::Family))
            .unwrap();

        let err = builder
            .add_record(&EdgeRecord::new(5u64, 3u64, 4u64, Category::Family))
            .unwrap_err();

        assert!(matches!(
            err,
            GraphError::DuplicateEdge { id: RelationshipId(5), index: 1 }
        ));
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn test_build_fails_without_partial_graph() {
        let records = vec![
            EdgeRecord::new(1u64, 1u64, 2u64, Category::Position),
            EdgeRecord::default(),
        ];

        let err = RelationshipsGraph::build(records).unwrap_err();
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn test_self_relationship() {
        let mut builder = GraphBuilder::new();
        builder
            .add_record(&EdgeRecord::new(1u64, 4u64, 4u64, Category::Generic))
            .unwrap();
        let graph = builder.build();

        assert_eq!(graph.node_count(), 1);
        assert!(graph.neighbors(EntityId(4)).contains(&EntityId(4)));
        assert!(graph.incident_edges(EntityId(4)).contains(&RelationshipId(1)));
    }

    #[test]
    fn test_empty_builder() {
        let builder = GraphBuilder::default();
        assert!(builder.is_empty());
        assert!(builder.build().is_empty());
    }
}
