//! Edge sources: where relationship records come from.
//!
//! The graph never talks to the data store itself. An [`EdgeSource`] hands
//! over the records around a set of entities and the graph is built from
//! those. [`EdgeList`] is an in-memory source, loadable from a JSON array of
//! records.

use crate::error::GraphError;
use crate::graph::RelationshipsGraph;
use interlock_core::{EdgeRecord, EntityId};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supplies relationship records for a set of entities.
pub trait EdgeSource {
    /// Returns the relationship network of `roots`: every record with an
    /// endpoint in `roots` or in the roots' direct connections.
    fn relationship_network_for(&self, roots: &[EntityId]) -> Result<Vec<EdgeRecord>, SourceError>;
}

/// An in-memory list of edge records.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    records: Vec<EdgeRecord>,
}

impl EdgeList {
    pub fn new(records: Vec<EdgeRecord>) -> Self {
        Self { records }
    }

    /// Parses a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let records: Vec<EdgeRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Loads a JSON array of records from a file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let json = fs::read_to_string(path.as_ref())?;
        let list = Self::from_json_str(&json)?;
        debug!(
            "Loaded {} edge records from {}",
            list.len(),
            path.as_ref().display()
        );
        Ok(list)
    }

    pub fn records(&self) -> &[EdgeRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EdgeRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EdgeSource for EdgeList {
    fn relationship_network_for(&self, roots: &[EntityId]) -> Result<Vec<EdgeRecord>, SourceError> {
        let roots: HashSet<EntityId> = roots.iter().copied().collect();
        let touches = |set: &HashSet<EntityId>, record: &EdgeRecord| {
            [record.entity1_id, record.entity2_id]
                .iter()
                .flatten()
                .any(|entity| set.contains(entity))
        };

        let mut network = roots.clone();
        for record in self.records.iter().filter(|r| touches(&roots, *r)) {
            network.extend(record.entity1_id);
            network.extend(record.entity2_id);
        }

        Ok(self
            .records
            .iter()
            .filter(|record| touches(&network, *record))
            .cloned()
            .collect())
    }
}

impl RelationshipsGraph {
    /// Builds a graph from the relationship network of `roots`.
    pub fn from_source<S, I>(source: &S, roots: I) -> Result<Self, GraphError>
    where
        S: EdgeSource + ?Sized,
        I: IntoIterator<Item = EntityId>,
    {
        let roots: Vec<EntityId> = roots.into_iter().collect();
        let records = source.relationship_network_for(&roots)?;
        Self::build(records)
    }
}
