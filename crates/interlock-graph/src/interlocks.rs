//! Second-degree interlock ranking.
//!
//! An interlock is an entity two hops away from the roots: it shares a
//! board, a donor, an employer... with someone the roots are connected to.
//! Its strength is the number of second-hop relationships that reach it.

use crate::graph::RelationshipsGraph;
use crate::traversal::{EdgeLevels, NodeLevels};
use interlock_core::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// An entity reached at the second hop, with the number of paths to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interlock {
    pub entity: EntityId,
    pub count: usize,
}

impl RelationshipsGraph {
    /// Ranks the second-degree connections of `roots` by interlock count.
    ///
    /// Only relationships found at the second hop of an edge search are
    /// counted. For each one, the endpoint that is not a first-degree
    /// connection is credited; when `entity1` is a first-degree connection
    /// that is `entity2`, otherwise `entity1`.
    ///
    /// Sorted by count descending, then by entity id. Returns an empty list
    /// if none of the roots are in the graph.
    pub fn sorted_interlocks<I>(&self, roots: I) -> Vec<Interlock>
    where
        I: IntoIterator<Item = EntityId>,
    {
        let roots = self.root_indexes(roots);
        if roots.is_empty() {
            return Vec::new();
        }

        let degree1: HashSet<EntityId> = NodeLevels::from_indexes(self, roots.clone())
            .next()
            .unwrap_or_default()
            .into_iter()
            .collect();

        let degree2_edges = EdgeLevels::from_indexes(self, roots)
            .nth(1)
            .unwrap_or_default();

        let mut counts: HashMap<EntityId, usize> = HashMap::new();
        for id in &degree2_edges {
            let Some(rel) = self.relationship(*id) else {
                continue;
            };
            let far = if degree1.contains(&rel.entity1) {
                rel.entity2
            } else {
                rel.entity1
            };
            *counts.entry(far).or_default() += 1;
        }

        let mut interlocks: Vec<Interlock> = counts
            .into_iter()
            .map(|(entity, count)| Interlock { entity, count })
            .collect();

        // Stable ordering: count desc → entity id
        interlocks.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.entity.cmp(&b.entity))
        });

        debug!(
            "sorted_interlocks: {} first-degree, {} second-hop relationships, {} interlocks",
            degree1.len(),
            degree2_edges.len(),
            interlocks.len()
        );

        interlocks
    }
}
