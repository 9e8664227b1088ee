//! Interlock Graph - Relationship network queries
//!
//! This crate builds an in-memory graph from a flat list of relationship
//! records and answers the two questions the profile pages ask of it:
//! who is connected to an entity within N hops, and who are its
//! second-degree interlocks ranked by strength.
//!
//! # Architecture
//!
//! The graph uses petgraph internally with id indexes for:
//! - Entity lookups (entity id -> node)
//! - Relationship lookups (relationship id -> edge)
//!
//! A graph is built once per query session and never changes afterwards,
//! so it can be shared across threads and queried concurrently.
//!
//! # Example
//!
//! ```
//! use interlock_core::{Category, EdgeRecord, EntityId};
//! use interlock_graph::RelationshipsGraph;
//!
//! let graph = RelationshipsGraph::build(vec![
//!     EdgeRecord::new(1u64, 1u64, 2u64, Category::Position),
//!     EdgeRecord::new(2u64, 2u64, 3u64, Category::Position),
//! ])?;
//!
//! let levels = graph.connected_nodes([EntityId(1)], 2)?;
//! assert_eq!(levels.len(), 2);
//!
//! let interlocks = graph.sorted_interlocks([EntityId(1)]);
//! assert_eq!(interlocks[0].entity, EntityId(3));
//! # Ok::<(), interlock_graph::GraphError>(())
//! ```

mod builder;
mod error;
mod graph;
mod interlocks;
mod source;
mod traversal;

pub use builder::GraphBuilder;
pub use error::GraphError;
pub use graph::{GraphStats, RelationshipsGraph};
pub use interlocks::Interlock;
pub use source::{EdgeList, EdgeSource, SourceError};
pub use traversal::{EdgeLevel, EdgeLevels, NodeLevel, NodeLevels};
