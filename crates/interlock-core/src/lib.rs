//! Interlock Core - Relationship data model
//!
//! This crate defines the types every other layer speaks: entity and
//! relationship identifiers, the twelve relationship categories, and the
//! edge records handed over by the data store.
//!
//! Records arrive as [`EdgeRecord`], where every field is optional because
//! the store may hand over incomplete rows. [`EdgeRecord::validate`] turns
//! one into a [`Relationship`], which is what the graph is built from.
//!
//! # Example
//!
//! ```
//! use interlock_core::{Category, EdgeRecord};
//!
//! let record = EdgeRecord::new(10, 1, 2, Category::Position);
//! let relationship = record.validate().unwrap();
//!
//! assert_eq!(relationship.category.label(), "Position");
//! ```

mod category;
mod ids;
mod record;

pub use category::Category;
pub use ids::{EntityId, RelationshipId};
pub use record::{EdgeRecord, RecordError, Relationship};
