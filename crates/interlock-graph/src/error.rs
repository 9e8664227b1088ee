use crate::source::SourceError;
use interlock_core::{RecordError, RelationshipId};
use thiserror::Error;

/// Errors raised while building or querying a relationships graph.
///
/// Unknown entities and empty results are never errors; only caller bugs
/// and bad upstream data end up here.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A record could not be validated. `index` is its position in the
    /// input sequence, `id` its relationship id when one was present.
    #[error("malformed edge record at position {index}: {source}")]
    MalformedEdge {
        index: usize,
        id: Option<RelationshipId>,
        source: RecordError,
    },

    #[error("duplicate relationship id {id} at position {index}")]
    DuplicateEdge { id: RelationshipId, index: usize },

    #[error("max_depth must be at least 1, got {0}")]
    InvalidDepth(usize),

    #[error("edge source error: {0}")]
    Source(#[from] SourceError),
}

/// Rejects a zero search depth.
pub(crate) fn check_depth(max_depth: usize) -> Result<(), GraphError> {
    if max_depth == 0 {
        return Err(GraphError::InvalidDepth(max_depth));
    }
    Ok(())
}
