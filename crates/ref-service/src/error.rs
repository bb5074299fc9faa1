//! Mutation error types for ref-service.

use std::fmt;

use ref_core::{RecordId, ValidationError};
use ref_store::StoreError;

/// How a caller addressed the record an update or delete targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    Id(RecordId),
    Position(usize),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "with id {id}"),
            Self::Position(position) => write!(f, "at position {position}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    /// Input was rejected; nothing was changed or saved.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The addressed record is not in the store.
    #[error("no record {target}")]
    NotFound { target: RecordRef },

    /// The change was applied in memory but could not be persisted.
    #[error("change kept locally but not saved: {0}")]
    Store(#[from] StoreError),
}

impl MutationError {
    /// Whether the in-memory store was changed before the error happened.
    #[must_use]
    pub const fn applied_locally(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
