//! Search error types for ref-search.

use ref_core::ValidationError;

/// Errors raised while building a search query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The term is empty or whitespace-only.
    #[error("search term must not be empty")]
    EmptyTerm,

    /// The requested column does not exist or is not searchable.
    #[error(transparent)]
    UnknownColumn(#[from] ValidationError),
}
