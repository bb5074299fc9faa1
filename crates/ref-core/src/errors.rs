//! Validation errors shared by every Refdesk crate.
//!
//! Storage, search, and mutation errors live in their own crates and wrap
//! `ValidationError` where they need it. A unified error only exists in
//! `ref-cli`, where everything converges into `anyhow`.

use thiserror::Error;

use crate::enums::Field;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty or whitespace-only.
    #[error("field '{field}' is required")]
    MissingField { field: Field },

    /// The keywords field does not hold 3 to 5 words.
    #[error("keywords must contain 3 to 5 words (got {count})")]
    InvalidKeywordCount { count: usize },

    /// A field name could not be resolved.
    #[error("unknown field '{name}'")]
    UnknownField { name: String },

    /// The field exists but searches cannot target it.
    #[error("field '{field}' is not searchable (use main_subject, campaign, keywords or description)")]
    NotSearchable { field: Field },
}
