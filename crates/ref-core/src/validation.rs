//! Field-completeness and keyword-count rules applied before any mutation.

use crate::enums::Field;
use crate::errors::ValidationError;
use crate::record::RecordFields;

/// Fewest words accepted in the keywords field.
pub const MIN_KEYWORDS: usize = 3;
/// Most words accepted in the keywords field.
pub const MAX_KEYWORDS: usize = 5;

/// Number of whitespace-separated tokens in a keywords string.
#[must_use]
pub fn keyword_count(keywords: &str) -> usize {
    keywords.split_whitespace().count()
}

/// Validate a full set of record fields.
///
/// Fields are checked in persisted column order and the first empty one is
/// reported. Whitespace-only values count as empty. The keyword count is only
/// checked once every field is present.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] or
/// [`ValidationError::InvalidKeywordCount`].
pub fn validate(fields: &RecordFields) -> Result<(), ValidationError> {
    if let Some(field) = Field::ALL
        .into_iter()
        .find(|field| fields.get(*field).trim().is_empty())
    {
        return Err(ValidationError::MissingField { field });
    }

    let count = keyword_count(&fields.keywords);
    if !(MIN_KEYWORDS..=MAX_KEYWORDS).contains(&count) {
        return Err(ValidationError::InvalidKeywordCount { count });
    }

    Ok(())
}
