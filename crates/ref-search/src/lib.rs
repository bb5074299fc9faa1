//! # ref-search
//!
//! Substring search over loaded records.
//!
//! A query targets exactly one [`SearchColumn`] and matches every record whose
//! value in that column contains the term. Case-insensitive matching compares
//! the Unicode lowercase forms of both sides. Results keep store order; there
//! is no ranking, tokenizing, or pattern syntax.

mod error;

pub use error::SearchError;

use ref_core::{Record, SearchColumn};

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    column: SearchColumn,
    term: String,
    case_sensitive: bool,
}

impl SearchQuery {
    /// Build a query, rejecting blank terms.
    ///
    /// The term is matched as given; surrounding whitespace is significant.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyTerm`] if `term` is empty or whitespace-only.
    pub fn new(
        column: SearchColumn,
        term: impl Into<String>,
        case_sensitive: bool,
    ) -> Result<Self, SearchError> {
        let term = term.into();
        if term.trim().is_empty() {
            return Err(SearchError::EmptyTerm);
        }
        Ok(Self {
            column,
            term,
            case_sensitive,
        })
    }

    /// Build a query from a user-supplied column name (`main_subject`,
    /// `ASSUNTO_PRINCIPAL`, `main-subject`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownColumn`] for a name that is not one of the
    /// four searchable columns, and [`SearchError::EmptyTerm`] as for [`new`](Self::new).
    pub fn parse(column: &str, term: impl Into<String>, case_sensitive: bool) -> Result<Self, SearchError> {
        let column: SearchColumn = column.parse()?;
        Self::new(column, term, case_sensitive)
    }

    #[must_use]
    pub const fn column(&self) -> SearchColumn {
        self.column
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub const fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Matching records paired with their position in `records`.
    #[must_use]
    pub fn run<'a>(&self, records: &'a [Record]) -> Vec<(usize, &'a Record)> {
        let matcher = Matcher::new(&self.term, self.case_sensitive);
        let field = self.column.field();
        let hits: Vec<_> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| matcher.matches(record.get(field)))
            .collect();
        tracing::debug!(
            column = %self.column,
            case_sensitive = self.case_sensitive,
            scanned = records.len(),
            hits = hits.len(),
            "search complete"
        );
        hits
    }
}

/// Records whose `column` value contains `term`, in store order.
///
/// Never fails; an empty term matches every record, so callers that take
/// input from users should go through [`SearchQuery::new`].
#[must_use]
pub fn search<'a>(
    records: &'a [Record],
    column: SearchColumn,
    term: &str,
    case_sensitive: bool,
) -> Vec<&'a Record> {
    let matcher = Matcher::new(term, case_sensitive);
    let field = column.field();
    records
        .iter()
        .filter(|record| matcher.matches(record.get(field)))
        .collect()
}

/// Lowercase one character at a time. Unlike `str::to_lowercase` there is no
/// final-sigma rule, so a term folds the same alone as inside a longer value.
fn fold(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).collect()
}

/// Folds the term once and each candidate on demand.
struct Matcher {
    needle: String,
    case_sensitive: bool,
}

impl Matcher {
    fn new(term: &str, case_sensitive: bool) -> Self {
        let needle = if case_sensitive {
            term.to_string()
        } else {
            fold(term)
        };
        Self {
            needle,
            case_sensitive,
        }
    }

    fn matches(&self, value: &str) -> bool {
        if self.case_sensitive {
            value.contains(self.needle.as_str())
        } else {
            fold(value).contains(self.needle.as_str())
        }
    }
}
