//! Record fields and searchable columns.
//!
//! Both enums use `snake_case` serialization. Each variant also knows the
//! upper-case header it is stored under in `refs.csv`, and parsing accepts
//! either spelling (hyphens are treated as underscores).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// One of the nine fields of a reference record, in persisted column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Campaign,
    Category,
    Place,
    MainSubject,
    Path,
    Description,
    Language,
    Keywords,
}

impl Field {
    /// All fields in the fixed `refs.csv` column order.
    pub const ALL: [Self; 9] = [
        Self::Title,
        Self::Campaign,
        Self::Category,
        Self::Place,
        Self::MainSubject,
        Self::Path,
        Self::Description,
        Self::Language,
        Self::Keywords,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Campaign => "campaign",
            Self::Category => "category",
            Self::Place => "place",
            Self::MainSubject => "main_subject",
            Self::Path => "path",
            Self::Description => "description",
            Self::Language => "language",
            Self::Keywords => "keywords",
        }
    }

    /// Column header used in `refs.csv`.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Title => "TITULO",
            Self::Campaign => "CAMPANHA",
            Self::Category => "CATEGORIA",
            Self::Place => "LOCAL",
            Self::MainSubject => "ASSUNTO_PRINCIPAL",
            Self::Path => "CAMINHO",
            Self::Description => "DESCRICAO",
            Self::Language => "IDIOMA",
            Self::Keywords => "PALAVRAS_CHAVES",
        }
    }

    /// The searchable column backed by this field, if any.
    #[must_use]
    pub const fn searchable(self) -> Option<SearchColumn> {
        match self {
            Self::MainSubject => Some(SearchColumn::MainSubject),
            Self::Campaign => Some(SearchColumn::Campaign),
            Self::Keywords => Some(SearchColumn::Keywords),
            Self::Description => Some(SearchColumn::Description),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| {
                field.as_str().eq_ignore_ascii_case(&normalized)
                    || field.header().eq_ignore_ascii_case(&normalized)
            })
            .ok_or_else(|| ValidationError::UnknownField {
                name: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// SearchColumn
// ---------------------------------------------------------------------------

/// The four fields a search may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchColumn {
    MainSubject,
    Campaign,
    Keywords,
    Description,
}

impl SearchColumn {
    pub const ALL: [Self; 4] = [
        Self::MainSubject,
        Self::Campaign,
        Self::Keywords,
        Self::Description,
    ];

    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::MainSubject => Field::MainSubject,
            Self::Campaign => Field::Campaign,
            Self::Keywords => Field::Keywords,
            Self::Description => Field::Description,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.field().as_str()
    }

    /// Human label shown in the interactive shell.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MainSubject => "main subject",
            Self::Campaign => "campaign",
            Self::Keywords => "keywords",
            Self::Description => "summary text",
        }
    }
}

impl fmt::Display for SearchColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = s.parse::<Field>()?;
        field
            .searchable()
            .ok_or_else(|| ValidationError::NotSearchable { field })
    }
}
