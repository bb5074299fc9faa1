use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Field;
use crate::ids::RecordId;

/// The nine user-supplied values of a reference entry.
///
/// Validation is not enforced by construction; see [`crate::validation`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecordFields {
    pub title: String,
    pub campaign: String,
    pub category: String,
    pub place: String,
    pub main_subject: String,
    /// Link to the referenced publication.
    pub path: String,
    pub description: String,
    pub language: String,
    /// 3 to 5 whitespace-separated words.
    pub keywords: String,
}

impl RecordFields {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Campaign => &self.campaign,
            Field::Category => &self.category,
            Field::Place => &self.place,
            Field::MainSubject => &self.main_subject,
            Field::Path => &self.path,
            Field::Description => &self.description,
            Field::Language => &self.language,
            Field::Keywords => &self.keywords,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Campaign => &mut self.campaign,
            Field::Category => &mut self.category,
            Field::Place => &mut self.place,
            Field::MainSubject => &mut self.main_subject,
            Field::Path => &mut self.path,
            Field::Description => &mut self.description,
            Field::Language => &mut self.language,
            Field::Keywords => &mut self.keywords,
        };
        *slot = value.into();
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Values in persisted column order.
    #[must_use]
    pub fn values(&self) -> [&str; 9] {
        Field::ALL.map(|field| self.get(field))
    }
}

/// A reference entry as held by the in-memory store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: RecordFields,
}

impl Record {
    #[must_use]
    pub const fn new(id: RecordId, fields: RecordFields) -> Self {
        Self { id, fields }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        self.fields.get(field)
    }
}
