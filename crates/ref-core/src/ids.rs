//! Session-scoped record identifiers.
//!
//! A `RecordId` is handed out when a record enters the in-memory store, either
//! on load or on create. It never goes to `refs.csv`, so it only identifies a
//! record for the lifetime of one loaded store, but unlike a position it is
//! not invalidated by deletes or reordering.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for record identifiers.
pub const PREFIX_RECORD: &str = "ref";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Build the id for sequence number `seq`: `ref-` plus 8 hex digits.
    #[must_use]
    pub fn from_seq(seq: u64) -> Self {
        Self(format!("{PREFIX_RECORD}-{seq:08x}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Monotonic id source owned by one store instance.
#[derive(Debug)]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSequence {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> RecordId {
        let id = RecordId::from_seq(self.next);
        self.next += 1;
        id
    }
}
