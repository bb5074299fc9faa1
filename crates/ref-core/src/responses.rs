//! CLI response types returned as JSON by `refs` commands.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SearchColumn;
use crate::record::Record;

/// A record together with its position in the currently loaded store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PositionedRecord {
    pub position: usize,
    #[serde(flatten)]
    pub record: Record,
}

/// Response from `refs search`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchResultsResponse {
    pub column: SearchColumn,
    pub term: String,
    pub case_sensitive: bool,
    pub results: Vec<PositionedRecord>,
    pub total_results: usize,
}

/// Response from `refs list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecordListResponse {
    pub records: Vec<PositionedRecord>,
    pub total_records: usize,
}

/// Response from `refs create` and `refs update`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecordMutationResponse {
    pub record: PositionedRecord,
}

/// Response from `refs delete`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecordDeleteResponse {
    pub deleted: Record,
    pub position: usize,
    pub remaining: usize,
}

/// Response from `refs status`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StoreStatusResponse {
    pub location: String,
    pub file_present: bool,
    pub records: usize,
    pub in_sync: bool,
    pub last_synced_at: Option<DateTime<Utc>>,
}
