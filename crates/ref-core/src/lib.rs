//! # ref-core
//!
//! Core types, validation rules, and error types for Refdesk.
//!
//! This crate provides the foundational types shared across all Refdesk crates:
//! - The `Record` / `RecordFields` pair for one reference entry
//! - Field and searchable-column enums with their `refs.csv` header names
//! - Session-scoped record identifiers
//! - Field-completeness and keyword-count validation
//! - CLI response types

pub mod enums;
pub mod errors;
pub mod ids;
pub mod record;
pub mod responses;
pub mod validation;

pub use enums::{Field, SearchColumn};
pub use errors::ValidationError;
pub use ids::RecordId;
pub use record::{Record, RecordFields};
