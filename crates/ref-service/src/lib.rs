//! # ref-service
//!
//! Validated mutations over a [`RecordStore`].
//!
//! Every operation follows the same protocol:
//! 1. Validate the submitted fields (nothing happens on failure)
//! 2. Resolve the target record by id or position
//! 3. Apply the change in memory
//! 4. Rewrite the remote file
//!
//! If step 4 fails the change stays in memory, the store reports itself out
//! of sync, and the caller gets [`MutationError::Store`].

mod error;

pub use error::{MutationError, RecordRef};

use ref_core::validation::validate;
use ref_core::{Record, RecordFields, RecordId};
use ref_search::SearchQuery;
use ref_store::{RecordStore, RemoteFileBackend, StoreError};

/// A record removed by [`MutationService::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    /// Position the record held before removal.
    pub position: usize,
    pub record: Record,
}

#[derive(Debug)]
pub struct MutationService<B> {
    store: RecordStore<B>,
}

impl<B: RemoteFileBackend> MutationService<B> {
    pub const fn new(store: RecordStore<B>) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    /// Run a search against the current records, with positions.
    #[must_use]
    pub fn search(&self, query: &SearchQuery) -> Vec<(usize, &Record)> {
        query.run(self.store.records())
    }

    /// Discard the in-memory records and load the remote file again.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] from the load; current records are kept.
    pub async fn reload(&mut self) -> Result<usize, StoreError> {
        self.store.load().await
    }

    /// Append a new record and persist.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Validation`] before touching the store, or
    /// [`MutationError::Store`] if the save fails.
    pub async fn create(&mut self, fields: RecordFields) -> Result<Record, MutationError> {
        validate(&fields)?;
        let record = self.store.push(fields).clone();
        tracing::info!(id = %record.id, position = self.store.len() - 1, "record created");
        self.store.save().await?;
        Ok(record)
    }

    /// Replace every field of `id` and persist. Id and position are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Validation`], [`MutationError::NotFound`], or
    /// [`MutationError::Store`].
    pub async fn update(&mut self, id: &RecordId, fields: RecordFields) -> Result<Record, MutationError> {
        validate(&fields)?;
        let record = self
            .store
            .replace(id, fields)
            .cloned()
            .ok_or_else(|| MutationError::NotFound {
                target: RecordRef::Id(id.clone()),
            })?;
        tracing::info!(id = %record.id, "record updated");
        self.store.save().await?;
        Ok(record)
    }

    /// [`update`](Self::update) addressed by position in the current sequence.
    ///
    /// # Errors
    ///
    /// As for [`update`](Self::update).
    pub async fn update_at(&mut self, position: usize, fields: RecordFields) -> Result<Record, MutationError> {
        validate(&fields)?;
        let id = self.id_at(position)?;
        self.update(&id, fields).await
    }

    /// Remove `id`, shifting later records down by one, and persist.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::NotFound`] or [`MutationError::Store`].
    pub async fn delete(&mut self, id: &RecordId) -> Result<Deleted, MutationError> {
        let (position, record) = self.store.remove(id).ok_or_else(|| MutationError::NotFound {
            target: RecordRef::Id(id.clone()),
        })?;
        tracing::info!(id = %record.id, position, remaining = self.store.len(), "record deleted");
        self.store.save().await?;
        Ok(Deleted { position, record })
    }

    /// [`delete`](Self::delete) addressed by position in the current sequence.
    ///
    /// # Errors
    ///
    /// As for [`delete`](Self::delete).
    pub async fn delete_at(&mut self, position: usize) -> Result<Deleted, MutationError> {
        let id = self.id_at(position)?;
        self.delete(&id).await
    }

    fn id_at(&self, position: usize) -> Result<RecordId, MutationError> {
        self.store
            .id_at(position)
            .cloned()
            .ok_or(MutationError::NotFound {
                target: RecordRef::Position(position),
            })
    }
}
