//! The in-memory record table mirroring `refs.csv`.
//!
//! `RecordStore` is loaded wholesale and written back wholesale. Each record
//! gets a [`RecordId`] when it enters the store; ids live only as long as the
//! store does and are never written to the file.
//!
//! Mutation primitives (`push`, `replace`, `remove`) only touch memory and mark
//! the store as out of sync. Persisting is a separate [`RecordStore::save`]
//! call, so the caller decides when validation has passed.

use chrono::{DateTime, Utc};
use ref_config::StorageConfig;
use ref_core::ids::IdSequence;
use ref_core::responses::StoreStatusResponse;
use ref_core::{Record, RecordFields, RecordId};

use crate::backend::{FileHandle, RemoteFileBackend, join_key};
use crate::codec;
use crate::error::StoreError;

/// Where the reference file lives inside a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    pub folder: String,
    /// Subfolder of `folder`, looked up by name before every load and save.
    pub subfolder: Option<String>,
    pub file_name: String,
}

impl FileLocation {
    pub fn new(folder: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            subfolder: None,
            file_name: file_name.into(),
        }
    }

    #[must_use]
    pub fn with_subfolder(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.subfolder = (!name.trim().is_empty()).then_some(name);
        self
    }

    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.folder.clone(), config.file_name.clone())
            .with_subfolder(config.subfolder.clone())
    }

    fn key(&self) -> String {
        join_key(&[
            &self.folder,
            self.subfolder.as_deref().unwrap_or_default(),
            &self.file_name,
        ])
    }
}

pub struct RecordStore<B> {
    backend: B,
    location: FileLocation,
    records: Vec<Record>,
    ids: IdSequence,
    /// Handle observed by the last successful load or save.
    handle: Option<FileHandle>,
    in_sync: bool,
    last_synced_at: Option<DateTime<Utc>>,
}

impl<B: RemoteFileBackend> RecordStore<B> {
    /// A store with no records that has not talked to the backend yet.
    pub fn empty(backend: B, location: FileLocation) -> Self {
        Self {
            backend,
            location,
            records: Vec::new(),
            ids: IdSequence::new(),
            handle: None,
            in_sync: false,
            last_synced_at: None,
        }
    }

    /// Load the store from the backend.
    ///
    /// An absent file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BackendUnavailable`] if a remote call fails and
    /// [`StoreError::Malformed`] if the file is not valid CSV.
    pub async fn open(backend: B, location: FileLocation) -> Result<Self, StoreError> {
        let mut store = Self::empty(backend, location);
        store.load().await?;
        Ok(store)
    }

    /// Load the store, falling back to an empty one on failure.
    ///
    /// The error is handed back so the caller can show it; the session goes on
    /// with no records.
    pub async fn open_or_empty(backend: B, location: FileLocation) -> (Self, Option<StoreError>) {
        let mut store = Self::empty(backend, location);
        match store.load().await {
            Ok(_) => (store, None),
            Err(error) => {
                tracing::warn!(location = %store.describe(), %error, "could not load refs file; starting empty");
                (store, Some(error))
            }
        }
    }

    /// Replace the in-memory records with the remote file's contents.
    ///
    /// On failure the current records are left untouched. Every loaded record
    /// gets a fresh id.
    ///
    /// # Errors
    ///
    /// See [`RecordStore::open`].
    pub async fn load(&mut self) -> Result<usize, StoreError> {
        let location = self.describe();
        let folder = self.resolve_folder().await?;

        let handle = match &folder {
            Some(folder) => self
                .backend
                .find(folder, &self.location.file_name)
                .await
                .map_err(|e| StoreError::from_backend("find", &location, e))?,
            None => None,
        };

        let rows = match &handle {
            Some(handle) => {
                let bytes = self
                    .backend
                    .download(handle)
                    .await
                    .map_err(|e| StoreError::from_backend("download", &location, e))?;
                codec::decode(&bytes)?
            }
            None => {
                tracing::debug!(%location, "refs file not found; treating as empty");
                Vec::new()
            }
        };

        self.records = rows
            .into_iter()
            .map(|fields| Record::new(self.ids.next_id(), fields))
            .collect();
        self.handle = handle;
        self.mark_synced();
        tracing::debug!(%location, records = self.records.len(), "refs file loaded");
        Ok(self.records.len())
    }

    /// Write every record back to the remote file, creating it if absent.
    ///
    /// On failure the in-memory records are kept and the store stays out of
    /// sync until a later save succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BackendUnavailable`] on transport failure and
    /// [`StoreError::Conflict`] when a guarded write finds the file changed.
    pub async fn save(&mut self) -> Result<(), StoreError> {
        match self.write().await {
            Ok(handle) => {
                self.handle = Some(handle);
                self.mark_synced();
                tracing::debug!(location = %self.describe(), records = self.records.len(), "refs file saved");
                Ok(())
            }
            Err(error) => {
                self.in_sync = false;
                tracing::warn!(location = %self.describe(), %error, "refs file not saved; in-memory records kept");
                Err(error)
            }
        }
    }

    async fn write(&self) -> Result<FileHandle, StoreError> {
        let location = self.describe();
        let bytes = codec::encode(self.records.iter().map(|record| &record.fields))?;

        let folder = self.resolve_folder().await?;
        let name = &self.location.file_name;

        // A guarded backend must overwrite exactly the version it loaded.
        let existing = match &folder {
            _ if self.backend.guards_writes() => self.handle.clone(),
            Some(folder) => self
                .backend
                .find(folder, name)
                .await
                .map_err(|e| StoreError::from_backend("find", &location, e))?,
            None => None,
        };

        match existing {
            Some(handle) => self
                .backend
                .replace(&handle, bytes)
                .await
                .map_err(|e| StoreError::from_backend("replace", &location, e)),
            None => {
                let target = folder.unwrap_or_else(|| self.planned_folder());
                self.backend
                    .create(&target, name, bytes)
                    .await
                    .map_err(|e| StoreError::from_backend("create", &location, e))
            }
        }
    }

    /// The folder holding the file, or `None` if the subfolder does not exist.
    async fn resolve_folder(&self) -> Result<Option<String>, StoreError> {
        let Some(subfolder) = &self.location.subfolder else {
            return Ok(Some(self.location.folder.clone()));
        };
        self.backend
            .find_subfolder(&self.location.folder, subfolder)
            .await
            .map_err(|e| StoreError::from_backend("find_subfolder", &self.describe(), e))
    }

    fn planned_folder(&self) -> String {
        join_key(&[
            &self.location.folder,
            self.location.subfolder.as_deref().unwrap_or_default(),
        ])
    }

    fn mark_synced(&mut self) {
        self.in_sync = true;
        self.last_synced_at = Some(Utc::now());
    }

    // ── Reads ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|record| &record.id == id)
    }

    #[must_use]
    pub fn position_of(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|record| &record.id == id)
    }

    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<&RecordId> {
        self.records.get(position).map(|record| &record.id)
    }

    // ── In-memory mutation ───────────────────────────────────────────────

    /// Append a record with a new id.
    pub fn push(&mut self, fields: RecordFields) -> &Record {
        let id = self.ids.next_id();
        self.in_sync = false;
        self.records.push(Record::new(id, fields));
        &self.records[self.records.len() - 1]
    }

    /// Overwrite the fields of `id` in place, keeping its id and position.
    pub fn replace(&mut self, id: &RecordId, fields: RecordFields) -> Option<&Record> {
        let position = self.position_of(id)?;
        self.in_sync = false;
        self.records[position].fields = fields;
        Some(&self.records[position])
    }

    /// Remove `id`, shifting later records down by one.
    pub fn remove(&mut self, id: &RecordId) -> Option<(usize, Record)> {
        let position = self.position_of(id)?;
        self.in_sync = false;
        Some((position, self.records.remove(position)))
    }

    // ── Status ───────────────────────────────────────────────────────────

    /// Whether memory matches what was last read from or written to the backend.
    #[must_use]
    pub const fn is_in_sync(&self) -> bool {
        self.in_sync
    }

    #[must_use]
    pub const fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }

    /// Whether the remote file existed at the last load or save.
    #[must_use]
    pub const fn file_present(&self) -> bool {
        self.handle.is_some()
    }

    #[must_use]
    pub const fn location(&self) -> &FileLocation {
        &self.location
    }

    /// Backend label plus file key, e.g. `gcs://refs-bucket/dados_refs/refs.csv`.
    #[must_use]
    pub fn describe(&self) -> String {
        let label = self.backend.describe();
        if label.ends_with('/') {
            format!("{label}{}", self.location.key())
        } else {
            format!("{label}/{}", self.location.key())
        }
    }

    #[must_use]
    pub fn status(&self) -> StoreStatusResponse {
        StoreStatusResponse {
            location: self.describe(),
            file_present: self.file_present(),
            records: self.records.len(),
            in_sync: self.in_sync,
            last_synced_at: self.last_synced_at,
        }
    }
}

impl<B> std::fmt::Debug for RecordStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("location", &self.location)
            .field("records", &self.records.len())
            .field("in_sync", &self.in_sync)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn location_from_config_drops_blank_subfolder() {
        let config = StorageConfig {
            folder: "dados_refs".into(),
            subfolder: "  ".into(),
            ..Default::default()
        };
        let location = FileLocation::from_config(&config);
        assert_eq!(location.subfolder, None);
        assert_eq!(location.key(), "dados_refs/refs.csv");
    }

    #[test]
    fn location_key_includes_subfolder() {
        let location = FileLocation::new("dados_refs", "refs.csv").with_subfolder("2025");
        assert_eq!(location.key(), "dados_refs/2025/refs.csv");
    }
}
