//! [`RemoteFileBackend`] over the `object_store` crate.
//!
//! Folders are key prefixes. A subfolder is resolved among the common prefixes
//! listed directly under its parent, so a name that does not exist yet simply
//! resolves to `None`.

use std::sync::Arc;

use object_store::aws::AmazonS3Builder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutMode, PutOptions, PutPayload, UpdateVersion};
use ref_config::{ConfigError, StorageConfig, StorageProvider};

use crate::backend::{FileHandle, RemoteFileBackend, join_key};
use crate::error::{BackendError, StoreError};

/// Env var holding GCS service account JSON when the config leaves it empty.
pub const GOOGLE_CREDENTIALS_ENV: &str = "GOOGLE_CREDENTIALS";

#[derive(Debug, Clone)]
pub struct ObjectStoreBackend {
    store: Arc<dyn ObjectStore>,
    label: String,
    conditional: bool,
}

impl ObjectStoreBackend {
    pub fn new(store: Arc<dyn ObjectStore>, label: impl Into<String>, conditional: bool) -> Self {
        Self {
            store,
            label: label.into(),
            conditional,
        }
    }

    /// Process-local backend; nothing survives the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()), "memory://", false)
    }

    /// Build the backend selected by `storage.provider`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the section is incomplete or
    /// inconsistent, and [`StoreError::BackendUnavailable`] if the client
    /// cannot be constructed.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        let config = config.require()?;
        let label = format!("{}://{}", config.provider, config.bucket);

        let store: Arc<dyn ObjectStore> = match config.provider {
            StorageProvider::Memory => Arc::new(InMemory::new()),
            StorageProvider::Local => {
                if config.conditional_writes {
                    return Err(ConfigError::InvalidValue {
                        field: "storage.conditional_writes".into(),
                        reason: "the local provider cannot guard writes".into(),
                    }
                    .into());
                }
                std::fs::create_dir_all(&config.bucket).map_err(|e| connect_error(e.into()))?;
                Arc::new(
                    LocalFileSystem::new_with_prefix(&config.bucket)
                        .map_err(|e| connect_error(e.into()))?,
                )
            }
            StorageProvider::S3 => {
                let mut builder = AmazonS3Builder::new()
                    .with_bucket_name(&config.bucket)
                    .with_access_key_id(&config.access_key_id)
                    .with_secret_access_key(&config.secret_access_key);
                if !config.region.is_empty() {
                    builder = builder.with_region(&config.region);
                }
                if !config.endpoint.is_empty() {
                    builder = builder
                        .with_endpoint(&config.endpoint)
                        .with_allow_http(config.endpoint.starts_with("http://"));
                }
                Arc::new(builder.build().map_err(|e| connect_error(e.into()))?)
            }
            StorageProvider::Gcs => {
                let mut builder = GoogleCloudStorageBuilder::new().with_bucket_name(&config.bucket);
                let key = if config.service_account_key.is_empty() {
                    std::env::var(GOOGLE_CREDENTIALS_ENV).unwrap_or_default()
                } else {
                    config.service_account_key.clone()
                };
                if key.is_empty() {
                    tracing::debug!("no service account key configured; using ambient GCS credentials");
                } else {
                    builder = builder.with_service_account_key(key);
                }
                Arc::new(builder.build().map_err(|e| connect_error(e.into()))?)
            }
        };

        tracing::debug!(backend = %label, conditional = config.conditional_writes, "storage backend ready");
        Ok(Self::new(store, label, config.conditional_writes))
    }

    /// The underlying object store, e.g. to seed fixtures in tests.
    #[must_use]
    pub fn object_store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
}

fn connect_error(source: Box<dyn std::error::Error + Send + Sync>) -> StoreError {
    StoreError::BackendUnavailable {
        operation: "connect",
        source,
    }
}

fn write_error(path: &str, error: object_store::Error) -> BackendError {
    match error {
        object_store::Error::AlreadyExists { .. } | object_store::Error::Precondition { .. } => {
            BackendError::Conflict {
                path: path.to_string(),
            }
        }
        other => BackendError::transport(other),
    }
}

fn handle_from(path: String, e_tag: Option<String>, version: Option<String>) -> FileHandle {
    FileHandle {
        path,
        e_tag,
        version,
    }
}

impl RemoteFileBackend for ObjectStoreBackend {
    async fn find(&self, folder: &str, name: &str) -> Result<Option<FileHandle>, BackendError> {
        let key = join_key(&[folder, name]);
        tracing::debug!(%key, "looking up remote file");
        match self.store.head(&Path::from(key.as_str())).await {
            Ok(meta) => Ok(Some(handle_from(key, meta.e_tag, meta.version))),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(error) => Err(BackendError::transport(error)),
        }
    }

    async fn find_subfolder(
        &self,
        folder: &str,
        name: &str,
    ) -> Result<Option<String>, BackendError> {
        let parent = join_key(&[folder]);
        let prefix = (!parent.is_empty()).then(|| Path::from(parent.as_str()));
        let listing = self
            .store
            .list_with_delimiter(prefix.as_ref())
            .await
            .map_err(BackendError::transport)?;

        Ok(listing
            .common_prefixes
            .into_iter()
            .find(|candidate| candidate.filename() == Some(name))
            .map(|found| found.to_string()))
    }

    async fn download(&self, handle: &FileHandle) -> Result<Vec<u8>, BackendError> {
        tracing::debug!(path = %handle.path, "downloading remote file");
        let result = self
            .store
            .get(&Path::from(handle.path.as_str()))
            .await
            .map_err(BackendError::transport)?;
        let bytes = result.bytes().await.map_err(BackendError::transport)?;
        Ok(bytes.to_vec())
    }

    async fn create(
        &self,
        folder: &str,
        name: &str,
        bytes: Vec<u8>,
    ) -> Result<FileHandle, BackendError> {
        let key = join_key(&[folder, name]);
        let mode = if self.conditional {
            PutMode::Create
        } else {
            PutMode::Overwrite
        };
        tracing::debug!(%key, ?mode, size = bytes.len(), "creating remote file");
        let result = self
            .store
            .put_opts(
                &Path::from(key.as_str()),
                PutPayload::from(bytes),
                PutOptions::from(mode),
            )
            .await
            .map_err(|e| write_error(&key, e))?;
        Ok(handle_from(key, result.e_tag, result.version))
    }

    async fn replace(&self, handle: &FileHandle, bytes: Vec<u8>) -> Result<FileHandle, BackendError> {
        let guarded = self.conditional && (handle.e_tag.is_some() || handle.version.is_some());
        let mode = if guarded {
            PutMode::Update(UpdateVersion {
                e_tag: handle.e_tag.clone(),
                version: handle.version.clone(),
            })
        } else {
            PutMode::Overwrite
        };
        tracing::debug!(path = %handle.path, guarded, size = bytes.len(), "replacing remote file");
        let result = self
            .store
            .put_opts(
                &Path::from(handle.path.as_str()),
                PutPayload::from(bytes),
                PutOptions::from(mode),
            )
            .await
            .map_err(|e| write_error(&handle.path, e))?;
        Ok(handle_from(handle.path.clone(), result.e_tag, result.version))
    }

    fn guards_writes(&self) -> bool {
        self.conditional
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
