//! The remote file transport behind the record store.
//!
//! Only four calls are needed to persist `refs.csv`: find it in a folder,
//! download it, create it, or overwrite it. Keeping the overwrite in a single
//! method ([`RemoteFileBackend::replace`]) means a write guard can be added
//! there without touching search or mutation logic.

use std::future::Future;

use crate::error::BackendError;

/// Reference to one remote file, as returned by `find` or a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// Full object path inside the backend.
    pub path: String,
    /// Entity tag observed for this version of the file, if the backend has one.
    pub e_tag: Option<String>,
    /// Backend-specific version id, if the backend has one.
    pub version: Option<String>,
}

impl FileHandle {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            e_tag: None,
            version: None,
        }
    }
}

pub trait RemoteFileBackend: Send + Sync {
    /// Look up `name` directly inside `folder`.
    fn find(
        &self,
        folder: &str,
        name: &str,
    ) -> impl Future<Output = Result<Option<FileHandle>, BackendError>> + Send;

    /// Resolve a subfolder of `folder` by name, returning its full path.
    fn find_subfolder(
        &self,
        folder: &str,
        name: &str,
    ) -> impl Future<Output = Result<Option<String>, BackendError>> + Send;

    fn download(
        &self,
        handle: &FileHandle,
    ) -> impl Future<Output = Result<Vec<u8>, BackendError>> + Send;

    /// Create `name` in `folder` and return a handle to the written version.
    fn create(
        &self,
        folder: &str,
        name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<FileHandle, BackendError>> + Send;

    /// Overwrite the file behind `handle` and return a handle to the new version.
    fn replace(
        &self,
        handle: &FileHandle,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<FileHandle, BackendError>> + Send;

    /// Whether writes are conditional on the version a handle carries.
    ///
    /// When true the store never re-discovers the file before saving, so a
    /// handle from load time is what guards the overwrite.
    fn guards_writes(&self) -> bool {
        false
    }

    /// Short description of where files live, for status output.
    fn describe(&self) -> String;
}

/// Join folder segments and a file name into one `/`-separated key.
#[must_use]
pub fn join_key(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim_matches('/'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
