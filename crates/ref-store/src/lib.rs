//! # ref-store
//!
//! Persistence for the Refdesk record table.
//!
//! - [`codec`] reads and writes `refs.csv` (fixed nine-column header).
//! - [`RemoteFileBackend`] is the four-call transport (find, download, create,
//!   replace); [`ObjectStoreBackend`] implements it over `object_store` for the
//!   memory, local, S3 and GCS providers.
//! - [`RecordStore`] holds the loaded records in order, hands out session ids,
//!   and rewrites the whole file on [`RecordStore::save`].
//!
//! ```no_run
//! # async fn demo() -> Result<(), ref_store::StoreError> {
//! use ref_store::{FileLocation, ObjectStoreBackend, RecordStore};
//!
//! let config = ref_config::RefConfig::load()?;
//! let backend = ObjectStoreBackend::from_config(&config.storage)?;
//! let store = RecordStore::open(backend, FileLocation::from_config(&config.storage)).await?;
//! println!("{} records at {}", store.len(), store.describe());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod codec;
pub mod error;
pub mod object_backend;
pub mod store;

pub use backend::{FileHandle, RemoteFileBackend};
pub use error::{BackendError, StoreError};
pub use object_backend::ObjectStoreBackend;
pub use store::{FileLocation, RecordStore};
