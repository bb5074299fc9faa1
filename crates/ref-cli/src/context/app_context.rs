use anyhow::Context;
use ref_auth::AuthenticatedUser;
use ref_config::RefConfig;
use ref_service::MutationService;
use ref_store::{FileLocation, ObjectStoreBackend, RecordStore};

/// Shared resources for one logged-in session.
pub struct AppContext {
    pub service: MutationService<ObjectStoreBackend>,
    pub config: RefConfig,
    pub user: AuthenticatedUser,
    /// Why the initial load failed, if it did. Writes are refused until a
    /// load succeeds, so a failed read never turns into an overwrite.
    pub load_error: Option<String>,
}

impl AppContext {
    /// Connect to storage and load `refs.csv`.
    ///
    /// A load failure is kept in [`load_error`](Self::load_error) and the
    /// session starts with no records.
    pub async fn init(config: RefConfig, user: AuthenticatedUser) -> anyhow::Result<Self> {
        let (service, load_error) = open_service(&config).await?;
        tracing::debug!(user = %user.username, records = service.records().len(), "session ready");
        Ok(Self {
            service,
            config,
            user,
            load_error,
        })
    }

    /// Fail with the load error if the store never loaded.
    pub fn require_loaded(&self) -> anyhow::Result<()> {
        match &self.load_error {
            Some(error) => anyhow::bail!("refusing to write: refs file could not be loaded ({error})"),
            None => Ok(()),
        }
    }
}

/// Build the storage backend from config and open the store over it.
pub async fn open_service(
    config: &RefConfig,
) -> anyhow::Result<(MutationService<ObjectStoreBackend>, Option<String>)> {
    let backend = ObjectStoreBackend::from_config(&config.storage)
        .context("failed to configure storage backend")?;
    let location = FileLocation::from_config(&config.storage);
    let (store, error) = RecordStore::open_or_empty(backend, location).await;
    Ok((MutationService::new(store), error.map(|e| e.to_string())))
}
