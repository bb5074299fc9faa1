//! Store error types.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by a [`crate::RemoteFileBackend`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport, authentication, or permission failure.
    #[error("{0}")]
    Transport(#[source] BoxError),

    /// The remote file changed (or appeared) since it was last read.
    #[error("remote file changed concurrently: {path}")]
    Conflict { path: String },
}

impl BackendError {
    pub fn transport(error: impl Into<BoxError>) -> Self {
        Self::Transport(error.into())
    }
}

/// Errors that can occur while loading or saving the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The remote file store could not be reached or refused the request.
    #[error("storage backend unavailable during {operation}: {source}")]
    BackendUnavailable {
        /// Which remote step failed (`find`, `download`, `create`, ...).
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// A conditional write lost to another writer.
    #[error("{location} was modified by someone else; reload before saving again")]
    Conflict { location: String },

    /// The downloaded file is not valid CSV.
    #[error("refs file is malformed: {0}")]
    Malformed(#[source] csv::Error),

    /// The in-memory records could not be serialized.
    #[error("failed to encode refs file: {0}")]
    Encode(#[source] BoxError),

    /// The storage section cannot be turned into a backend.
    #[error(transparent)]
    Config(#[from] ref_config::ConfigError),
}

impl StoreError {
    pub(crate) fn from_backend(operation: &'static str, location: &str, error: BackendError) -> Self {
        match error {
            BackendError::Transport(source) => Self::BackendUnavailable { operation, source },
            BackendError::Conflict { .. } => Self::Conflict {
                location: location.to_string(),
            },
        }
    }

    /// Whether retrying the whole session could succeed.
    #[must_use]
    pub const fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }
}
