//! Remote storage location of `refs.csv`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ConfigError;

fn default_file_name() -> String {
    String::from("refs.csv")
}

/// Which `object_store` implementation backs the reference file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    /// Process-local store; contents vanish on exit.
    Memory,
    /// Directory on the local filesystem (`bucket` is the root directory).
    Local,
    /// S3-compatible bucket (AWS, R2, MinIO).
    S3,
    /// Google Cloud Storage bucket.
    #[default]
    Gcs,
}

impl StorageProvider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Local => "local",
            Self::S3 => "s3",
            Self::Gcs => "gcs",
        }
    }
}

impl fmt::Display for StorageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub provider: StorageProvider,

    /// Bucket name, or root directory for the `local` provider.
    #[serde(default)]
    pub bucket: String,

    /// Folder holding the reference file (key prefix inside the bucket).
    #[serde(default)]
    pub folder: String,

    /// Optional subfolder of `folder`, resolved by name at lookup time.
    #[serde(default)]
    pub subfolder: String,

    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Guard overwrites with the version seen at load time.
    #[serde(default)]
    pub conditional_writes: bool,

    /// S3 region.
    #[serde(default)]
    pub region: String,

    /// Custom S3 endpoint (R2, MinIO). Empty means the provider default.
    #[serde(default)]
    pub endpoint: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// GCS service account JSON. Empty falls back to `GOOGLE_CREDENTIALS`.
    #[serde(default)]
    pub service_account_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::default(),
            bucket: String::new(),
            folder: String::new(),
            subfolder: String::new(),
            file_name: default_file_name(),
            conditional_writes: false,
            region: String::new(),
            endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            service_account_key: String::new(),
        }
    }
}

impl StorageConfig {
    /// Check that the selected provider has what it needs to connect.
    pub fn is_configured(&self) -> bool {
        match self.provider {
            StorageProvider::Memory => true,
            StorageProvider::Local | StorageProvider::Gcs => !self.bucket.is_empty(),
            StorageProvider::S3 => {
                !self.bucket.is_empty()
                    && !self.access_key_id.is_empty()
                    && !self.secret_access_key.is_empty()
            }
        }
    }

    /// Validate the section for use by a storage backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when required fields are empty and
    /// [`ConfigError::InvalidValue`] when the file or subfolder name would be
    /// read as a path.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::not_configured("storage"));
        }
        if self.file_name.trim().is_empty() || self.file_name.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "storage.file_name".into(),
                reason: format!("'{}' must be a plain file name", self.file_name),
            });
        }
        if self.subfolder.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "storage.subfolder".into(),
                reason: "only one level of subfolder is supported".into(),
            });
        }
        Ok(self)
    }

    /// Human-readable location, e.g. `gcs://bucket/folder[/subfolder]/refs.csv`.
    pub fn location(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in [self.folder.as_str(), self.subfolder.as_str()] {
            let trimmed = part.trim_matches('/');
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }
        parts.push(&self.file_name);
        format!("{}://{}/{}", self.provider, self.bucket, parts.join("/"))
    }
}
