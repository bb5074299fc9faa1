//! # ref-config
//!
//! Layered configuration loading for Refdesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REFDESK_*` prefix, `__` as separator)
//! 2. Project-level `.refdesk/config.toml`
//! 3. User-level `~/.config/refdesk/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `REFDESK_STORAGE__BUCKET` -> `storage.bucket`,
//! `REFDESK_AUTH__PASSWORD` -> `auth.password`, etc.
//!
//! ```no_run
//! use ref_config::RefConfig;
//!
//! let config = RefConfig::load_with_dotenv().expect("config");
//! if config.storage.is_configured() {
//!     println!("refs file: {}", config.storage.location());
//! }
//! ```

mod auth;
mod error;
mod general;
mod storage;

pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use storage::{StorageConfig, StorageProvider};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var prefix for every setting.
pub const ENV_PREFIX: &str = "REFDESK_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RefConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RefConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT read `.env`; use [`load_with_dotenv`](Self::load_with_dotenv) for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the current directory (if any), then [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load with an explicit TOML file layered between the standard files and env.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::figment_with(Some(path))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    fn figment_with(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".refdesk/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("refdesk").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_unconfigured() {
        let config = RefConfig::default();
        assert!(!config.storage.is_configured());
        assert!(!config.auth.is_configured());
        assert_eq!(config.general.default_limit, 20);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: RefConfig = RefConfig::figment().extract()?;
            assert_eq!(config.storage.file_name, "refs.csv");
            assert_eq!(config.auth.username, "admin");
            Ok(())
        });
    }
}
