use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment could not merge or extract the layered sources.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A section the command needs is still at its defaults.
    #[error("configuration section '{section}' is not configured; set it in .refdesk/config.toml or REFDESK_{env}__* variables")]
    NotConfigured { section: String, env: String },

    /// A field holds a value the rest of the system cannot use.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Figment(Box::new(error))
    }
}

impl ConfigError {
    pub(crate) fn not_configured(section: &str) -> Self {
        Self::NotConfigured {
            section: section.to_string(),
            env: section.to_ascii_uppercase(),
        }
    }
}
