//! Single-user login settings.

use serde::{Deserialize, Serialize};
use std::fmt;

fn default_username() -> String {
    String::from("admin")
}

#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// The one recognised username.
    #[serde(default = "default_username")]
    pub username: String,

    /// Password for `username`. Empty disables login entirely.
    #[serde(default)]
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

impl AuthConfig {
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_password() {
        let config = AuthConfig::default();
        assert_eq!(config.username, "admin");
        assert!(!config.is_configured());
    }

    #[test]
    fn debug_redacts_password() {
        let config = AuthConfig {
            username: "editor".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("editor"));
        assert!(!rendered.contains("hunter2"));
    }
}
