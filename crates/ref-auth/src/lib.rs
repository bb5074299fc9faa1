//! # ref-auth
//!
//! Fixed-credential login for Refdesk.
//!
//! A session is admitted when the submitted username and password match the
//! single pair from [`ref_config::AuthConfig`]. There is no token issuance, no
//! expiry, and no multi-user support.

pub mod error;
pub mod identity;

pub use error::AuthError;
pub use identity::AuthenticatedUser;

use ref_config::AuthConfig;

/// Gate that admits exactly one username/password pair.
#[derive(Clone)]
pub struct AuthGate {
    username: String,
    password: String,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl AuthGate {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }

    /// The username this gate recognises.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a submitted username/password pair.
    ///
    /// # Errors
    ///
    /// - [`AuthError::EmptyCredentials`] if both inputs are empty.
    /// - [`AuthError::NotConfigured`] if the gate has no password.
    /// - [`AuthError::InvalidCredentials`] on any mismatch.
    pub fn check(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        if username.is_empty() && password.is_empty() {
            return Err(AuthError::EmptyCredentials);
        }
        if self.username.is_empty() || self.password.is_empty() {
            tracing::warn!("login attempted but no credentials are configured");
            return Err(AuthError::NotConfigured);
        }
        if username != self.username || password != self.password {
            tracing::warn!(%username, "rejected login");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!(%username, "login accepted");
        Ok(AuthenticatedUser {
            username: username.to_string(),
        })
    }
}
