use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Nothing was submitted yet; the login screen shows no message for this.
    #[error("enter a username and password")]
    EmptyCredentials,

    #[error("incorrect username or password")]
    InvalidCredentials,

    /// No password is configured, so nobody can log in.
    #[error("login is not configured; set auth.password or REFDESK_AUTH__PASSWORD")]
    NotConfigured,
}

impl AuthError {
    /// Whether the presentation layer should show this error to the user.
    #[must_use]
    pub const fn is_user_visible(&self) -> bool {
        !matches!(self, Self::EmptyCredentials)
    }
}
