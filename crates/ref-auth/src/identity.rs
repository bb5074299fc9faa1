use serde::{Deserialize, Serialize};

/// The user admitted by [`crate::AuthGate::check`].
///
/// Carries no token and never expires; it lives as long as the session that
/// holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub username: String,
}
