use anyhow::Context;
use ref_auth::{AuthError, AuthGate, AuthenticatedUser};
use ref_config::RefConfig;

use crate::cli::GlobalFlags;

/// Load `.env` from the working directory (if any), then the layered config.
pub fn load_config() -> anyhow::Result<RefConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    RefConfig::load().map_err(anyhow::Error::from)
}

/// Check `--user`/`--password` (or their env vars) against the configured login.
pub fn authenticate(config: &RefConfig, flags: &GlobalFlags) -> anyhow::Result<AuthenticatedUser> {
    let gate = AuthGate::from_config(&config.auth);
    let username = flags.user.as_deref().unwrap_or_default();
    let password = flags.password.as_deref().unwrap_or_default();

    gate.check(username, password).map_err(|error| match error {
        AuthError::EmptyCredentials => anyhow::anyhow!(
            "login required: pass --user and --password (or set REFDESK_USER and REFDESK_PASSWORD)"
        ),
        other => anyhow::Error::from(other),
    })
}

#[cfg(test)]
mod tests {
    use ref_config::AuthConfig;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags(user: Option<&str>, password: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: false,
            verbose: false,
            user: user.map(String::from),
            password: password.map(String::from),
        }
    }

    fn config() -> RefConfig {
        RefConfig {
            auth: AuthConfig {
                username: "Admin2Steps".into(),
                password: "secret".into(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn matching_flags_log_in() {
        let user = authenticate(&config(), &flags(Some("Admin2Steps"), Some("secret"))).unwrap();
        assert_eq!(user.username, "Admin2Steps");
    }

    #[test]
    fn missing_flags_ask_for_login() {
        let err = authenticate(&config(), &flags(None, None)).unwrap_err();
        assert!(err.to_string().starts_with("login required"));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let err = authenticate(&config(), &flags(Some("Admin2Steps"), Some("nope"))).unwrap_err();
        assert_eq!(err.to_string(), "incorrect username or password");
    }
}
