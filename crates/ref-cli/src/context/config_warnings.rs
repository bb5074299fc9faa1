use ref_config::{RefConfig, StorageProvider};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &RefConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &RefConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.storage.is_configured() && has_env_prefix(&env_keys, "REFDESK_STORAGE") {
        warnings.push(
            "Storage config appears incomplete while REFDESK_STORAGE* env vars exist. Use double underscores (example: REFDESK_STORAGE__BUCKET)."
                .to_string(),
        );
    }

    if !config.auth.is_configured() && has_env_prefix(&env_keys, "REFDESK_AUTH") {
        warnings.push(
            "Auth config appears default while REFDESK_AUTH* env vars exist. Use double underscores (example: REFDESK_AUTH__PASSWORD)."
                .to_string(),
        );
    }

    if config.storage.provider == StorageProvider::Memory {
        warnings.push(
            "storage.provider is \"memory\": records are not kept after the process exits."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
