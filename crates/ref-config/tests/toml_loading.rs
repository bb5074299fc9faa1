//! Integration tests for TOML and environment configuration layering.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use ref_config::{RefConfig, StorageProvider};

#[test]
fn loads_storage_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
provider = "s3"
bucket = "refs-bucket"
folder = "dados_refs"
subfolder = "2025"
file_name = "refs.csv"
conditional_writes = true
region = "auto"
endpoint = "http://localhost:9000"
access_key_id = "key"
secret_access_key = "secret"
"#,
        )?;

        let config: RefConfig = Figment::from(Serialized::defaults(RefConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.storage.provider, StorageProvider::S3);
        assert_eq!(config.storage.bucket, "refs-bucket");
        assert_eq!(config.storage.folder, "dados_refs");
        assert_eq!(config.storage.subfolder, "2025");
        assert!(config.storage.conditional_writes);
        assert_eq!(config.storage.endpoint, "http://localhost:9000");
        assert!(config.storage.is_configured());
        Ok(())
    });
}

#[test]
fn loads_auth_and_general_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[auth]
username = "editor"
password = "s3cret"

[general]
default_limit = 5
case_sensitive = true
"#,
        )?;

        let config: RefConfig = Figment::from(Serialized::defaults(RefConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.auth.username, "editor");
        assert_eq!(config.auth.password, "s3cret");
        assert!(config.auth.is_configured());
        assert_eq!(config.general.default_limit, 5);
        assert!(config.general.case_sensitive);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
bucket = "only-bucket"
"#,
        )?;

        let config: RefConfig = Figment::from(Serialized::defaults(RefConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.storage.provider, StorageProvider::Gcs);
        assert_eq!(config.storage.file_name, "refs.csv");
        assert!(!config.storage.conditional_writes);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
provider = "local"
bucket = "/from/toml"
"#,
        )?;
        jail.set_env("REFDESK_STORAGE__BUCKET", "/from/env");
        jail.set_env("REFDESK_AUTH__PASSWORD", "env-pass");

        let config: RefConfig = Figment::from(Serialized::defaults(RefConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("REFDESK_").split("__"))
            .extract()?;

        assert_eq!(config.storage.provider, StorageProvider::Local);
        assert_eq!(config.storage.bucket, "/from/env");
        assert_eq!(config.auth.password, "env-pass");
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".refdesk")?;
        jail.create_file(
            ".refdesk/config.toml",
            r#"
[storage]
provider = "memory"
folder = "project-folder"
"#,
        )?;

        let config: RefConfig = RefConfig::figment().extract()?;
        assert_eq!(config.storage.provider, StorageProvider::Memory);
        assert_eq!(config.storage.folder, "project-folder");
        Ok(())
    });
}

#[test]
fn explicit_file_beats_project_file_but_not_env() {
    Jail::expect_with(|jail| {
        jail.create_dir(".refdesk")?;
        jail.create_file(".refdesk/config.toml", "[storage]\nfolder = \"project\"\n")?;
        jail.create_file("other.toml", "[storage]\nfolder = \"explicit\"\nbucket = \"b\"\n")?;
        jail.set_env("REFDESK_STORAGE__BUCKET", "env-bucket");

        let config = RefConfig::load_from(std::path::Path::new("other.toml"))
            .map_err(|e| e.to_string())?;
        assert_eq!(config.storage.folder, "explicit");
        assert_eq!(config.storage.bucket, "env-bucket");
        Ok(())
    });
}

#[test]
fn invalid_provider_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[storage]\nprovider = \"ftp\"\n")?;

        let result: Result<RefConfig, _> =
            Figment::from(Serialized::defaults(RefConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}
