//! Tests for configuration loading and database path resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate HOME_SOFTWARE_DATABASE or HOME_SOFTWARE_CONFIG are
//! marked with #[serial].

use home_common::config::{
    config_file_path, resolve_database_path, resolve_port, TomlConfig, CONFIG_ENV_VAR,
    DATABASE_ENV_VAR, DEFAULT_DATABASE, DEFAULT_PORT,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};

fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(DATABASE_ENV_VAR);

    let path = resolve_database_path(None, DATABASE_ENV_VAR, &TomlConfig::default());
    assert_eq!(path, PathBuf::from(DEFAULT_DATABASE));
}

#[test]
#[serial]
fn test_resolver_cli_arg_has_highest_priority() {
    env::set_var(DATABASE_ENV_VAR, "/tmp/from-env.db");
    let config = TomlConfig {
        database: Some(PathBuf::from("/tmp/from-config.db")),
        port: None,
    };

    let path = resolve_database_path(Some(Path::new("/tmp/from-cli.db")), DATABASE_ENV_VAR, &config);
    assert_eq!(path, PathBuf::from("/tmp/from-cli.db"));

    env::remove_var(DATABASE_ENV_VAR);
}

#[test]
#[serial]
fn test_resolver_env_var_beats_config_file() {
    env::set_var(DATABASE_ENV_VAR, "/tmp/from-env.db");
    let config = TomlConfig {
        database: Some(PathBuf::from("/tmp/from-config.db")),
        port: None,
    };

    let path = resolve_database_path(None, DATABASE_ENV_VAR, &config);
    assert_eq!(path, PathBuf::from("/tmp/from-env.db"));

    env::remove_var(DATABASE_ENV_VAR);
}

#[test]
#[serial]
fn test_resolver_empty_env_var_is_ignored() {
    env::set_var(DATABASE_ENV_VAR, "");
    let config = TomlConfig {
        database: Some(PathBuf::from("/tmp/from-config.db")),
        port: None,
    };

    let path = resolve_database_path(None, DATABASE_ENV_VAR, &config);
    assert_eq!(path, PathBuf::from("/tmp/from-config.db"));

    env::remove_var(DATABASE_ENV_VAR);
}

#[test]
fn test_port_resolution_order() {
    let config = TomlConfig {
        database: None,
        port: Some(9000),
    };

    assert_eq!(resolve_port(Some(8500), &config), 8500);
    assert_eq!(resolve_port(None, &config), 9000);
    assert_eq!(resolve_port(None, &TomlConfig::default()), DEFAULT_PORT);
}

#[test]
fn test_toml_config_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "database = \"/srv/home/db.sqlite\"\nport = 8090\n");

    let config = TomlConfig::load(&path).unwrap();
    assert_eq!(config.database, Some(PathBuf::from("/srv/home/db.sqlite")));
    assert_eq!(config.port, Some(8090));
}

#[test]
fn test_toml_config_all_fields_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "");

    assert_eq!(TomlConfig::load(&path).unwrap(), TomlConfig::default());
}

#[test]
fn test_toml_config_rejects_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "databse = \"typo.db\"\n");

    let err = TomlConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
fn test_toml_config_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = TomlConfig::load(&dir.path().join("missing.toml"));
    assert!(matches!(result, Err(home_common::Error::Io(_))));
}

#[test]
#[serial]
fn test_config_env_var_selects_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "port = 8123\n");
    env::set_var(CONFIG_ENV_VAR, &path);

    assert_eq!(config_file_path(), Some(path));
    assert_eq!(TomlConfig::load_or_default().port, Some(8123));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_invalid_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "port = \"not a number\"\n");
    env::set_var(CONFIG_ENV_VAR, &path);

    assert_eq!(TomlConfig::load_or_default(), TomlConfig::default());

    env::remove_var(CONFIG_ENV_VAR);
}
