//! Unit tests for configuration resolution
//!
//! Priority order: overrides (CLI/env) > TOML file > compiled defaults.
//!
//! Note: tests touching the process environment are marked #[serial].

use serial_test::serial;
use std::io::Write;
use std::time::Duration;
use tm_common::config::{
    load_toml_config, parse_toml_config, AppConfig, ConfigOverrides, DEFAULT_BIND_ADDR,
    DEFAULT_DATABASE_URL, TMDB_IMAGE_BASE_URL, TMDB_SEARCH_URL,
};
use tm_common::Error;

#[test]
fn test_defaults_when_only_token_given() {
    let overrides = ConfigOverrides {
        tmdb_token: Some("tok".to_string()),
        ..Default::default()
    };

    let config = AppConfig::resolve(overrides, None).unwrap();

    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(config.tmdb.token, "tok");
    assert_eq!(config.tmdb.search_url, TMDB_SEARCH_URL);
    assert_eq!(config.tmdb.image_base_url, TMDB_IMAGE_BASE_URL);
    assert_eq!(config.tmdb.timeout, None);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_missing_token_is_config_error() {
    let result = AppConfig::resolve(ConfigOverrides::default(), None);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_overrides_beat_toml() {
    let toml = parse_toml_config(
        r#"
        database_url = "sqlite://from-file.db"
        bind_addr = "0.0.0.0:8080"

        [tmdb]
        token = "Bearer file-token"
        image_base_url = "http://images.local"
        timeout_secs = 10

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    let overrides = ConfigOverrides {
        database_url: Some("sqlite://from-env.db".to_string()),
        ..Default::default()
    };

    let config = AppConfig::resolve(overrides, Some(toml)).unwrap();

    assert_eq!(config.database_url, "sqlite://from-env.db");
    assert_eq!(config.bind_addr, "0.0.0.0:8080");
    assert_eq!(config.tmdb.token, "file-token");
    assert_eq!(config.tmdb.image_base_url, "http://images.local");
    assert_eq!(config.tmdb.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_malformed_toml_is_config_error() {
    let result = parse_toml_config("database_url = [");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = load_toml_config(Some(&missing));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_explicit_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "bind_addr = \"127.0.0.1:9999\"").unwrap();

    let loaded = load_toml_config(Some(&path)).unwrap().unwrap();
    assert_eq!(loaded.bind_addr.as_deref(), Some("127.0.0.1:9999"));
}

#[test]
#[serial]
fn test_default_location_absent_is_not_error() {
    // Point the config dir somewhere empty
    let dir = tempfile::tempdir().unwrap();
    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let result = load_toml_config(None);

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    #[cfg(target_os = "linux")]
    assert!(result.unwrap().is_none());
    #[cfg(not(target_os = "linux"))]
    let _ = result;
}
