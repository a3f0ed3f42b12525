//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::FacingModeConfig;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_scanlink_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, scanlink_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[server]
url = "https://checkout.example.org"

[scanner]
facing_mode = "user"
fps = 15
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.server.url, "https://checkout.example.org");
    assert_eq!(config.scanner.facing_mode, FacingModeConfig::User);
    assert_eq!(config.scanner.fps, 15);
    // Defaults preserved
    assert_eq!(config.server.path, "socket.io");
    assert_eq!(config.scanner.flash_ms, 500);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, scanlink_common::ConfigError::ParseError(_)));
}

#[test]
fn load_keeps_out_of_range_values_for_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[scanner]\nfps = 500\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.scanner.fps, 500);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scanlink").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.server.url, "http://localhost:5000");
    assert_eq!(config.notifications.dismiss_after_ms, 3000);
}

#[test]
fn default_template_parses_to_defaults() {
    let config: crate::ScanlinkConfig =
        toml::from_str(template::default_config_toml()).unwrap();
    assert_eq!(config.scanner.fps, 10);
    assert_eq!(config.signature.stroke_color, "#000");
}

#[test]
fn create_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[scanner]\nfps = 20\n").unwrap();

    create_default_config(&path).unwrap();
    assert_eq!(load_from_path(&path).unwrap().scanner.fps, 20);
}

#[test]
fn default_config_path_ends_with_scanlink() {
    if std::env::var_os(paths::CONFIG_PATH_ENV).is_some() {
        return;
    }
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("scanlink/config.toml"));
    }
}
