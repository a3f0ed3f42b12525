//! scanlink configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scanlink_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ScanlinkConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use scanlink_common::ConfigError;

/// Load config from the platform default path.
///
/// Creates a default `config.toml` if none exists, then validates the
/// result. Validation failures are returned as errors.
pub fn load_config() -> Result<ScanlinkConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path (e.g. a `--config` override).
pub fn load_config_from(path: &Path) -> Result<ScanlinkConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &ScanlinkConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = ScanlinkConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"server\""));
        assert!(json.contains("\"scanner\""));
        assert!(json.contains("\"notifications\""));
        assert!(json.contains("\"signature\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_missing_path_is_file_not_found() {
        let err = load_config_from(Path::new("/tmp/scanlink_no_such_config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scanner]\nfps = 0\n").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("scanner.fps"));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = ScanlinkConfig::default();
        let json = config_to_json(&config);
        let parsed: ScanlinkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.server.url, "http://localhost:5000");
        assert_eq!(parsed.scanner.fps, 10);
        assert_eq!(parsed.signature.height, 150);
    }
}
