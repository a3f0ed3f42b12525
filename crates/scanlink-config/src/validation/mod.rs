//! Full configuration validation.
//!
//! Validates numeric ranges, the server URL and the pen color. Errors are
//! collected into a single `ConfigError` so the user sees all of them at
//! once.

mod helpers;
mod sections;


use crate::schema::ScanlinkConfig;
use scanlink_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ScanlinkConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_server(&mut errors, config);
    sections::validate_scanner(&mut errors, config);
    sections::validate_notifications(&mut errors, config);
    sections::validate_signature(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
