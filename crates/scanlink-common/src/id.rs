use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ScanlinkError;

/// Short hex id used to correlate log lines from one client instance.
pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Opaque token that the server maps to a paired checkout session.
///
/// The client never interprets the contents; it only forwards it. The
/// server issues it (typically a short digit string) and is the sole
/// authority for what it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairingCode(String);

impl PairingCode {
    /// Accepts any non-blank string. Surrounding whitespace is trimmed.
    pub fn parse(raw: &str) -> Result<Self, ScanlinkError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ScanlinkError::InvalidPairingCode(
                "pairing code must not be empty".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PairingCode {
    type Err = ScanlinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
