use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ScanlinkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid pairing code: {0}")]
    InvalidPairingCode(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("signature error: {0}")]
    Signature(String),

    #[error("{0}")]
    Other(String),
}
