//! Configuration schema types for scanlink.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod notifications;
mod scanner;
mod server;
mod signature;
mod system;

pub use notifications::*;
pub use scanner::*;
pub use server::*;
pub use signature::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for scanlink.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanlinkConfig {
    pub server: ServerConfig,
    pub scanner: ScannerConfig,
    pub notifications: NotificationsConfig,
    pub signature: SignatureConfig,
    pub logging: LoggingConfig,
}
