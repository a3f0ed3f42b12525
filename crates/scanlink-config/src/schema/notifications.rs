use serde::{Deserialize, Serialize};

/// Banner behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Milliseconds before banners dismiss themselves (valid range: 500-60000).
    pub dismiss_after_ms: u32,
    /// Maximum banners kept at once (valid range: 1-64).
    pub capacity: u32,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 3000,
            capacity: 16,
        }
    }
}
