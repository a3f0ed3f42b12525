use serde::{Deserialize, Serialize};

/// Which camera the decoder should prefer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacingModeConfig {
    /// Rear camera.
    #[default]
    Environment,
    /// Front camera.
    User,
}

/// Camera decoding and scan feedback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub facing_mode: FacingModeConfig,
    /// Target decode rate (valid range: 1-60).
    pub fps: u32,
    /// Scan region width in pixels (valid range: 50-2000).
    pub scan_box_width: u32,
    /// Scan region height in pixels (valid range: 50-2000).
    pub scan_box_height: u32,
    /// Viewport aspect ratio (valid range: 0.25-4.0).
    pub aspect_ratio: f64,
    /// Haptic pulse length per successful scan, 0 disables (valid range: 0-2000).
    pub vibrate_ms: u32,
    /// How long the last-scan echo stays highlighted (valid range: 0-10000).
    pub flash_ms: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            facing_mode: FacingModeConfig::Environment,
            fps: 10,
            scan_box_width: 250,
            scan_box_height: 150,
            aspect_ratio: 1.0,
            vibrate_ms: 200,
            flash_ms: 500,
        }
    }
}
