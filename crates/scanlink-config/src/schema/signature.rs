use serde::{Deserialize, Serialize};

/// Signature pad canvas and pen settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Canvas height in pixels (valid range: 50-1000).
    pub height: u32,
    /// Pen width in pixels (valid range: 0.5-20.0).
    pub line_width: f64,
    /// Pen color as `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    pub stroke_color: String,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            height: 150,
            line_width: 2.0,
            stroke_color: "#000".into(),
        }
    }
}
