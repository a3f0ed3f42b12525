//! Conversions from the loaded config into runtime settings.

use std::time::Duration;

use scanlink_config::schema::{FacingModeConfig, ScannerConfig, ServerConfig, SignatureConfig};
use scanlink_config::ScanlinkConfig;
use scanlink_realtime::RealtimeConfig;
use scanlink_scanner::{FacingMode, FeedbackConfig, ScanBox, ScanConfig, ScannerSettings};
use scanlink_signature::{SignatureError, StrokeStyle};

pub fn realtime_config(server: &ServerConfig, url_override: Option<&str>) -> RealtimeConfig {
    RealtimeConfig {
        server_url: url_override.unwrap_or(&server.url).to_string(),
        namespace: server.namespace.clone(),
        path: server.path.clone(),
        connect_timeout_secs: server.connect_timeout_secs.into(),
        reconnect_delay_secs: server.reconnect_delay_secs.into(),
        max_reconnect_delay_secs: server.max_reconnect_delay_secs.into(),
    }
}

pub fn scanner_settings(scanner: &ScannerConfig) -> ScannerSettings {
    ScannerSettings {
        facing: match scanner.facing_mode {
            FacingModeConfig::Environment => FacingMode::Environment,
            FacingModeConfig::User => FacingMode::User,
        },
        scan: ScanConfig {
            fps: scanner.fps,
            scan_box: ScanBox {
                width: scanner.scan_box_width,
                height: scanner.scan_box_height,
            },
            aspect_ratio: scanner.aspect_ratio,
        },
        feedback: FeedbackConfig {
            vibrate: Duration::from_millis(scanner.vibrate_ms.into()),
            flash: Duration::from_millis(scanner.flash_ms.into()),
        },
    }
}

pub fn stroke_style(signature: &SignatureConfig) -> Result<StrokeStyle, SignatureError> {
    StrokeStyle::from_hex(signature.line_width, &signature.stroke_color)
}

pub fn banner_dismiss_after(config: &ScanlinkConfig) -> Duration {
    Duration::from_millis(config.notifications.dismiss_after_ms.into())
}
