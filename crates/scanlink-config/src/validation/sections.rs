//! Per-section validators.

use crate::schema::ScanlinkConfig;

use super::helpers::{validate_range, validate_range_f64, HEX_COLOR_RE, SERVER_URL_RE};

pub(crate) fn validate_server(errors: &mut Vec<String>, config: &ScanlinkConfig) {
    let server = &config.server;
    if !SERVER_URL_RE.is_match(&server.url) {
        errors.push(format!(
            "server.url = {:?} must be an http(s) or ws(s) URL",
            server.url
        ));
    }
    if !server.namespace.starts_with('/') {
        errors.push(format!(
            "server.namespace = {:?} must start with '/'",
            server.namespace
        ));
    }
    if server.path.trim_matches('/').is_empty() {
        errors.push("server.path must not be empty".into());
    }
    validate_range(
        errors,
        "server.connect_timeout_secs",
        server.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "server.reconnect_delay_secs",
        server.reconnect_delay_secs,
        1,
        60,
    );
    validate_range(
        errors,
        "server.max_reconnect_delay_secs",
        server.max_reconnect_delay_secs,
        1,
        600,
    );
    if server.max_reconnect_delay_secs < server.reconnect_delay_secs {
        errors.push(format!(
            "server.max_reconnect_delay_secs = {} is below server.reconnect_delay_secs = {}",
            server.max_reconnect_delay_secs, server.reconnect_delay_secs
        ));
    }
}

pub(crate) fn validate_scanner(errors: &mut Vec<String>, config: &ScanlinkConfig) {
    let scanner = &config.scanner;
    validate_range(errors, "scanner.fps", scanner.fps, 1, 60);
    validate_range(errors, "scanner.scan_box_width", scanner.scan_box_width, 50, 2000);
    validate_range(errors, "scanner.scan_box_height", scanner.scan_box_height, 50, 2000);
    validate_range_f64(errors, "scanner.aspect_ratio", scanner.aspect_ratio, 0.25, 4.0);
    validate_range(errors, "scanner.vibrate_ms", scanner.vibrate_ms, 0, 2000);
    validate_range(errors, "scanner.flash_ms", scanner.flash_ms, 0, 10000);
}

pub(crate) fn validate_notifications(errors: &mut Vec<String>, config: &ScanlinkConfig) {
    validate_range(
        errors,
        "notifications.dismiss_after_ms",
        config.notifications.dismiss_after_ms,
        500,
        60000,
    );
    validate_range(
        errors,
        "notifications.capacity",
        config.notifications.capacity,
        1,
        64,
    );
}

pub(crate) fn validate_signature(errors: &mut Vec<String>, config: &ScanlinkConfig) {
    let signature = &config.signature;
    validate_range(errors, "signature.height", signature.height, 50, 1000);
    validate_range_f64(errors, "signature.line_width", signature.line_width, 0.5, 20.0);
    if !HEX_COLOR_RE.is_match(&signature.stroke_color) {
        errors.push(format!(
            "signature.stroke_color = {:?} is not a hex color",
            signature.stroke_color
        ));
    }
}
