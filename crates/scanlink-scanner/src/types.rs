//! Pairing-client data types: connection state, decode results, the
//! scan payload and scanner/feedback settings.

use std::time::Duration;

use scanlink_common::PairingCode;
use serde::Serialize;

/// Event sent once on startup to join the pairing room.
pub const JOIN_PAIRING: &str = "join_pairing";
/// Event sent for every decoded barcode.
pub const BARCODE_SCANNED: &str = "barcode_scanned";
/// Message shown in place of the camera viewport when it cannot start.
pub const CAMERA_ERROR_MESSAGE: &str = "Camera access denied or error.";

// ---------------------------------------------------------------------------
// Connection State
// ---------------------------------------------------------------------------

/// Transport lifecycle notifications consumed by the pairing client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    Connect,
    Disconnect,
}

/// Visual style of the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    Success,
    Danger,
}

impl StatusStyle {
    /// Badge class used by the web scanner page.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "badge bg-success",
            Self::Danger => "badge bg-danger",
        }
    }
}

/// Connection state as shown to the user.
///
/// Only transport events move it; the last event always wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionState {
    pub fn apply(self, event: TransportEvent) -> Self {
        match event {
            TransportEvent::Connect => Self::Connected,
            TransportEvent::Disconnect => Self::Disconnected,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Connected => "Connected to Server",
            Self::Disconnected => "Disconnected",
        }
    }

    pub fn style(&self) -> StatusStyle {
        match self {
            Self::Connected => StatusStyle::Success,
            Self::Disconnected => StatusStyle::Danger,
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// One result from the barcode decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// A barcode was read; carries the decoded text.
    Decoded(String),
    /// Nothing readable in this frame.
    NotFound(String),
}

/// Which camera to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FacingMode {
    #[default]
    Environment,
    User,
}

/// Region of the frame the decoder scans, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanBox {
    pub width: u32,
    pub height: u32,
}

/// Decoder parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Frames examined per second.
    pub fps: u32,
    pub scan_box: ScanBox,
    pub aspect_ratio: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fps: 10,
            scan_box: ScanBox {
                width: 250,
                height: 150,
            },
            aspect_ratio: 1.0,
        }
    }
}

/// Feedback given after each successful scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackConfig {
    /// Haptic pulse length; zero disables the pulse.
    pub vibrate: Duration,
    /// How long the success highlight stays on.
    pub flash: Duration,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            vibrate: Duration::from_millis(200),
            flash: Duration::from_millis(500),
        }
    }
}

/// Everything the pairing client needs besides its collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScannerSettings {
    pub facing: FacingMode,
    pub scan: ScanConfig,
    pub feedback: FeedbackConfig,
}

// ---------------------------------------------------------------------------
// Outbound Payload
// ---------------------------------------------------------------------------

/// Payload of a `barcode_scanned` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEvent {
    pub code: PairingCode,
    pub barcode: String,
}

impl ScanEvent {
    pub fn new(code: &PairingCode, barcode: impl Into<String>) -> Self {
        Self {
            code: code.clone(),
            barcode: barcode.into(),
        }
    }

    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code.as_str(),
            "barcode": self.barcode,
        })
    }
}
