//! Collaborator traits the pairing client is wired to.
//!
//! The client owns no I/O of its own: it emits through a [`ScanChannel`],
//! reads frames through a [`BarcodeDecoder`], renders through a
//! [`ScannerView`] and pulses an optional [`Haptics`] device.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::types::{ConnectionState, DecodeEvent, FacingMode, ScanConfig};

/// Why the camera (or whatever stands in for it) could not start.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no camera available: {0}")]
    Unavailable(String),

    #[error("camera I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound side of the real-time channel.
///
/// Emission is fire-and-forget: delivery failures are not reported back.
#[async_trait]
pub trait ScanChannel: Send + Sync {
    async fn emit(&self, event: &str, payload: Value);
}

/// Source of decoded barcodes.
#[async_trait]
pub trait BarcodeDecoder: Send {
    /// Open the camera and begin decoding. The returned stream ends when
    /// the camera stops.
    async fn start(
        &mut self,
        facing: FacingMode,
        config: &ScanConfig,
    ) -> Result<mpsc::Receiver<DecodeEvent>, CameraError>;
}

/// Scanner page surface.
pub trait ScannerView: Send + Sync {
    fn set_status(&self, state: ConnectionState);
    fn show_last_scan(&self, text: &str);
    fn set_scan_highlight(&self, on: bool);
    fn show_camera_error(&self, message: &str);
}

/// Vibration motor. Returns `false` when the pulse could not be played.
pub trait Haptics: Send + Sync {
    fn vibrate(&self, duration: Duration) -> bool;
}
