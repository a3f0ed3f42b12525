//! Remote barcode scanner client.
//!
//! Joins a pairing room on a real-time channel, mirrors the transport's
//! connection state onto a status indicator, and forwards every decoded
//! barcode to the paired checkout session. Camera decoding, the UI and
//! the transport are injected through the traits in [`ports`], so the
//! pairing logic runs the same against a live server or test doubles.

pub mod channel;
pub mod client;
pub mod ports;
pub mod types;

pub use channel::{transport_event, translate_transport_events};
pub use client::PairingClient;
pub use ports::{BarcodeDecoder, CameraError, Haptics, ScanChannel, ScannerView};
pub use types::{
    ConnectionState, DecodeEvent, FacingMode, FeedbackConfig, ScanBox, ScanConfig, ScanEvent,
    ScannerSettings, StatusStyle, TransportEvent, BARCODE_SCANNED, CAMERA_ERROR_MESSAGE,
    JOIN_PAIRING,
};
