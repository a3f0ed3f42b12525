//! The pairing client: joins a pairing room and forwards every decoded
//! barcode to it.

use std::sync::Arc;

use scanlink_common::{new_correlation_id, PairingCode};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace};

use crate::ports::{BarcodeDecoder, Haptics, ScanChannel, ScannerView};
use crate::types::{
    ConnectionState, DecodeEvent, ScanEvent, ScannerSettings, TransportEvent, BARCODE_SCANNED,
    CAMERA_ERROR_MESSAGE, JOIN_PAIRING,
};

/// Remote scanner bound to one pairing code.
///
/// All state lives in this struct and is only touched from the task that
/// drives [`PairingClient::run`]. The one exception is the highlight
/// reset, which runs on a timer task and only talks to the view.
pub struct PairingClient<C: ScanChannel + ?Sized> {
    id: String,
    code: PairingCode,
    channel: Arc<C>,
    view: Arc<dyn ScannerView>,
    haptics: Option<Arc<dyn Haptics>>,
    settings: ScannerSettings,
    state: ConnectionState,
}

impl<C: ScanChannel + ?Sized> PairingClient<C> {
    /// Activate the client and join the pairing room.
    ///
    /// Returns `None` without touching anything when no channel is
    /// available. Otherwise `join_pairing` is emitted before this returns,
    /// so it precedes every scan.
    pub async fn init(
        channel: Option<Arc<C>>,
        code: PairingCode,
        view: Arc<dyn ScannerView>,
        haptics: Option<Arc<dyn Haptics>>,
        settings: ScannerSettings,
    ) -> Option<Self> {
        let channel = channel?;
        let id = new_correlation_id();

        info!(client = %id, code = %code, "Initializing remote scanner");
        channel
            .emit(JOIN_PAIRING, Value::String(code.as_str().to_string()))
            .await;

        Some(Self {
            id,
            code,
            channel,
            view,
            haptics,
            settings,
            state: ConnectionState::default(),
        })
    }

    pub fn code(&self) -> &PairingCode {
        &self.code
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Reflect a transport lifecycle event on the status indicator.
    pub fn handle_transport(&mut self, event: TransportEvent) {
        self.state = self.state.apply(event);
        debug!(client = %self.id, state = self.state.label(), "Connection state changed");
        self.view.set_status(self.state);
    }

    /// Start the decoder with the configured camera and scan parameters.
    ///
    /// A failure is shown once in place of the viewport and never retried.
    pub async fn start_camera<D>(&self, decoder: &mut D) -> Option<mpsc::Receiver<DecodeEvent>>
    where
        D: BarcodeDecoder + ?Sized,
    {
        match decoder
            .start(self.settings.facing, &self.settings.scan)
            .await
        {
            Ok(decodes) => {
                info!(client = %self.id, fps = self.settings.scan.fps, "Camera started");
                Some(decodes)
            }
            Err(e) => {
                error!(client = %self.id, error = %e, "Error starting scanner");
                self.view.show_camera_error(CAMERA_ERROR_MESSAGE);
                None
            }
        }
    }

    /// Handle one decoder result.
    ///
    /// Every successful decode is forwarded, repeats included. Frames with
    /// nothing readable are dropped.
    pub async fn handle_decode(&mut self, event: DecodeEvent) {
        let text = match event {
            DecodeEvent::Decoded(text) => text,
            DecodeEvent::NotFound(reason) => {
                trace!(client = %self.id, reason = %reason, "No barcode in frame");
                return;
            }
        };

        info!(client = %self.id, barcode = %text, "Scan result");

        let vibrate = self.settings.feedback.vibrate;
        if let Some(haptics) = &self.haptics {
            if !vibrate.is_zero() && !haptics.vibrate(vibrate) {
                debug!(client = %self.id, "Haptic pulse unavailable");
            }
        }

        let scan = ScanEvent::new(&self.code, text.as_str());
        self.channel.emit(BARCODE_SCANNED, scan.to_payload()).await;

        self.view.show_last_scan(&format!("Sent: {text}"));
        self.view.set_scan_highlight(true);

        let view = Arc::clone(&self.view);
        let flash = self.settings.feedback.flash;
        tokio::spawn(async move {
            tokio::time::sleep(flash).await;
            view.set_scan_highlight(false);
        });
    }

    /// Start the camera, then handle transport and decode events as they
    /// arrive until both sources are exhausted.
    pub async fn run<D>(mut self, mut transport: mpsc::Receiver<TransportEvent>, decoder: &mut D)
    where
        D: BarcodeDecoder + ?Sized,
    {
        let mut decodes = self.start_camera(decoder).await;
        let mut transport_open = true;

        loop {
            tokio::select! {
                event = transport.recv(), if transport_open => match event {
                    Some(event) => self.handle_transport(event),
                    None => transport_open = false,
                },
                decoded = next_decode(&mut decodes), if decodes.is_some() => match decoded {
                    Some(decoded) => self.handle_decode(decoded).await,
                    None => {
                        debug!(client = %self.id, "Decoder stopped");
                        decodes = None;
                    }
                },
                else => break,
            }
        }

        info!(client = %self.id, "Remote scanner stopped");
    }
}

async fn next_decode(decodes: &mut Option<mpsc::Receiver<DecodeEvent>>) -> Option<DecodeEvent> {
    match decodes {
        Some(decodes) => decodes.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests;
