//! Public handle for interacting with the Socket.IO connection.

use std::sync::Arc;

use tokio::sync::{mpsc, watch, RwLock};

use super::connection::connection_loop;
use super::types::{OutboundEvent, RealtimeConfig, RealtimeEvent};

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Handle for interacting with the Socket.IO connection.
///
/// All methods are non-blocking and hand work to the background
/// connection task.
pub struct RealtimeClient {
    command_tx: mpsc::UnboundedSender<OutboundEvent>,
    shutdown_tx: Arc<watch::Sender<bool>>,
    connected: Arc<RwLock<bool>>,
}

impl RealtimeClient {
    /// Create a new client and start the background connection.
    /// Returns `(client, event_receiver)`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(config: RealtimeConfig) -> (Self, mpsc::Receiver<RealtimeEvent>) {
        let (event_tx, event_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let connected = Arc::new(RwLock::new(false));

        let client = Self {
            command_tx,
            shutdown_tx: Arc::new(shutdown_tx),
            connected: Arc::clone(&connected),
        };

        tokio::spawn(connection_loop(
            config,
            connected,
            event_tx,
            command_rx,
            shutdown_rx,
        ));

        (client, event_rx)
    }

    /// Clone the handle so another task can emit on the same connection.
    pub fn clone_sender(&self) -> Self {
        Self {
            command_tx: self.command_tx.clone(),
            shutdown_tx: Arc::clone(&self.shutdown_tx),
            connected: Arc::clone(&self.connected),
        }
    }

    /// Queue a named event for the server. No acknowledgement is requested.
    ///
    /// Never waits: while the namespace is not connected the event is
    /// buffered without limit and goes out, in order, after the next
    /// successful connect.
    pub async fn emit(&self, event: &str, payload: serde_json::Value) {
        let queued = self.command_tx.send(OutboundEvent {
            event: event.to_string(),
            payload,
        });
        if queued.is_err() {
            tracing::debug!(event, "Realtime client stopped, event dropped");
        }
    }

    /// Check if the namespace is currently connected.
    pub async fn is_connected(&self) -> bool {
        *self.connected.read().await
    }

    /// Close the connection and stop reconnecting. Events already queued
    /// are flushed first when the namespace is connected.
    pub fn disconnect(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
