//! Glue between the realtime transport and the pairing client.

use async_trait::async_trait;
use scanlink_realtime::{RealtimeClient, RealtimeEvent};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::ScanChannel;
use crate::types::TransportEvent;

#[async_trait]
impl ScanChannel for RealtimeClient {
    async fn emit(&self, event: &str, payload: Value) {
        RealtimeClient::emit(self, event, payload).await;
    }
}

/// Map a realtime event onto the pairing client's lifecycle events.
///
/// Application events from the server (e.g. item lookups addressed to the
/// checkout page) are not for the scanner and map to `None`.
pub fn transport_event(event: &RealtimeEvent) -> Option<TransportEvent> {
    match event {
        RealtimeEvent::Connected => Some(TransportEvent::Connect),
        RealtimeEvent::Disconnected => Some(TransportEvent::Disconnect),
        RealtimeEvent::Event { name, .. } => {
            debug!(event = %name, "Ignoring server event");
            None
        }
        RealtimeEvent::ConnectError(reason) => {
            warn!(reason = %reason, "Server refused the connection");
            None
        }
        RealtimeEvent::Error(reason) => {
            warn!(reason = %reason, "Transport error");
            None
        }
    }
}

/// Spawn a task translating realtime events into transport events.
///
/// Every realtime event is also passed to `observer`, which the binary
/// uses for banners. The returned stream ends, and the task finishes,
/// once the realtime client has stopped.
pub fn translate_transport_events<F>(
    mut events: mpsc::Receiver<RealtimeEvent>,
    mut observer: F,
) -> (mpsc::Receiver<TransportEvent>, JoinHandle<()>)
where
    F: FnMut(&RealtimeEvent) + Send + 'static,
{
    let (tx, rx) = mpsc::channel(64);
    let task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            observer(&event);
            if let Some(mapped) = transport_event(&event) {
                if tx.send(mapped).await.is_err() {
                    break;
                }
            }
        }
    });
    (rx, task)
}
