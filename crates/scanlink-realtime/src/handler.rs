//! Incoming frame handler: decodes Engine.IO / Socket.IO packets and
//! forwards application events.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::protocol::{connect_error_message, EnginePacket, Handshake, SocketPacket};
use crate::types::RealtimeEvent;

/// What the connection loop should do after a frame was handled.
#[derive(Debug, PartialEq)]
pub(crate) enum FrameOutcome {
    /// Engine.IO session opened; the namespace still has to be joined.
    Opened(Handshake),
    /// Server heartbeat; answer with a pong carrying the same data.
    Ping(String),
    /// Namespace connection acknowledged.
    NamespaceConnected,
    /// Server ended the session; reconnecting is allowed.
    Closed(String),
    /// Server rejected or dropped the namespace; do not reconnect.
    Refused(String),
    Continue,
}

/// Handle a single incoming text frame.
pub(crate) async fn handle_frame(
    text: &str,
    namespace: &str,
    event_tx: &mpsc::Sender<RealtimeEvent>,
) -> FrameOutcome {
    let packet = match EnginePacket::decode(text) {
        Ok(packet) => packet,
        Err(e) => {
            debug!(error = %e, frame = %text, "Unrecognized frame from server");
            return FrameOutcome::Continue;
        }
    };

    match packet {
        EnginePacket::Open(handshake) => {
            debug!(
                sid = %handshake.sid,
                ping_interval = handshake.ping_interval,
                ping_timeout = handshake.ping_timeout,
                "Engine.IO session opened"
            );
            FrameOutcome::Opened(handshake)
        }
        EnginePacket::Ping(data) => FrameOutcome::Ping(data),
        EnginePacket::Close => FrameOutcome::Closed("server closed the transport".into()),
        EnginePacket::Message(body) => handle_socket_packet(&body, namespace, event_tx).await,
        EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => {
            FrameOutcome::Continue
        }
    }
}

async fn handle_socket_packet(
    body: &str,
    namespace: &str,
    event_tx: &mpsc::Sender<RealtimeEvent>,
) -> FrameOutcome {
    let packet = match SocketPacket::decode(body) {
        Ok(packet) => packet,
        Err(e) => {
            debug!(error = %e, body = %body, "Unrecognized Socket.IO packet");
            return FrameOutcome::Continue;
        }
    };

    if packet.namespace() != namespace {
        debug!(namespace = %packet.namespace(), "Packet for another namespace");
        return FrameOutcome::Continue;
    }

    match packet {
        SocketPacket::Connect { .. } => {
            info!(namespace = %namespace, "Namespace connected");
            FrameOutcome::NamespaceConnected
        }
        SocketPacket::Disconnect { .. } => {
            info!(namespace = %namespace, "Server disconnected the namespace");
            FrameOutcome::Refused("server disconnected the namespace".into())
        }
        SocketPacket::Event { name, mut args, .. } => {
            debug!(event = %name, "Event received");
            let payload = if args.is_empty() {
                serde_json::Value::Null
            } else {
                args.swap_remove(0)
            };
            let _ = event_tx.send(RealtimeEvent::Event { name, payload }).await;
            FrameOutcome::Continue
        }
        SocketPacket::Ack { id, .. } => {
            debug!(id, "Unexpected ack");
            FrameOutcome::Continue
        }
        SocketPacket::ConnectError { data, .. } => {
            let message = connect_error_message(data.as_ref());
            warn!(namespace = %namespace, reason = %message, "Namespace connection refused");
            let _ = event_tx
                .send(RealtimeEvent::ConnectError(message.clone()))
                .await;
            FrameOutcome::Refused(message)
        }
    }
}
