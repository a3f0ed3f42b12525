//! Background WebSocket connection loop with auto-reconnect.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::{mpsc, watch, RwLock};
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info, warn};

use super::handler::{handle_frame, FrameOutcome};
use super::protocol::{EnginePacket, SocketPacket};
use super::types::{OutboundEvent, RealtimeConfig, RealtimeEvent};

/// How a single WebSocket session ended.
#[derive(Debug, PartialEq)]
enum SessionEnd {
    /// Lost the transport; reconnect after backoff.
    Lost(String),
    /// Shut down locally or refused by the server; stop for good.
    Stopped,
}

// ---------------------------------------------------------------------------
// Connection Loop
// ---------------------------------------------------------------------------

/// Background task managing the WebSocket connection with auto-reconnect.
pub(crate) async fn connection_loop(
    config: RealtimeConfig,
    connected: Arc<RwLock<bool>>,
    event_tx: mpsc::Sender<RealtimeEvent>,
    mut command_rx: mpsc::UnboundedReceiver<OutboundEvent>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let url = match config.ws_url() {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "Invalid server URL, realtime client not started");
            let _ = event_tx.send(RealtimeEvent::Error(e.to_string())).await;
            return;
        }
    };
    let base_delay = config.reconnect_delay_secs.max(1);
    let mut reconnect_delay = base_delay;

    loop {
        if *shutdown_rx.borrow() {
            return;
        }

        info!(url = %url.split('?').next().unwrap_or(""), "Connecting to Socket.IO server");

        let attempt = tokio::time::timeout(
            Duration::from_secs(config.connect_timeout_secs),
            tokio_tungstenite::connect_async(url.as_str()),
        );
        let result = tokio::select! {
            result = attempt => result,
            _ = shutdown_rx.changed() => return,
        };

        match result {
            Ok(Ok((ws_stream, _))) => {
                reconnect_delay = base_delay;
                let (ws_write, ws_read) = ws_stream.split();
                let end = run_session(
                    ws_write,
                    ws_read,
                    &config,
                    &connected,
                    &event_tx,
                    &mut command_rx,
                    &mut shutdown_rx,
                )
                .await;

                match end {
                    SessionEnd::Stopped => {
                        info!("Realtime client stopped");
                        return;
                    }
                    SessionEnd::Lost(reason) => {
                        warn!(reason = %reason, "Connection lost");
                    }
                }
            }
            Ok(Err(e)) => {
                error!(error = %e, "Failed to connect to Socket.IO server");
                let _ = event_tx
                    .send(RealtimeEvent::Error(format!("Connection failed: {e}")))
                    .await;
            }
            Err(_elapsed) => {
                error!(
                    "WebSocket connection timed out after {}s",
                    config.connect_timeout_secs
                );
                let _ = event_tx
                    .send(RealtimeEvent::Error(format!(
                        "Connection timed out after {}s",
                        config.connect_timeout_secs
                    )))
                    .await;
            }
        }

        // Exponential backoff reconnect.
        info!(
            delay = reconnect_delay,
            "Reconnecting in {} seconds", reconnect_delay
        );
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(reconnect_delay)) => {}
            _ = shutdown_rx.changed() => return,
        }
        reconnect_delay = (reconnect_delay * 2).min(config.max_reconnect_delay_secs.max(base_delay));
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Drive one WebSocket session: Engine.IO handshake, namespace connect,
/// heartbeat replies, then event forwarding in both directions.
///
/// Outbound events are only pulled from the queue once the namespace is
/// connected, so anything emitted earlier waits in the queue and keeps
/// its order.
async fn run_session<W, R, E>(
    mut ws_write: W,
    mut ws_read: R,
    config: &RealtimeConfig,
    connected: &Arc<RwLock<bool>>,
    event_tx: &mpsc::Sender<RealtimeEvent>,
    command_rx: &mut mpsc::UnboundedReceiver<OutboundEvent>,
    shutdown_rx: &mut watch::Receiver<bool>,
) -> SessionEnd
where
    W: Sink<WsMessage> + Unpin,
    W::Error: std::fmt::Display,
    R: futures_util::Stream<Item = Result<WsMessage, E>> + Unpin,
    E: std::fmt::Display,
{
    let namespace = config.namespace.as_str();
    let mut namespace_connected = false;
    let mut ping_window: Option<Duration> = None;
    let mut ping_deadline: Option<Instant> = None;

    let end = loop {
        tokio::select! {
            frame = ws_read.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    match handle_frame(text.as_str(), namespace, event_tx).await {
                        FrameOutcome::Opened(handshake) => {
                            let window = Duration::from_millis(
                                handshake.ping_interval + handshake.ping_timeout,
                            );
                            ping_window = Some(window);
                            ping_deadline = Some(Instant::now() + window);
                            let connect = EnginePacket::Message(SocketPacket::connect(namespace).encode());
                            if let Err(e) = send_packet(&mut ws_write, &connect).await {
                                break SessionEnd::Lost(format!("namespace connect failed: {e}"));
                            }
                        }
                        FrameOutcome::Ping(data) => {
                            if let Some(window) = ping_window {
                                ping_deadline = Some(Instant::now() + window);
                            }
                            if let Err(e) = send_packet(&mut ws_write, &EnginePacket::Pong(data)).await {
                                break SessionEnd::Lost(format!("pong failed: {e}"));
                            }
                        }
                        FrameOutcome::NamespaceConnected => {
                            if !namespace_connected {
                                namespace_connected = true;
                                *connected.write().await = true;
                                let _ = event_tx.send(RealtimeEvent::Connected).await;
                            }
                        }
                        FrameOutcome::Closed(reason) => break SessionEnd::Lost(reason),
                        FrameOutcome::Refused(reason) => {
                            info!(reason = %reason, "Not reconnecting");
                            let _ = ws_write.send(WsMessage::Close(None)).await;
                            break SessionEnd::Stopped;
                        }
                        FrameOutcome::Continue => {}
                    }
                }
                Some(Ok(WsMessage::Close(_))) | None => {
                    break SessionEnd::Lost("server closed connection".into());
                }
                Some(Err(e)) => break SessionEnd::Lost(format!("WebSocket error: {e}")),
                Some(Ok(_)) => {}
            },

            outbound = command_rx.recv(), if namespace_connected => match outbound {
                Some(outbound) => {
                    if let Err(e) = send_event(&mut ws_write, namespace, outbound).await {
                        break SessionEnd::Lost(format!("emit failed: {e}"));
                    }
                }
                None => {
                    debug!("All client handles dropped, closing");
                    close_gracefully(&mut ws_write, namespace, true).await;
                    break SessionEnd::Stopped;
                }
            },

            _ = ping_expired(ping_deadline) => {
                break SessionEnd::Lost("ping timeout".into());
            }

            _ = shutdown_rx.changed() => {
                if namespace_connected {
                    // Flush whatever the application already queued.
                    while let Ok(outbound) = command_rx.try_recv() {
                        if send_event(&mut ws_write, namespace, outbound).await.is_err() {
                            break;
                        }
                    }
                }
                close_gracefully(&mut ws_write, namespace, namespace_connected).await;
                break SessionEnd::Stopped;
            }
        }
    };

    if namespace_connected {
        *connected.write().await = false;
        let _ = event_tx.send(RealtimeEvent::Disconnected).await;
    }
    end
}

async fn ping_expired(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

async fn send_packet<W>(ws_write: &mut W, packet: &EnginePacket) -> Result<(), W::Error>
where
    W: Sink<WsMessage> + Unpin,
{
    ws_write.send(WsMessage::Text(packet.encode().into())).await
}

async fn send_event<W>(ws_write: &mut W, namespace: &str, outbound: OutboundEvent) -> Result<(), W::Error>
where
    W: Sink<WsMessage> + Unpin,
{
    debug!(event = %outbound.event, "Emitting event");
    let packet = SocketPacket::event(namespace, &outbound.event, outbound.payload);
    send_packet(ws_write, &EnginePacket::Message(packet.encode())).await
}

async fn close_gracefully<W>(ws_write: &mut W, namespace: &str, leave_namespace: bool)
where
    W: Sink<WsMessage> + Unpin,
{
    if leave_namespace {
        let leave = EnginePacket::Message(SocketPacket::disconnect(namespace).encode());
        let _ = send_packet(ws_write, &leave).await;
    }
    let _ = ws_write.send(WsMessage::Close(None)).await;
}
