//! Configuration, event and outbound message types for the realtime client.

use crate::protocol::{ProtocolError, DEFAULT_NAMESPACE};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for connecting to a Socket.IO server.
#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    /// Base server URL, e.g. `http://localhost:5000`.
    pub server_url: String,
    /// Namespace to connect to (default `/`).
    pub namespace: String,
    /// Endpoint mount path (default `socket.io`).
    pub path: String,
    /// WebSocket handshake timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Reconnect base delay in seconds.
    pub reconnect_delay_secs: u64,
    /// Maximum reconnect delay in seconds.
    pub max_reconnect_delay_secs: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: "socket.io".to_string(),
            connect_timeout_secs: 15,
            reconnect_delay_secs: 1,
            max_reconnect_delay_secs: 30,
        }
    }
}

impl RealtimeConfig {
    /// Build the Engine.IO WebSocket URL for this server.
    pub fn ws_url(&self) -> Result<String, ProtocolError> {
        let base = self.server_url.trim().trim_end_matches('/');
        let (scheme, rest) = base
            .split_once("://")
            .ok_or_else(|| ProtocolError::InvalidUrl(format!("missing scheme in {base:?}")))?;

        let ws_scheme = match scheme.to_ascii_lowercase().as_str() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => {
                return Err(ProtocolError::InvalidUrl(format!(
                    "unsupported scheme {other:?}"
                )))
            }
        };
        if rest.is_empty() {
            return Err(ProtocolError::InvalidUrl(format!("missing host in {base:?}")));
        }

        let path = self.path.trim_matches('/');
        Ok(format!(
            "{ws_scheme}://{rest}/{path}/?EIO=4&transport=websocket"
        ))
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events emitted by the realtime client.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    /// Namespace connection acknowledged by the server.
    Connected,
    /// Transport closed or the server dropped the namespace.
    Disconnected,
    /// A named application event from the server (first argument only).
    Event {
        name: String,
        payload: serde_json::Value,
    },
    /// The server refused the namespace connection.
    ConnectError(String),
    /// Transport-level failure (connect failed, timed out, bad frame).
    Error(String),
}

/// An event queued by the application for delivery to the server.
#[derive(Debug)]
pub(crate) struct OutboundEvent {
    pub(crate) event: String,
    pub(crate) payload: serde_json::Value,
}
