use serde::{Deserialize, Serialize};

/// Real-time server the scanner pairs through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the server (`http`, `https`, `ws` or `wss`).
    pub url: String,
    /// Socket.IO namespace to connect to.
    pub namespace: String,
    /// Mount path of the Socket.IO endpoint.
    pub path: String,
    /// Seconds to wait for the WebSocket handshake (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Base reconnect delay in seconds (valid range: 1-60).
    pub reconnect_delay_secs: u32,
    /// Cap on the reconnect delay in seconds (valid range: 1-600).
    pub max_reconnect_delay_secs: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".into(),
            namespace: "/".into(),
            path: "socket.io".into(),
            connect_timeout_secs: 15,
            reconnect_delay_secs: 1,
            max_reconnect_delay_secs: 30,
        }
    }
}
