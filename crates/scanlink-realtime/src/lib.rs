//! Thin Socket.IO client over the Engine.IO v4 WebSocket transport.
//!
//! Provides a reusable event channel using `tokio-tungstenite`: namespace
//! connect, server-driven ping/pong, named event emission, inbound event
//! delivery, and auto-reconnect with backoff. Outbound events issued
//! while the namespace is not connected stay queued and are flushed, in
//! order, once it is.

mod client;
mod connection;
mod handler;
pub mod protocol;
mod types;

pub use client::RealtimeClient;
pub use protocol::{EnginePacket, Handshake, ProtocolError, SocketPacket};
pub use types::{RealtimeConfig, RealtimeEvent};
