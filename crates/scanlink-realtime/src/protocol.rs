//! Engine.IO v4 and Socket.IO v5 packet codec (text frames only).
//!
//! Engine.IO frames are `<type><data>`. A Socket.IO packet rides inside an
//! Engine.IO `message` (type `4`) as
//! `<type>[<namespace>,][<ack id>][<json>]`, so a default-namespace event
//! looks like `42["name",{"k":"v"}]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The default Socket.IO namespace.
pub const DEFAULT_NAMESPACE: &str = "/";

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    #[error("malformed packet: {0}")]
    Malformed(String),

    #[error("unsupported packet: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Engine.IO
// ---------------------------------------------------------------------------

/// Handshake payload carried by the Engine.IO `open` packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    /// Milliseconds between server pings.
    pub ping_interval: u64,
    /// Milliseconds the server waits for a pong.
    pub ping_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        let mut chars = frame.chars();
        let kind = chars
            .next()
            .ok_or_else(|| ProtocolError::Malformed("empty engine packet".into()))?;
        let rest = chars.as_str();

        match kind {
            '0' => Ok(EnginePacket::Open(serde_json::from_str(rest)?)),
            '1' => Ok(EnginePacket::Close),
            '2' => Ok(EnginePacket::Ping(rest.to_string())),
            '3' => Ok(EnginePacket::Pong(rest.to_string())),
            '4' => Ok(EnginePacket::Message(rest.to_string())),
            '5' => Ok(EnginePacket::Upgrade),
            '6' => Ok(EnginePacket::Noop),
            other => Err(ProtocolError::Malformed(format!(
                "unknown engine packet type {other:?}"
            ))),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            EnginePacket::Open(handshake) => match serde_json::to_string(handshake) {
                Ok(json) => format!("0{json}"),
                Err(_) => "0{}".to_string(),
            },
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(data) => format!("2{data}"),
            EnginePacket::Pong(data) => format!("3{data}"),
            EnginePacket::Message(data) => format!("4{data}"),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Socket.IO
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        data: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        id: Option<u64>,
        name: String,
        args: Vec<Value>,
    },
    Ack {
        namespace: String,
        id: u64,
        args: Vec<Value>,
    },
    ConnectError {
        namespace: String,
        data: Option<Value>,
    },
}

impl SocketPacket {
    /// A fire-and-forget event with a single argument.
    pub fn event(namespace: &str, name: &str, payload: Value) -> Self {
        SocketPacket::Event {
            namespace: namespace.to_string(),
            id: None,
            name: name.to_string(),
            args: vec![payload],
        }
    }

    pub fn connect(namespace: &str) -> Self {
        SocketPacket::Connect {
            namespace: namespace.to_string(),
            data: None,
        }
    }

    pub fn disconnect(namespace: &str) -> Self {
        SocketPacket::Disconnect {
            namespace: namespace.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            SocketPacket::Connect { namespace, .. }
            | SocketPacket::Disconnect { namespace }
            | SocketPacket::Event { namespace, .. }
            | SocketPacket::Ack { namespace, .. }
            | SocketPacket::ConnectError { namespace, .. } => namespace,
        }
    }

    /// Encode as the body of an Engine.IO message (without the leading `4`).
    pub fn encode(&self) -> String {
        let (kind, id, data) = match self {
            SocketPacket::Connect { data, .. } => ('0', None, data.clone()),
            SocketPacket::Disconnect { .. } => ('1', None, None),
            SocketPacket::Event { id, name, args, .. } => {
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(Value::String(name.clone()));
                items.extend(args.iter().cloned());
                ('2', *id, Some(Value::Array(items)))
            }
            SocketPacket::Ack { id, args, .. } => ('3', Some(*id), Some(Value::Array(args.clone()))),
            SocketPacket::ConnectError { data, .. } => ('4', None, data.clone()),
        };

        let mut out = String::new();
        out.push(kind);
        let namespace = self.namespace();
        if namespace != DEFAULT_NAMESPACE {
            out.push_str(namespace);
            out.push(',');
        }
        if let Some(id) = id {
            out.push_str(&id.to_string());
        }
        if let Some(data) = data {
            out.push_str(&data.to_string());
        }
        out
    }

    /// Decode the body of an Engine.IO message.
    pub fn decode(body: &str) -> Result<Self, ProtocolError> {
        let mut chars = body.chars();
        let kind = chars
            .next()
            .ok_or_else(|| ProtocolError::Malformed("empty socket packet".into()))?;
        let mut rest = chars.as_str();

        if matches!(kind, '5' | '6') {
            return Err(ProtocolError::Unsupported("binary packets".into()));
        }

        let mut namespace = DEFAULT_NAMESPACE.to_string();
        if rest.starts_with('/') {
            match rest.find(',') {
                Some(idx) => {
                    namespace = rest[..idx].to_string();
                    rest = &rest[idx + 1..];
                }
                None => {
                    namespace = rest.to_string();
                    rest = "";
                }
            }
        }

        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        let id = if digits > 0 {
            let parsed = rest[..digits]
                .parse::<u64>()
                .map_err(|e| ProtocolError::Malformed(format!("bad ack id: {e}")))?;
            rest = &rest[digits..];
            Some(parsed)
        } else {
            None
        };

        let data: Option<Value> = if rest.is_empty() {
            None
        } else {
            Some(serde_json::from_str(rest)?)
        };

        match kind {
            '0' => Ok(SocketPacket::Connect { namespace, data }),
            '1' => Ok(SocketPacket::Disconnect { namespace }),
            '2' => {
                let mut items = match data {
                    Some(Value::Array(items)) => items,
                    _ => return Err(ProtocolError::Malformed("event without array body".into())),
                };
                if items.is_empty() {
                    return Err(ProtocolError::Malformed("event without a name".into()));
                }
                let name = match items.remove(0) {
                    Value::String(name) => name,
                    other => {
                        return Err(ProtocolError::Malformed(format!(
                            "event name is not a string: {other}"
                        )))
                    }
                };
                Ok(SocketPacket::Event {
                    namespace,
                    id,
                    name,
                    args: items,
                })
            }
            '3' => {
                let id = id.ok_or_else(|| ProtocolError::Malformed("ack without id".into()))?;
                let args = match data {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                Ok(SocketPacket::Ack {
                    namespace,
                    id,
                    args,
                })
            }
            '4' => Ok(SocketPacket::ConnectError { namespace, data }),
            other => Err(ProtocolError::Malformed(format!(
                "unknown socket packet type {other:?}"
            ))),
        }
    }
}

/// Human-readable reason from a CONNECT_ERROR payload.
pub(crate) fn connect_error_message(data: Option<&Value>) -> String {
    match data {
        Some(Value::String(s)) => s.clone(),
        Some(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("connection refused")
            .to_string(),
        None => "connection refused".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_open_handshake() {
        let frame = r#"0{"sid":"lv_VI97HAXpY6yYWAAAC","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
        match EnginePacket::decode(frame).unwrap() {
            EnginePacket::Open(h) => {
                assert_eq!(h.sid, "lv_VI97HAXpY6yYWAAAC");
                assert_eq!(h.ping_interval, 25000);
                assert_eq!(h.ping_timeout, 20000);
                assert_eq!(h.max_payload, Some(1_000_000));
            }
            other => panic!("expected open, got {other:?}"),
        }
    }

    #[test]
    fn decodes_ping_and_encodes_pong() {
        assert_eq!(EnginePacket::decode("2").unwrap(), EnginePacket::Ping(String::new()));
        assert_eq!(EnginePacket::Pong(String::new()).encode(), "3");
        assert_eq!(EnginePacket::Pong("probe".into()).encode(), "3probe");
    }

    #[test]
    fn rejects_unknown_engine_type() {
        assert!(EnginePacket::decode("9").is_err());
        assert!(EnginePacket::decode("").is_err());
    }

    #[test]
    fn encodes_default_namespace_connect() {
        let frame = EnginePacket::Message(SocketPacket::connect("/").encode()).encode();
        assert_eq!(frame, "40");
    }

    #[test]
    fn encodes_custom_namespace_connect() {
        assert_eq!(SocketPacket::connect("/scanner").encode(), "0/scanner,");
        assert_eq!(SocketPacket::disconnect("/scanner").encode(), "1/scanner,");
    }

    #[test]
    fn encodes_join_pairing_event() {
        let packet = SocketPacket::event("/", "join_pairing", json!("ABC123"));
        assert_eq!(packet.encode(), r#"2["join_pairing","ABC123"]"#);
    }

    #[test]
    fn encodes_barcode_scanned_event() {
        let packet = SocketPacket::event(
            "/",
            "barcode_scanned",
            json!({ "code": "ABC123", "barcode": "0192837465" }),
        );
        let frame = EnginePacket::Message(packet.encode()).encode();
        assert!(frame.starts_with(r#"42["barcode_scanned","#));
        let body: Value = serde_json::from_str(&frame[2..]).unwrap();
        assert_eq!(
            body,
            json!(["barcode_scanned", { "code": "ABC123", "barcode": "0192837465" }])
        );
    }

    #[test]
    fn decodes_connect_ack_with_sid() {
        let packet = SocketPacket::decode(r#"0{"sid":"wZX3oN0bSVIhsaknAAAI"}"#).unwrap();
        assert_eq!(
            packet,
            SocketPacket::Connect {
                namespace: "/".into(),
                data: Some(json!({ "sid": "wZX3oN0bSVIhsaknAAAI" })),
            }
        );
    }

    #[test]
    fn decodes_namespaced_event_with_ack_id() {
        let packet = SocketPacket::decode(r#"2/checkout,12["item_details",{"found":false}]"#).unwrap();
        assert_eq!(
            packet,
            SocketPacket::Event {
                namespace: "/checkout".into(),
                id: Some(12),
                name: "item_details".into(),
                args: vec![json!({ "found": false })],
            }
        );
    }

    #[test]
    fn decodes_namespace_disconnect_without_comma() {
        let packet = SocketPacket::decode("1/checkout").unwrap();
        assert_eq!(packet, SocketPacket::disconnect("/checkout"));
    }

    #[test]
    fn decodes_connect_error_message() {
        let packet = SocketPacket::decode(r#"4{"message":"Not authorized"}"#).unwrap();
        match packet {
            SocketPacket::ConnectError { data, .. } => {
                assert_eq!(connect_error_message(data.as_ref()), "Not authorized");
            }
            other => panic!("expected connect error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_binary_and_nameless_events() {
        assert!(matches!(
            SocketPacket::decode(r#"51-["upload",{"_placeholder":true,"num":0}]"#),
            Err(ProtocolError::Unsupported(_))
        ));
        assert!(SocketPacket::decode("2[]").is_err());
        assert!(SocketPacket::decode("2[42]").is_err());
        assert!(SocketPacket::decode(r#"2{"a":1}"#).is_err());
    }
}
