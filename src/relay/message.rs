//! Signaling message types
//!
//! The relay is payload-agnostic: a signaling message is an opaque JSON
//! object (offer, answer, ICE candidate, anything else the peers agree
//! on). Structure is only imposed at the decode/encode edge, never
//! inside the relay.

use serde_json::{Map, Value};

/// An opaque signaling payload: a JSON object whose fields the relay
/// never interprets.
pub type SignalPayload = Map<String, Value>;

/// An inbound message tagged with its routing metadata.
///
/// Exists only transiently between receipt on one connection and
/// fan-out to the rest of the room; nothing is persisted.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// The room the payload is addressed to
    pub room_id: String,
    /// Connection id of the originating peer, excluded from delivery
    pub sender_id: String,
    /// The uninterpreted payload
    pub payload: SignalPayload,
}

impl Envelope {
    pub fn new(
        room_id: impl Into<String>,
        sender_id: impl Into<String>,
        payload: SignalPayload,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            sender_id: sender_id.into(),
            payload,
        }
    }
}

/// Decode a text frame into a payload.
///
/// Any valid JSON object is accepted; anything else (arrays, scalars,
/// malformed input) is rejected and terminates the offending
/// connection upstream.
pub fn decode_payload(text: &str) -> crate::error::Result<SignalPayload> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(crate::error::SignalHubError::bad_request(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Encode a payload back into frame text.
pub fn encode_payload(payload: &SignalPayload) -> crate::error::Result<String> {
    Ok(serde_json::to_string(payload)?)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_object() {
        let payload = decode_payload(r#"{"type":"offer","sdp":"v=0..."}"#).unwrap();
        assert_eq!(payload["type"], "offer");
        assert_eq!(payload["sdp"], "v=0...");
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(decode_payload("[1,2,3]").is_err());
        assert!(decode_payload("\"offer\"").is_err());
        assert!(decode_payload("42").is_err());
        assert!(decode_payload("not json at all").is_err());
    }

    #[test]
    fn test_encode_round_trips_fields() {
        let payload = decode_payload(r#"{"type":"candidate","mid":0}"#).unwrap();
        let text = encode_payload(&payload).unwrap();
        let back = decode_payload(&text).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn test_envelope_carries_routing_metadata() {
        let payload = decode_payload(r#"{"type":"answer"}"#).unwrap();
        let envelope = Envelope::new("room-1", "conn-a", payload);
        assert_eq!(envelope.room_id, "room-1");
        assert_eq!(envelope.sender_id, "conn-a");
        assert_eq!(envelope.payload["type"], "answer");
    }
}
