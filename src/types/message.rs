//! Raw relay messages
//!
//! A `RawMessage` is exactly what the relay hands back for a content topic:
//! an opaque base64 payload, the topic it was published on, and an optional
//! nanosecond timestamp. Nothing here interprets the payload.

use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Deserializer, Serialize};

/// Message as served by the relay for a subscribed content topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    /// Base64-encoded payload (UTF-8 text once decoded)
    pub payload: String,
    /// Channel identifier partitioning the shared stream into communities
    #[serde(default)]
    pub content_topic: String,
    /// Decimal nanoseconds since the Unix epoch
    ///
    /// Kept as the decimal string the relay sent. Relays emit this either as a
    /// JSON string or a bare integer; both land here without passing through f64.
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<String>,
}

impl RawMessage {
    /// Create a message from an already-encoded payload
    pub fn new(payload: impl Into<String>, content_topic: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            content_topic: content_topic.into(),
            timestamp: None,
        }
    }

    /// Wrap plain text as a relay message, base64-encoding the payload
    pub fn from_text(text: &str, content_topic: &str, timestamp_nanos: Option<i64>) -> Self {
        Self {
            payload: general_purpose::STANDARD.encode(text.as_bytes()),
            content_topic: content_topic.to_string(),
            timestamp: timestamp_nanos.map(|ts| ts.to_string()),
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// True when a non-blank timestamp string is present
    pub fn has_timestamp(&self) -> bool {
        self.timestamp
            .as_deref()
            .map(|ts| !ts.trim().is_empty())
            .unwrap_or(false)
    }

    /// Timestamp parsed as a 64-bit integer, if it is one
    pub fn timestamp_nanos(&self) -> Option<i64> {
        self.timestamp
            .as_deref()
            .and_then(|ts| ts.trim().parse::<i64>().ok())
    }
}

/// Accept `"123"`, `123` or `null` for the timestamp field
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        // serde_json keeps integers as i64/u64, so to_string() is exact here
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "timestamp must be a string or integer, got {}",
            other
        ))),
    }
}
