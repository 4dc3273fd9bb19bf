//! Extracted offers and the application's native offer encoding

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Placeholder ticker when an asset cannot be recovered
pub const UNKNOWN_ASSET: &str = "Unknown";

/// Placeholder rendered for an amount that cannot be recovered
pub const UNKNOWN_AMOUNT: &str = "?";

/// Sentinel rate for degenerate or missing amounts
pub const RATE_NOT_AVAILABLE: &str = "N/A";

/// Offer amount, either a number (possibly NaN) or the `?` placeholder
///
/// NaN is a legitimate value here: non-numeric amounts coerce to NaN and
/// flow into the rate calculation, which reports them as `N/A`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Value(f64),
    Unknown,
}

impl Amount {
    pub fn value(&self) -> Option<f64> {
        match self {
            Amount::Value(v) => Some(*v),
            Amount::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Amount::Unknown)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Value(v) => write!(f, "{}", v),
            Amount::Unknown => f.write_str(UNKNOWN_AMOUNT),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Amount::Value(v) => serializer.serialize_f64(*v),
            Amount::Unknown => serializer.serialize_str(UNKNOWN_AMOUNT),
        }
    }
}

/// Which payload layout an offer was recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OfferShape {
    /// `{"offer": {"fromAsset": ..., "fromAmount": ..., ...}}`
    NestedOffer,
    /// `{"from": {"asset", "amount"}, "to": {"asset", "amount"}}`
    FromTo,
    /// `{"fromAsset", "fromAmount", "toAsset", "toAmount"}` - our own format
    Flat,
    /// Regex scraping of free text (debug mode only)
    TextScrape,
}

impl OfferShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferShape::NestedOffer => "nestedOffer",
            OfferShape::FromTo => "fromTo",
            OfferShape::Flat => "flat",
            OfferShape::TextScrape => "textScrape",
        }
    }
}

impl fmt::Display for OfferShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ownership heuristic that matched a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OwnershipRule {
    /// Handle appears wrapped in double quotes: `"alice"`
    QuotedHandle,
    /// Handle immediately followed by `":`
    HandleKey,
    /// Plain chat convention `alice: ...`
    ChatPrefix,
    /// Payload has our own flat offer schema and no foreign-schema keys
    NativeSchema,
}

/// Structured offer recovered from one relay message
///
/// Rebuilt from scratch on every extraction pass; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedOffer {
    /// Timestamp (or wall-clock fallback) joined with the list position
    pub key: String,
    pub from_asset: String,
    pub from_amount: Amount,
    pub to_asset: String,
    pub to_amount: Amount,
    /// Fixed-decimal `to / from` quotient or `N/A`
    pub rate: String,
    pub is_my_offer: bool,
    #[serde(rename = "isValidJSON")]
    pub is_valid_json: bool,
    /// Decoded payload text
    pub raw_message: String,
    pub content_topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_nanos: Option<i64>,
    pub shape: OfferShape,
    /// Hex SHA-256 of the decoded payload bytes
    pub payload_digest: String,
}

/// The application's own flat offer format
///
/// `timestamp` is milliseconds since the Unix epoch, as the front end
/// stamps offers before publishing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeOffer {
    pub from_asset: String,
    pub from_amount: f64,
    pub to_asset: String,
    pub to_amount: f64,
    pub timestamp: i64,
}

impl NativeOffer {
    pub fn new(
        from_asset: &str,
        from_amount: f64,
        to_asset: &str,
        to_amount: f64,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            from_asset: from_asset.to_string(),
            from_amount,
            to_asset: to_asset.to_string(),
            to_amount,
            timestamp: timestamp_ms,
        }
    }

    /// Serialise to the JSON text that goes into a relay payload
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Encode as a relay message, stamping it with the offer's own time
    pub fn to_raw_message(&self, content_topic: &str) -> serde_json::Result<super::RawMessage> {
        let text = self.to_json()?;
        let nanos = self.timestamp.saturating_mul(1_000_000);
        Ok(super::RawMessage::from_text(&text, content_topic, Some(nanos)))
    }
}
