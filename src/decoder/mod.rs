//! Payload decoding for relay messages
//!
//! Relay payloads are base64 text. Producers on a shared topic are not
//! consistent about padding or line wrapping, so decoding strips ASCII
//! whitespace and accepts padded and unpadded input alike.

pub mod error;

pub use error::{DecoderError, DecoderResult};

use base64::{
    alphabet,
    engine::{self, general_purpose::GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use sha2::{Digest, Sha256};

/// Base64 decoder with lenient padding
///
/// This is the CANONICAL payload decoder. Use it instead of STANDARD so that
/// producers which drop the trailing '=' padding still decode.
pub const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(engine::DecodePaddingMode::Indifferent),
);

/// Decode a base64 payload into UTF-8 text
///
/// # Errors
/// * `DecoderError::Base64` for malformed base64
/// * `DecoderError::Utf8` when the bytes are not valid UTF-8
///
/// # Example
/// ```
/// use relay_offers::decoder::decode_payload;
///
/// assert_eq!(decode_payload("aGVsbG8=").unwrap(), "hello");
/// assert_eq!(decode_payload("aGVsbG8").unwrap(), "hello");
/// assert!(decode_payload("not base64!").is_err());
/// ```
pub fn decode_payload(payload: &str) -> DecoderResult<String> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = BASE64_LENIENT.decode(compact.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Lowercase hex SHA-256 of decoded payload text
pub fn payload_digest(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
