//! Decoder-specific error types

/// Result type for decoder operations
pub type DecoderResult<T> = Result<T, DecoderError>;

/// Decoder-specific error types
///
/// Callers inside the extraction pass treat every variant as "skip this
/// message"; none of them abort a pass.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
