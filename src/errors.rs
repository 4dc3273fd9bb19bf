use thiserror::Error;

/// Application-wide error type - single point of truth
///
/// Nothing inside the extraction pass returns these: malformed messages
/// degrade to skips or placeholders. Only the collaborator layers (relay,
/// config, CLI input) fail with an `AppError`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Relay HTTP operations
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid message list at a given position
    #[error("Invalid message at index {index}: {reason}")]
    InvalidMessage { index: usize, reason: String },
}

/// Relay error types
#[derive(Error, Debug)]
pub enum RelayError {
    /// Relay base URL could not be parsed or extended with a topic path
    #[error("Invalid relay URL: {0}")]
    InvalidUrl(String),

    /// Failed to reach the relay node
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Relay answered with a non-success status
    #[error("Request failed: {method} {path} - HTTP {status}: {message}")]
    RequestFailed {
        method: String,
        path: String,
        status: u16,
        message: String,
    },

    /// Failed to deserialise the relay response body
    #[error("Deserialisation failed: {0}")]
    DeserialisationFailed(String),

    /// Retry limit exceeded for relay operation
    #[error("Max retries exceeded: {operation}")]
    MaxRetriesExceeded { operation: String },

    /// Relay request timed out
    #[error("Request timeout: {timeout_seconds}s for {operation}")]
    Timeout {
        timeout_seconds: u64,
        operation: String,
    },
}

impl RelayError {
    /// Whether a retry could plausibly succeed
    ///
    /// Client errors (4xx) and malformed URLs are permanent; everything
    /// network-shaped or 5xx is worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            RelayError::ConnectionFailed(_) | RelayError::Timeout { .. } => true,
            RelayError::RequestFailed { status, .. } => *status >= 500,
            RelayError::InvalidUrl(_)
            | RelayError::DeserialisationFailed(_)
            | RelayError::MaxRetriesExceeded { .. } => false,
        }
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

// Additional From implementations for common error types
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(format!("TOML render error: {}", err))
    }
}
