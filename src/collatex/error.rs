use thiserror::Error;

/// Errors that can occur when talking to CollateX or presenting its results
#[derive(Debug, Error)]
pub enum CollateXError {
    /// The service answered with a non-success HTTP status
    #[error("Transport error: {status} {status_text}")]
    Transport { status: u16, status_text: String },

    /// The request could not be sent or the response body could not be read
    #[error("Connection error: {0}")]
    Connection(String),

    /// The alignment result violates its structural invariants
    #[error("Malformed alignment result: {0}")]
    MalformedResult(String),

    /// Request body could not be serialized
    #[error("Request error: {0}")]
    Request(String),

    /// Response body is not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration error (missing env vars, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading witnesses or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Table export failed
    #[error("Output error: {0}")]
    Output(String),
}

impl CollateXError {
    /// Whether this error reports a failed HTTP round trip
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CollateXError::Transport { .. } | CollateXError::Connection(_)
        )
    }
}

/// Type alias for Results using CollateXError
pub type Result<T> = std::result::Result<T, CollateXError>;
