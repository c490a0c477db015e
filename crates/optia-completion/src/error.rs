use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    /// The provider answered with a non-success status.
    #[error("Error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("request to completion provider failed: {0}")]
    Transport(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("not supported by this provider: {0}")]
    Unsupported(String),
}
