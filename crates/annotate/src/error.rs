use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion service returned status {status}")]
    Status { status: u16, body: String },

    #[error("request to completion service failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to decode completion response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("completion response contained no choices")]
    EmptyChoices,
}

impl CompletionError {
    /// Rate limiting, server-side failures and dropped connections may go
    /// away on their own. Anything else will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Status { status, .. } => *status == 429 || *status >= 500,
            CompletionError::Transport(_) => true,
            CompletionError::Decode(_) | CompletionError::EmptyChoices => false,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("index list contains a non-integer token: {token:?}")]
    InvalidIndex { token: String },

    #[error("scores list contains a non-numeric token: {token:?}")]
    InvalidScore { token: String },
}
