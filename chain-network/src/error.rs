//! Network error types

use chain_core::NetworkVariant;
use thiserror::Error;

pub type NetworkResult<T> = Result<T, NetworkError>;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Response decoding error: {0}")]
    Decode(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Peer unavailable: {0}")]
    PeerUnavailable(String),

    #[error("Unable to reach any {variant} seed after {attempts} attempts")]
    ExhaustedRetries {
        variant: NetworkVariant,
        attempts: usize,
    },

    #[error("Peer optimization skipped: {0}")]
    DegradedOptimization(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NetworkError {
    /// Whether the bootstrap loop absorbs this error and draws another seed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NetworkError::Transport(_)
                | NetworkError::Timeout
                | NetworkError::HttpStatus { .. }
                | NetworkError::Decode(_)
                | NetworkError::InvalidEndpoint(_)
                | NetworkError::PeerUnavailable(_)
        )
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_decode() {
            NetworkError::Decode(err.to_string())
        } else {
            NetworkError::Transport(err.to_string())
        }
    }
}
