//! Error types for the core crate

use thiserror::Error;

/// Core errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
