//! Error types for txboard-client

use thiserror::Error;
use txboard_core::CoreError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Could not decode response: {message}")]
    Decode { message: String },
}

impl From<ClientError> for CoreError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Decode { message } => CoreError::InvalidResponse { message },
            ClientError::InvalidBaseUrl { url } => CoreError::ConfigError {
                message: format!("invalid api.base_url '{}'", url),
            },
            other => CoreError::FetchFailed {
                message: other.to_string(),
            },
        }
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
