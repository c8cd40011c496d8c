use thiserror::Error;

/// Failures building an [`ApiClient`](crate::client::ApiClient).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid API URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
