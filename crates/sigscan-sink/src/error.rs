use thiserror::Error;

/// Errors returned by the upsert sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
