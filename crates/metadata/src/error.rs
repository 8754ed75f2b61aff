//! Errors raised while talking to the metadata provider.
//!
//! None of these reach callers of `MetadataFetcher::fetch_details`; they are
//! logged and replaced by the sentinel record. They are public so providers
//! and tests can name them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to build HTTP client: {0}")]
    ClientError(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Malformed response body: {0}")]
    MalformedBody(String),
}

impl From<reqwest::Error> for MetadataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MetadataError::Timeout
        } else if let Some(status) = err.status() {
            MetadataError::HttpStatus {
                status: status.as_u16(),
            }
        } else {
            MetadataError::NetworkError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
