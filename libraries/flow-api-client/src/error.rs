//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when talking to the music service.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// The authorization redirect reported a failure or lacked tokens
    #[error("Authorization failed: {reason}")]
    AuthorizationFailed { reason: String },

    /// A playlist could not be fetched or read
    #[error("Failed to fetch playlist: {cause}")]
    FetchFailed { cause: String },

    /// A track could not be downloaded
    #[error("Failed to download track: {cause}")]
    DownloadFailed { cause: String },

    /// Service returned an error response
    #[error("Service error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Catalog document is not well-formed
    #[error("Failed to parse catalog document: {0}")]
    Parse(String),

    /// Invalid service URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ApiClientError {
    /// Fold any error into `FetchFailed`
    pub(crate) fn into_fetch_failed(self) -> Self {
        match self {
            err @ Self::FetchFailed { .. } => err,
            other => Self::FetchFailed {
                cause: other.to_string(),
            },
        }
    }

    /// Fold any error into `DownloadFailed`
    pub(crate) fn into_download_failed(self) -> Self {
        match self {
            err @ Self::DownloadFailed { .. } => err,
            other => Self::DownloadFailed {
                cause: other.to_string(),
            },
        }
    }
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;
