//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Index outside the playlist bounds
    ///
    /// Always a programming error in the caller; never shown to users.
    #[error("Index {index} out of range for playlist of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Media transport rejected a command
    #[error("Media transport error: {0}")]
    Transport(String),
}

impl PlaybackError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
