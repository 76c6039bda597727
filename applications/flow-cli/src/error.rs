//! Application error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to save track: {cause}")]
    SaveFailed { cause: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error(transparent)]
    Core(#[from] flow_core::FlowError),

    #[error(transparent)]
    Playback(#[from] flow_playback::PlaybackError),

    #[error(transparent)]
    Api(#[from] flow_api_client::ApiClientError),
}
