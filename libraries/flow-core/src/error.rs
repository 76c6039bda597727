/// Core error types for Flow Player
use thiserror::Error;

/// Result type alias using `FlowError`
pub type Result<T> = std::result::Result<T, FlowError>;

/// Core error type for Flow Player
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Genre label not known to the catalog
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),
}
