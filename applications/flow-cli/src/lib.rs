//! Flow Player CLI
//!
//! Command-line front-end: configuration, the event loop that owns the
//! playback session, a headless media transport and the track saver.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod controller;
pub mod error;
pub mod saver;
pub mod shell;
pub mod transport;

// Re-export commonly used types for convenience
pub use config::FlowConfig;
pub use controller::{AppEvent, Controller};
pub use error::{AppError, Result};
pub use shell::ShellCommand;
pub use transport::HeadlessTransport;
