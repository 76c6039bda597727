//! Media transport abstraction
//!
//! The session never decodes or outputs audio itself. Whatever does (a
//! desktop audio backend, a remote renderer, a test double) implements
//! [`MediaTransport`] and reports back through [`TransportEvent`]s.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Command side of the media transport
///
/// Commands are fire-and-forget: results of a command arrive later as
/// [`TransportEvent`]s, in the order duration, positions, state change.
pub trait MediaTransport: Send {
    /// Load and start the media at `locator`
    fn play(&mut self, locator: &str) -> Result<()>;

    /// Resume the loaded media after a pause
    fn resume(&mut self) -> Result<()>;

    /// Pause output, keeping the position
    fn pause(&mut self) -> Result<()>;

    /// Stop output and unload
    fn stop(&mut self) -> Result<()>;

    /// Jump to `position_ms` in the loaded media
    fn seek(&mut self, position_ms: u64) -> Result<()>;

    /// Set output volume
    ///
    /// Out-of-range values are clamped by the implementation, which echoes
    /// the effective value through [`TransportEvent::VolumeChanged`].
    fn set_volume(&mut self, volume: u8) -> Result<()>;
}

/// State reported by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// Nothing loaded or output stopped
    Stopped,
    /// Producing output
    Playing,
    /// Output paused
    Paused,
}

/// Notifications from the media transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportEvent {
    /// Length of the loaded media became known
    DurationChanged(u64),

    /// Periodic playback position
    PositionChanged(u64),

    /// Effective output volume
    VolumeChanged(u8),

    /// Transport state changed
    StateChanged(TransportState),

    /// The transport moved to another playlist index on its own;
    /// `None` means iteration ended with no further track
    CurrentIndexChanged(Option<usize>),

    /// The loaded media played to its end
    MediaFinished,
}
