//! Core types for playback management

use crate::mode::PlaybackMode;
use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing is playing
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track, or at the end of a non-looping playlist
    Paused,
}

impl PlaybackState {
    /// Lower-case name used in status lines
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

/// Configuration for a playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 100)
    pub volume: u8,

    /// Initial iteration policy (default: Sequential)
    pub mode: PlaybackMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 100,
            mode: PlaybackMode::Sequential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 100);
        assert_eq!(config.mode, PlaybackMode::Sequential);
    }

    #[test]
    fn state_names() {
        assert_eq!(PlaybackState::Stopped.as_str(), "stopped");
        assert_eq!(PlaybackState::Playing.as_str(), "playing");
        assert_eq!(PlaybackState::Paused.as_str(), "paused");
    }
}
