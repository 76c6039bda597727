//! Session events
//!
//! Event-based communication for the presentation layer. The session queues
//! events while handling a command or transport notification; the owner
//! drains them afterwards with `PlaybackSession::drain_events`.

use crate::transport::TransportState;
use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Session state changed (playing, paused, stopped)
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A live playlist entry started playing
    NowPlaying {
        /// Index in the live playlist
        index: usize,
        /// "Artist - Title"
        title: String,
    },

    /// Iteration reached the end; playback paused instead of advancing
    PlaybackEnded,

    /// A browsed playlist was copied into the live slot
    LiveReplaced {
        /// Number of tracks now live
        len: usize,
    },

    /// Track length known
    DurationChanged {
        /// Whole seconds
        duration_secs: u64,
    },

    /// Position control value changed (not emitted while it is dragged)
    PositionChanged {
        /// Elapsed whole seconds
        position_secs: u64,
        /// Remaining whole seconds
        remaining_secs: u64,
    },

    /// Volume control value changed (not emitted while it is dragged)
    VolumeChanged {
        /// New level
        level: u8,
    },

    /// Raw transport state, for play/pause button icons
    TransportStateChanged {
        /// State reported by the transport
        state: TransportState,
    },
}
