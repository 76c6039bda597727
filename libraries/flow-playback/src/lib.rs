//! Flow Player - Playback Session
//!
//! Platform-agnostic playback session and playlist synchronization.
//!
//! This crate provides:
//! - Playlist model with mode-driven iteration (sequential, loop, repeat, shuffle)
//! - Resolution of shuffle/loop toggles and repeat menus into one mode
//! - Live vs. browsed playlist tracking with copy-on-play
//! - Elapsed/remaining time and volume, with slider drag handling
//!
//! # Architecture
//!
//! `flow-playback` never touches audio or the network. Audio output is
//! provided through the [`MediaTransport`] trait; its notifications are fed
//! back with [`PlaybackSession::on_transport_event`].
//!
//! # Example
//!
//! ```rust
//! use flow_core::Track;
//! use flow_playback::{
//!     MediaTransport, PlaybackConfig, PlaybackSession, PlaybackState, PlaylistModel, Result,
//! };
//! use std::time::Duration;
//!
//! struct Silent;
//!
//! impl MediaTransport for Silent {
//!     fn play(&mut self, _locator: &str) -> Result<()> { Ok(()) }
//!     fn resume(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn stop(&mut self) -> Result<()> { Ok(()) }
//!     fn seek(&mut self, _position_ms: u64) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _volume: u8) -> Result<()> { Ok(()) }
//! }
//!
//! let mut session = PlaybackSession::new(PlaybackConfig::default(), Box::new(Silent));
//!
//! let view = PlaylistModel::from_tracks(vec![Track::new(
//!     "Artist",
//!     "Song",
//!     Duration::from_secs(180),
//!     "https://cdn.example/song.mp3",
//! )]);
//!
//! session.playlist_arrived();
//! session.play_index(&view, 0).unwrap();
//! assert_eq!(session.state(), PlaybackState::Playing);
//! ```

mod error;
mod events;
mod interaction;
mod mode;
mod playlist;
mod session;
mod shuffle;
pub mod time;
mod transport;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use interaction::ControlInteraction;
pub use mode::{PlaybackMode, RepeatChoice};
pub use playlist::PlaylistModel;
pub use session::PlaybackSession;
pub use transport::{MediaTransport, TransportEvent, TransportState};
pub use types::{PlaybackConfig, PlaybackState};
