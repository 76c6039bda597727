//! Playback session - core orchestration
//!
//! Owns the live playlist, decides when a browsed playlist is copied into
//! it, and keeps the transport state and the UI-facing derived values
//! (elapsed/remaining time, volume) in step with transport notifications.

use crate::{
    error::{PlaybackError, Result},
    events::SessionEvent,
    interaction::ControlInteraction,
    mode::PlaybackMode,
    playlist::PlaylistModel,
    time::{format_seconds, remaining_secs},
    transport::{MediaTransport, TransportEvent, TransportState},
    types::{PlaybackConfig, PlaybackState},
};
use flow_core::Track;
use tracing::{debug, info};

/// Playback session
///
/// The live playlist is the only one the transport ever sees. Displayed
/// (browsed) playlists are copied in on the first `play_index` after a new
/// playlist was shown; further plays from the same view reuse the copy.
///
/// ```text
///   playlist_arrived()        play_index(view, i)        play_index(view, j)
///   live_is_browsed = false -> copy view into live,    -> no copy, bind j
///                              live_is_browsed = true
/// ```
pub struct PlaybackSession {
    state: PlaybackState,
    live: PlaylistModel,

    // True when the displayed playlist is the live one
    live_is_browsed: bool,

    // Bumped on every browsed -> live copy
    live_generation: u64,

    mode: PlaybackMode,
    transport: Box<dyn MediaTransport>,

    duration_ms: u64,
    volume: u8,
    reported_state: TransportState,

    position_control: ControlInteraction,
    volume_control: ControlInteraction,

    // Event queue for UI synchronization
    pending_events: Vec<SessionEvent>,
}

impl PlaybackSession {
    /// Create a stopped session with an empty live playlist
    pub fn new(config: PlaybackConfig, transport: Box<dyn MediaTransport>) -> Self {
        Self {
            state: PlaybackState::Stopped,
            live: PlaylistModel::new(),
            live_is_browsed: false,
            live_generation: 0,
            mode: config.mode,
            transport,
            duration_ms: 0,
            volume: config.volume,
            reported_state: TransportState::Stopped,
            position_control: ControlInteraction::new(0),
            volume_control: ControlInteraction::new(u64::from(config.volume)),
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Play row `index` of the displayed playlist
    ///
    /// Copies `displayed` into the live playlist first unless the displayed
    /// playlist already is the live one. The index is validated before
    /// anything is copied, so a bad index leaves the session untouched.
    pub fn play_index(&mut self, displayed: &PlaylistModel, index: usize) -> Result<()> {
        let target_len = if self.live_is_browsed {
            self.live.len()
        } else {
            displayed.len()
        };
        if index >= target_len {
            return Err(PlaybackError::IndexOutOfRange {
                index,
                len: target_len,
            });
        }

        if !self.live_is_browsed {
            self.live = displayed.clone();
            self.live_is_browsed = true;
            self.live_generation += 1;
            info!(tracks = self.live.len(), "Displayed playlist is now live");
            self.pending_events.push(SessionEvent::LiveReplaced {
                len: self.live.len(),
            });
        }

        self.start_live(index)
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<()> {
        if self.state == PlaybackState::Playing {
            self.transport.pause()?;
            self.set_state(PlaybackState::Paused);
        }
        Ok(())
    }

    /// Resume playback
    ///
    /// From `Stopped` the live playlist's current track is replayed from the
    /// start; with nothing selected this does nothing.
    pub fn play(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Paused => {
                self.transport.resume()?;
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
            PlaybackState::Stopped => match self.live.current_index() {
                Some(index) => self.start_live(index),
                None => Ok(()),
            },
            PlaybackState::Playing => Ok(()),
        }
    }

    /// Stop playback
    ///
    /// Keeps the live playlist and its selection.
    pub fn stop(&mut self) -> Result<()> {
        if self.state == PlaybackState::Stopped {
            return Ok(());
        }
        self.transport.stop()?;
        self.position_control.reset(0);
        self.set_state(PlaybackState::Stopped);
        Ok(())
    }

    /// Play/pause button
    ///
    /// When stopped, starts the `selected` row of the displayed playlist.
    pub fn toggle_play_pause(
        &mut self,
        displayed: &PlaylistModel,
        selected: Option<usize>,
    ) -> Result<()> {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
            PlaybackState::Stopped => match selected {
                Some(index) => self.play_index(displayed, index),
                None => Ok(()),
            },
        }
    }

    /// Skip to the next live track under the active mode
    ///
    /// When stopped only the selection moves.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        let next = self.live.advance(self.mode);
        self.follow_step(next)
    }

    /// Go back to the previous live track under the active mode
    pub fn previous(&mut self) -> Result<()> {
        let previous = self.live.retreat(self.mode);
        self.follow_step(previous)
    }

    /// Seek in the current track
    pub fn seek(&mut self, position_ms: u64) -> Result<()> {
        if self.state == PlaybackState::Stopped {
            return Ok(());
        }
        debug!(position_ms, "Seeking");
        self.transport.seek(position_ms)
    }

    // ===== Volume & Mode =====

    /// Set output volume (0-100)
    pub fn set_volume(&mut self, level: u8) -> Result<()> {
        self.volume = level;
        self.transport.set_volume(level)
    }

    /// Set the iteration policy directly
    pub fn set_mode(&mut self, mode: PlaybackMode) {
        if self.mode != mode {
            info!(mode = %mode, "Playback mode changed");
        }
        self.mode = mode;
    }

    /// Resolve and apply the shuffle and loop toggles
    pub fn set_toggles(&mut self, shuffle: bool, loop_enabled: bool) {
        self.set_mode(PlaybackMode::from_toggles(shuffle, loop_enabled));
    }

    // ===== Slider interaction =====

    /// User grabbed the position slider
    pub fn begin_position_drag(&mut self) {
        self.position_control.begin_drag();
    }

    /// User moved the position slider to `position_secs`
    ///
    /// Nothing is loaded while stopped, so the slider stays at zero.
    pub fn drag_position(&mut self, position_secs: u64) -> Result<()> {
        if self.state == PlaybackState::Stopped {
            return Ok(());
        }
        self.position_control.drag_to(position_secs);
        self.seek(position_secs.saturating_mul(1000))
    }

    /// User released the position slider
    pub fn end_position_drag(&mut self) {
        self.position_control.end_drag();
    }

    /// User grabbed the volume slider
    pub fn begin_volume_drag(&mut self) {
        self.volume_control.begin_drag();
    }

    /// User moved the volume slider
    pub fn drag_volume(&mut self, level: u8) -> Result<()> {
        self.volume_control.drag_to(u64::from(level));
        self.set_volume(level)
    }

    /// User released the volume slider
    pub fn end_volume_drag(&mut self) {
        self.volume_control.end_drag();
    }

    // ===== Playlist freshness =====

    /// A new playlist was put on display
    ///
    /// The next `play_index` copies it into the live slot.
    pub fn playlist_arrived(&mut self) {
        self.live_is_browsed = false;
    }

    /// The user navigated to another view without loading a new playlist
    pub fn browse_away(&mut self) {
        self.live_is_browsed = false;
    }

    /// Show the live playlist again ("Current playlist")
    pub fn show_live(&mut self) -> &PlaylistModel {
        self.live_is_browsed = true;
        &self.live
    }

    // ===== Transport notifications =====

    /// Consume one notification from the media transport
    pub fn on_transport_event(&mut self, event: TransportEvent) -> Result<()> {
        match event {
            TransportEvent::DurationChanged(ms) => {
                self.duration_ms = ms;
                self.pending_events.push(SessionEvent::DurationChanged {
                    duration_secs: ms / 1000,
                });
            }
            TransportEvent::PositionChanged(ms) => {
                let secs = ms / 1000;
                if self.position_control.apply_echo(secs) {
                    self.pending_events.push(SessionEvent::PositionChanged {
                        position_secs: secs,
                        remaining_secs: remaining_secs(self.duration_secs(), secs),
                    });
                }
            }
            TransportEvent::VolumeChanged(level) => {
                self.volume = level;
                if self.volume_control.apply_echo(u64::from(level)) {
                    self.pending_events
                        .push(SessionEvent::VolumeChanged { level });
                }
            }
            TransportEvent::StateChanged(state) => {
                self.reported_state = state;
                self.pending_events
                    .push(SessionEvent::TransportStateChanged { state });
            }
            TransportEvent::CurrentIndexChanged(Some(index)) => {
                self.live.set_current_index(Some(index))?;
                if self.state != PlaybackState::Stopped {
                    self.push_now_playing(index);
                }
            }
            TransportEvent::CurrentIndexChanged(None) => {
                self.end_of_iteration()?;
            }
            // A stop or pause issued before this arrived wins
            TransportEvent::MediaFinished if self.state != PlaybackState::Playing => {
                debug!(state = self.state.as_str(), "Ignoring end of media");
            }
            TransportEvent::MediaFinished => match self.live.advance(self.mode) {
                Some(index) => self.start_live(index)?,
                None => self.end_of_iteration()?,
            },
        }
        Ok(())
    }

    /// Drain queued events for the presentation layer
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== State Queries =====

    /// Current session state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Last state reported by the transport
    pub fn reported_state(&self) -> TransportState {
        self.reported_state
    }

    /// Active iteration policy
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// The live playlist
    pub fn live(&self) -> &PlaylistModel {
        &self.live
    }

    /// Check whether the displayed playlist is the live one
    pub fn live_is_browsed(&self) -> bool {
        self.live_is_browsed
    }

    /// Number of browsed -> live copies made so far
    pub fn live_generation(&self) -> u64 {
        self.live_generation
    }

    /// Track bound to the transport
    pub fn now_playing(&self) -> Option<&Track> {
        if self.state == PlaybackState::Stopped {
            return None;
        }
        self.live.current()
    }

    /// Volume as last requested or echoed
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Volume shown on the slider
    pub fn displayed_volume(&self) -> u64 {
        self.volume_control.value()
    }

    /// Track length in whole seconds
    pub fn duration_secs(&self) -> u64 {
        self.duration_ms / 1000
    }

    /// Elapsed seconds shown on the position slider
    pub fn elapsed_secs(&self) -> u64 {
        self.position_control.value()
    }

    /// Remaining seconds, never negative
    pub fn remaining_secs(&self) -> u64 {
        remaining_secs(self.duration_secs(), self.elapsed_secs())
    }

    /// Elapsed time label
    pub fn elapsed_label(&self) -> String {
        format_seconds(self.elapsed_secs())
    }

    /// Remaining time label
    pub fn remaining_label(&self) -> String {
        format_seconds(self.remaining_secs())
    }

    /// Check if the position slider is being dragged
    pub fn is_dragging_position(&self) -> bool {
        self.position_control.is_dragging()
    }

    // ===== Internal Helpers =====

    fn start_live(&mut self, index: usize) -> Result<()> {
        self.live.set_current_index(Some(index))?;
        let locator = self.live.locator(index)?.to_owned();
        self.transport.play(&locator)?;

        self.position_control.reset(0);
        self.duration_ms = 0;
        self.push_now_playing(index);
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    fn follow_step(&mut self, step: Option<usize>) -> Result<()> {
        match (step, self.state) {
            (_, PlaybackState::Stopped) => Ok(()),
            (Some(index), _) => self.start_live(index),
            (None, _) => self.end_of_iteration(),
        }
    }

    fn end_of_iteration(&mut self) -> Result<()> {
        debug!("Reached end of live playlist");
        if self.state == PlaybackState::Playing {
            self.transport.pause()?;
        }
        if self.state != PlaybackState::Stopped {
            self.pending_events.push(SessionEvent::PlaybackEnded);
            self.set_state(PlaybackState::Paused);
        }
        Ok(())
    }

    fn push_now_playing(&mut self, index: usize) {
        if let Some(track) = self.live.get(index) {
            let title = track.display_title();
            info!(index, title = %title, "Now playing");
            self.pending_events
                .push(SessionEvent::NowPlaying { index, title });
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(SessionEvent::StateChanged { state });
        }
    }
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("live_len", &self.live.len())
            .field("live_index", &self.live.current_index())
            .field("live_is_browsed", &self.live_is_browsed)
            .finish_non_exhaustive()
    }
}
