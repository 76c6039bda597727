//! Headless media transport
//!
//! Stands in for an audio backend: commands are logged and answered with
//! the notifications a real player would send, delivered through the
//! controller's event channel.

use crate::controller::AppEvent;
use flow_playback::{MediaTransport, PlaybackError, TransportEvent, TransportState};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

pub struct HeadlessTransport {
    events: UnboundedSender<AppEvent>,
    loaded: Option<String>,
}

impl HeadlessTransport {
    pub fn new(events: UnboundedSender<AppEvent>) -> Self {
        Self {
            events,
            loaded: None,
        }
    }

    /// Locator of the loaded media
    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    fn echo(&self, event: TransportEvent) -> flow_playback::Result<()> {
        self.events
            .send(AppEvent::Transport(event))
            .map_err(|_| PlaybackError::transport("event loop has shut down"))
    }
}

impl MediaTransport for HeadlessTransport {
    fn play(&mut self, locator: &str) -> flow_playback::Result<()> {
        info!(url = %locator, "Playing");
        self.loaded = Some(locator.to_string());
        self.echo(TransportEvent::PositionChanged(0))?;
        self.echo(TransportEvent::StateChanged(TransportState::Playing))
    }

    fn resume(&mut self) -> flow_playback::Result<()> {
        debug!("Resuming");
        self.echo(TransportEvent::StateChanged(TransportState::Playing))
    }

    fn pause(&mut self) -> flow_playback::Result<()> {
        debug!("Pausing");
        self.echo(TransportEvent::StateChanged(TransportState::Paused))
    }

    fn stop(&mut self) -> flow_playback::Result<()> {
        debug!("Stopping");
        self.loaded = None;
        self.echo(TransportEvent::StateChanged(TransportState::Stopped))
    }

    fn seek(&mut self, position_ms: u64) -> flow_playback::Result<()> {
        debug!(position_ms, "Seeking");
        self.echo(TransportEvent::PositionChanged(position_ms))
    }

    fn set_volume(&mut self, volume: u8) -> flow_playback::Result<()> {
        let volume = volume.min(100);
        debug!(volume, "Setting volume");
        self.echo(TransportEvent::VolumeChanged(volume))
    }
}
