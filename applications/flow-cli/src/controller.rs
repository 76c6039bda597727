//! Event loop owning the playback session
//!
//! Everything that changes player state arrives as an [`AppEvent`] on one
//! channel and is handled to completion before the next one: shell commands,
//! transport notifications, and the results of fetches and downloads that
//! run on spawned tasks. Output for the user is collected as notices.

use crate::config::FlowConfig;
use crate::error::{AppError, Result};
use crate::saver;
use crate::shell::{ShellCommand, HELP};
use crate::transport::HeadlessTransport;
use flow_api_client::CatalogSource;
use flow_core::{Genre, OAuthTokenSet, SearchQuery, Track};
use flow_playback::{
    time::format_seconds, MediaTransport, PlaybackSession, PlaylistModel, SessionEvent,
    TransportEvent,
};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Playlist the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistRequest {
    Owned,
    Suggested,
    Popular(Genre),
    Search(SearchQuery),
}

impl fmt::Display for PlaylistRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owned => f.write_str("My music"),
            Self::Suggested => f.write_str("Suggested"),
            Self::Popular(genre) => write!(f, "Popular: {}", genre),
            Self::Search(query) => write!(f, "Search: {}", query.text),
        }
    }
}

/// Input to the event loop
#[derive(Debug)]
pub enum AppEvent {
    Command(ShellCommand),
    Transport(TransportEvent),
    PlaylistLoaded {
        request: PlaylistRequest,
        result: flow_api_client::Result<Vec<Track>>,
    },
    TrackDownloaded {
        track: Track,
        result: flow_api_client::Result<Vec<u8>>,
    },
}

pub struct Controller {
    session: PlaybackSession,

    // Playlist on screen and its highlighted row
    displayed: PlaylistModel,
    displayed_title: String,
    selected: Option<usize>,

    // Toggle buttons
    shuffle: bool,
    loop_enabled: bool,

    tokens: OAuthTokenSet,
    catalog: Arc<dyn CatalogSource>,
    events: UnboundedSender<AppEvent>,
    download_dir: PathBuf,

    notices: Vec<String>,
}

impl Controller {
    /// Controller driving a [`HeadlessTransport`] that reports back on `events`
    pub fn new(
        config: &FlowConfig,
        tokens: OAuthTokenSet,
        catalog: Arc<dyn CatalogSource>,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        let transport = HeadlessTransport::new(events.clone());
        Self::with_transport(config, tokens, catalog, events, Box::new(transport))
    }

    pub fn with_transport(
        config: &FlowConfig,
        tokens: OAuthTokenSet,
        catalog: Arc<dyn CatalogSource>,
        events: UnboundedSender<AppEvent>,
        transport: Box<dyn MediaTransport>,
    ) -> Self {
        Self {
            session: PlaybackSession::new(config.playback_config(), transport),
            displayed: PlaylistModel::new(),
            displayed_title: String::new(),
            selected: None,
            shuffle: config.playback.shuffle,
            loop_enabled: config.playback.loop_enabled,
            tokens,
            catalog,
            events,
            download_dir: config.downloads.directory.clone(),
            notices: Vec::new(),
        }
    }

    /// Handle events until `quit` or until every sender is gone
    pub async fn run<F>(mut self, mut events: UnboundedReceiver<AppEvent>, mut output: F)
    where
        F: FnMut(String),
    {
        while let Some(event) = events.recv().await {
            let keep_running = self.handle(event).await;
            for notice in self.drain_notices() {
                output(notice);
            }
            if !keep_running {
                break;
            }
        }
        info!("Event loop finished");
    }

    /// Handle one event; `false` means the user asked to quit
    pub async fn handle(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Command(command) => {
                if command == ShellCommand::Quit {
                    return false;
                }
                self.handle_command(command);
            }
            AppEvent::Transport(event) => {
                if let Err(e) = self.session.on_transport_event(event) {
                    warn!(error = %e, "Transport notification rejected");
                }
            }
            AppEvent::PlaylistLoaded { request, result } => {
                self.playlist_loaded(request, result);
            }
            AppEvent::TrackDownloaded { track, result } => {
                self.track_downloaded(track, result).await;
            }
        }

        self.collect_session_events();
        true
    }

    /// Output produced since the last call
    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn displayed(&self) -> &PlaylistModel {
        &self.displayed
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    // ===== Commands =====

    fn handle_command(&mut self, command: ShellCommand) {
        if let Err(e) = self.dispatch(command) {
            warn!(error = %e, "Command failed");
            self.notices.push(format!("Error: {}", e));
        }
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Owned => self.request_playlist(PlaylistRequest::Owned),
            ShellCommand::Suggested => self.request_playlist(PlaylistRequest::Suggested),
            ShellCommand::Popular(genre) => self.request_playlist(PlaylistRequest::Popular(genre)),
            ShellCommand::Search(query) => self.request_playlist(PlaylistRequest::Search(query)),
            ShellCommand::Live => {
                self.displayed = self.session.show_live().clone();
                self.displayed_title = "Current playlist".to_string();
                self.selected = self.displayed.current_index();
                self.list();
            }
            ShellCommand::Play(row) => {
                self.selected = Some(row);
                self.session.play_index(&self.displayed, row)?;
            }
            ShellCommand::Toggle => self
                .session
                .toggle_play_pause(&self.displayed, self.selected)?,
            ShellCommand::Pause => self.session.pause()?,
            ShellCommand::Stop => self.session.stop()?,
            ShellCommand::Next => self.session.next()?,
            ShellCommand::Previous => self.session.previous()?,
            ShellCommand::Seek(secs) => self.session.seek(secs.saturating_mul(1000))?,
            ShellCommand::Volume(level) => self.session.set_volume(level)?,
            ShellCommand::Mode(mode) => {
                self.session.set_mode(mode);
                self.notices.push(format!("Mode: {}", mode));
            }
            ShellCommand::Shuffle => {
                self.shuffle = !self.shuffle;
                self.apply_toggles();
            }
            ShellCommand::Loop => {
                self.loop_enabled = !self.loop_enabled;
                self.apply_toggles();
            }
            ShellCommand::Finish => self
                .session
                .on_transport_event(TransportEvent::MediaFinished)?,
            ShellCommand::Download(row) => self.request_download(row)?,
            ShellCommand::List => self.list(),
            ShellCommand::Status => self.status(),
            ShellCommand::Genres => {
                for genre in Genre::ALL {
                    self.notices.push(format!("{:>3}  {}", genre.id(), genre));
                }
            }
            ShellCommand::Help => self.notices.push(HELP.to_string()),
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    fn apply_toggles(&mut self) {
        self.session.set_toggles(self.shuffle, self.loop_enabled);
        self.notices.push(format!(
            "Shuffle {}, loop {}: {}",
            on_off(self.shuffle),
            on_off(self.loop_enabled),
            self.session.mode()
        ));
    }

    fn request_playlist(&mut self, request: PlaylistRequest) {
        debug!(request = %request, "Requesting playlist");
        self.notices.push(format!("Loading {}...", request));

        let catalog = Arc::clone(&self.catalog);
        let tokens = self.tokens.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = match &request {
                PlaylistRequest::Owned => catalog.fetch_owned(&tokens).await,
                PlaylistRequest::Suggested => catalog.fetch_suggested(&tokens).await,
                PlaylistRequest::Popular(genre) => catalog.fetch_popular(&tokens, *genre).await,
                PlaylistRequest::Search(query) => catalog.fetch_search(&tokens, query).await,
            };
            // Receiver gone means the loop is shutting down
            let _ = events.send(AppEvent::PlaylistLoaded { request, result });
        });
    }

    fn request_download(&mut self, row: usize) -> Result<()> {
        let track = self.displayed.get(row).cloned().ok_or_else(|| {
            AppError::InvalidCommand(format!(
                "no track {} in this playlist ({} tracks)",
                row + 1,
                self.displayed.len()
            ))
        })?;

        self.notices
            .push(format!("Downloading {}...", track.display_title()));

        let catalog = Arc::clone(&self.catalog);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = catalog.download(&track.source_url).await;
            let _ = events.send(AppEvent::TrackDownloaded { track, result });
        });
        Ok(())
    }

    // ===== Completions =====

    fn playlist_loaded(
        &mut self,
        request: PlaylistRequest,
        result: flow_api_client::Result<Vec<Track>>,
    ) {
        match result {
            Ok(tracks) => {
                info!(request = %request, tracks = tracks.len(), "Playlist received");
                self.displayed.replace_all(tracks);
                self.displayed_title = request.to_string();
                self.selected = None;
                self.session.playlist_arrived();
                self.list();
            }
            Err(e) => {
                warn!(request = %request, error = %e, "Playlist request failed");
                self.notices.push(format!("Error: {}", e));
            }
        }
    }

    async fn track_downloaded(&mut self, track: Track, result: flow_api_client::Result<Vec<u8>>) {
        match self.save_download(&track, result).await {
            Ok(path) => self.notices.push(format!("Saved {}", path.display())),
            Err(e) => {
                warn!(error = %e, "Download not saved");
                self.notices.push(format!("Error: {}", e));
            }
        }
    }

    async fn save_download(
        &self,
        track: &Track,
        result: flow_api_client::Result<Vec<u8>>,
    ) -> Result<PathBuf> {
        let bytes = result?;
        saver::save_track(&self.download_dir, track, &bytes).await
    }

    fn collect_session_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                SessionEvent::NowPlaying { index, title } => {
                    self.notices
                        .push(format!("Now playing: {}. {}", index + 1, title));
                }
                SessionEvent::PlaybackEnded => {
                    self.notices.push("End of playlist".to_string());
                }
                other => debug!(event = ?other, "Session event"),
            }
        }
    }

    // ===== Output =====

    fn list(&mut self) {
        if self.displayed.is_empty() {
            self.notices.push(format!("{}: no tracks", self.displayed_title));
            return;
        }

        self.notices.push(format!(
            "{} ({} tracks)",
            self.displayed_title,
            self.displayed.len()
        ));
        for (i, track) in self.displayed.tracks().iter().enumerate() {
            let marker = if Some(i) == self.selected { '>' } else { ' ' };
            self.notices.push(format!(
                "{}{:>4}. {}  [{}]",
                marker,
                i + 1,
                track.display_title(),
                format_seconds(track.duration_secs())
            ));
        }
    }

    fn status(&mut self) {
        let session = &self.session;
        let total = match session.duration_secs() {
            0 => session.now_playing().map_or(0, Track::duration_secs),
            secs => secs,
        };
        let track = session
            .now_playing()
            .map_or_else(|| "-".to_string(), Track::display_title);

        self.notices.push(format!(
            "{} | {} | {} / {} | volume {} | {}",
            session.state().as_str(),
            session.mode(),
            session.elapsed_label(),
            format_seconds(total),
            session.volume(),
            track
        ));
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
