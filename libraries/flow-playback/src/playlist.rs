//! Playlist model
//!
//! An ordered list of tracks with an optional current position. The same
//! type backs both the live playlist owned by the session and the browsed
//! snapshots handed around by the catalog layer; copying one into the other
//! is a plain deep clone.

use crate::error::{PlaybackError, Result};
use crate::mode::PlaybackMode;
use crate::shuffle::pick_other_index;
use flow_core::Track;

/// Ordered tracks plus the current index
///
/// Invariant: `current_index` is `None` or a valid index into `tracks`.
///
/// ```text
///   tracks:   [ A ][ B ][ C ]
///   current:         ^ Some(1)
///
///   advance(LoopAll)        -> Some(2)
///   advance(LoopAll)        -> Some(0)   (wraps)
///   advance(Sequential) @2  -> None      (end of iteration)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistModel {
    tracks: Vec<Track>,
    current_index: Option<usize>,
}

impl PlaylistModel {
    /// Create new empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a playlist holding `tracks`, nothing selected
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current_index: None,
        }
    }

    /// Clear and repopulate in one step
    ///
    /// Playlists always arrive whole; there is no incremental diffing.
    pub fn replace_all(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.current_index = None;
    }

    /// Append a track at the end
    pub fn append(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove every track and the selection
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current_index = None;
    }

    /// Select a track, or clear the selection with `None`
    pub fn set_current_index(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(index) = index {
            self.check_index(index)?;
        }
        self.current_index = index;
        Ok(())
    }

    /// Move to the next index under `mode` and return it
    ///
    /// - `Sequential`: `i + 1`, or `None` past the last track
    /// - `LoopAll`: `(i + 1) mod len`
    /// - `RepeatCurrent`: `i`
    /// - `Shuffle`: a random index other than `i` (or `i` with a single track)
    ///
    /// Without a selection the first track is next (a random one for
    /// `Shuffle`). An empty playlist always yields `None`.
    pub fn advance(&mut self, mode: PlaybackMode) -> Option<usize> {
        let len = self.tracks.len();
        let next = if len == 0 {
            None
        } else {
            match (mode, self.current_index) {
                (PlaybackMode::Shuffle, current) => {
                    pick_other_index(&mut rand::thread_rng(), len, current)
                }
                (_, None) => Some(0),
                (PlaybackMode::Sequential, Some(i)) => (i + 1 < len).then_some(i + 1),
                (PlaybackMode::LoopAll, Some(i)) => Some((i + 1) % len),
                (PlaybackMode::RepeatCurrent, Some(i)) => Some(i),
            }
        };
        self.current_index = next;
        next
    }

    /// Move to the previous index under `mode` and return it
    ///
    /// Mirror image of [`advance`](Self::advance): `Sequential` stops before
    /// the first track, `LoopAll` wraps to the last one.
    pub fn retreat(&mut self, mode: PlaybackMode) -> Option<usize> {
        let len = self.tracks.len();
        let previous = if len == 0 {
            None
        } else {
            match (mode, self.current_index) {
                (PlaybackMode::Shuffle, current) => {
                    pick_other_index(&mut rand::thread_rng(), len, current)
                }
                (PlaybackMode::Sequential, None) => None,
                (_, None) => Some(len - 1),
                (PlaybackMode::Sequential, Some(i)) => i.checked_sub(1),
                (PlaybackMode::LoopAll, Some(i)) => Some(if i == 0 { len - 1 } else { i - 1 }),
                (PlaybackMode::RepeatCurrent, Some(i)) => Some(i),
            }
        };
        self.current_index = previous;
        previous
    }

    /// Currently selected index
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Currently selected track
    pub fn current(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }

    /// Track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Locator of the track at index, for the media transport
    pub fn locator(&self, index: usize) -> Result<&str> {
        self.check_index(index)?;
        Ok(&self.tracks[index].source_url)
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tracks.len() {
            Ok(())
        } else {
            Err(PlaybackError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            })
        }
    }
}

impl From<Vec<Track>> for PlaylistModel {
    fn from(tracks: Vec<Track>) -> Self {
        Self::from_tracks(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn create_test_track(id: &str) -> Track {
        Track::new(
            "Test Artist",
            format!("Track {}", id),
            Duration::from_secs(180),
            format!("https://cdn.example/{}.mp3", id),
        )
    }

    fn playlist_of(len: usize) -> PlaylistModel {
        (0..len)
            .map(|i| create_test_track(&i.to_string()))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn create_empty_playlist() {
        let playlist = PlaylistModel::new();
        assert!(playlist.is_empty());
        assert_eq!(playlist.len(), 0);
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn replace_all_resets_selection() {
        let mut playlist = playlist_of(3);
        playlist.set_current_index(Some(2)).unwrap();

        playlist.replace_all(vec![create_test_track("x")]);

        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.current_index(), None);
        assert_eq!(playlist.get(0).unwrap().title, "Track x");
    }

    #[test]
    fn append_and_clear() {
        let mut playlist = PlaylistModel::new();
        playlist.append(create_test_track("1"));
        playlist.append(create_test_track("2"));
        playlist.set_current_index(Some(1)).unwrap();
        assert_eq!(playlist.len(), 2);

        playlist.clear();
        assert!(playlist.is_empty());
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn set_current_index_bounds() {
        let mut playlist = playlist_of(2);
        assert!(playlist.set_current_index(Some(1)).is_ok());
        assert!(playlist.set_current_index(None).is_ok());
        assert_eq!(
            playlist.set_current_index(Some(2)),
            Err(PlaybackError::IndexOutOfRange { index: 2, len: 2 })
        );
        // Failed call leaves the selection untouched
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn sequential_stops_at_end() {
        let mut playlist = playlist_of(3);
        playlist.set_current_index(Some(1)).unwrap();
        assert_eq!(playlist.advance(PlaybackMode::Sequential), Some(2));
        assert_eq!(playlist.advance(PlaybackMode::Sequential), None);
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn loop_all_wraps() {
        let mut playlist = playlist_of(3);
        playlist.set_current_index(Some(2)).unwrap();
        assert_eq!(playlist.advance(PlaybackMode::LoopAll), Some(0));
        assert_eq!(playlist.retreat(PlaybackMode::LoopAll), Some(2));
    }

    #[test]
    fn repeat_current_stays() {
        let mut playlist = playlist_of(3);
        playlist.set_current_index(Some(1)).unwrap();
        assert_eq!(playlist.advance(PlaybackMode::RepeatCurrent), Some(1));
        assert_eq!(playlist.retreat(PlaybackMode::RepeatCurrent), Some(1));
    }

    #[test]
    fn shuffle_single_track_keeps_index() {
        let mut playlist = playlist_of(1);
        playlist.set_current_index(Some(0)).unwrap();
        assert_eq!(playlist.advance(PlaybackMode::Shuffle), Some(0));
    }

    #[test]
    fn shuffle_moves_elsewhere() {
        let mut playlist = playlist_of(4);
        playlist.set_current_index(Some(3)).unwrap();
        for _ in 0..50 {
            let before = playlist.current_index().unwrap();
            let after = playlist.advance(PlaybackMode::Shuffle).unwrap();
            assert_ne!(before, after);
            assert!(after < 4);
        }
    }

    #[test]
    fn advance_without_selection_starts_at_first_track() {
        for mode in [
            PlaybackMode::Sequential,
            PlaybackMode::LoopAll,
            PlaybackMode::RepeatCurrent,
        ] {
            let mut playlist = playlist_of(3);
            assert_eq!(playlist.advance(mode), Some(0));
        }
    }

    #[test]
    fn empty_playlist_never_advances() {
        let mut playlist = PlaylistModel::new();
        assert_eq!(playlist.advance(PlaybackMode::LoopAll), None);
        assert_eq!(playlist.advance(PlaybackMode::Shuffle), None);
        assert_eq!(playlist.retreat(PlaybackMode::LoopAll), None);
    }

    #[test]
    fn sequential_retreat_stops_at_start() {
        let mut playlist = playlist_of(3);
        playlist.set_current_index(Some(0)).unwrap();
        assert_eq!(playlist.retreat(PlaybackMode::Sequential), None);
    }

    #[test]
    fn locator_checks_bounds() {
        let playlist = playlist_of(2);
        assert_eq!(playlist.locator(1).unwrap(), "https://cdn.example/1.mp3");
        assert!(matches!(
            playlist.locator(5),
            Err(PlaybackError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }
}
