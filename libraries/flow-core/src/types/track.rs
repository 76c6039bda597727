//! Track type

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable catalog entry
///
/// Only fully-populated records from the remote catalog become a `Track`;
/// the catalog parser is responsible for that filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// Performer name
    pub artist: String,

    /// Track title
    pub title: String,

    /// Track length (whole seconds in the catalog)
    pub duration: Duration,

    /// Opaque locator handed to the media transport and download client
    pub source_url: String,
}

impl Track {
    /// Create a new track
    pub fn new(
        artist: impl Into<String>,
        title: impl Into<String>,
        duration: Duration,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            duration,
            source_url: source_url.into(),
        }
    }

    /// Label shown in playlist rows and "now playing" notices
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }

    /// Duration in whole seconds
    pub fn duration_secs(&self) -> u64 {
        self.duration.as_secs()
    }
}
