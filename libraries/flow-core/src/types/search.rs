//! Catalog search query

use serde::{Deserialize, Serialize};

/// Free-text catalog search
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Text typed by the user
    pub text: String,

    /// Match performer names only
    pub artist_only: bool,
}

impl SearchQuery {
    /// Create a query matching titles and performers
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            artist_only: false,
        }
    }

    /// Restrict the query to performer names
    pub fn artist_only(mut self, artist_only: bool) -> Self {
        self.artist_only = artist_only;
        self
    }
}
