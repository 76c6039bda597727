//! Flow Player Core
//!
//! Shared domain types and error handling for Flow Player.
//!
//! Every other crate in the workspace speaks in these types:
//! - **Domain Types**: `Track`, `OAuthTokenSet`, `Genre`, `SearchQuery`
//! - **Error Handling**: `FlowError` and its `Result` alias
//!
//! # Example
//!
//! ```rust
//! use flow_core::{Genre, SearchQuery, Track};
//! use std::time::Duration;
//!
//! let track = Track::new("Artist", "Song", Duration::from_secs(215), "https://cdn.example/1.mp3");
//! assert_eq!(track.display_title(), "Artist - Song");
//!
//! let genre: Genre = "Drum & Bass".parse().unwrap();
//! assert_eq!(genre.id(), 10);
//!
//! let query = SearchQuery::new("nightcall").artist_only(true);
//! assert!(query.artist_only);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{FlowError, Result};
pub use types::{Genre, OAuthToken, OAuthTokenSet, SearchQuery, Track};
