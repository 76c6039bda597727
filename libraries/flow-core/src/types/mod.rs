//! Domain types shared across Flow Player crates

mod genre;
mod search;
mod tokens;
mod track;

pub use genre::Genre;
pub use search::SearchQuery;
pub use tokens::{OAuthToken, OAuthTokenSet};
pub use track::Track;
