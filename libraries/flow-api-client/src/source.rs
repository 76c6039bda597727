//! Catalog source abstraction.

use crate::error::Result;
use async_trait::async_trait;
use flow_core::{Genre, OAuthTokenSet, SearchQuery, Track};

/// Anything that can hand out playlists and track media for an authorized user
///
/// Every method returns the parsed tracks in service order, or
/// `ApiClientError::FetchFailed`. Implemented by [`ApiClient`](crate::ApiClient);
/// tests and offline front-ends provide their own.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// The user's own tracks
    async fn fetch_owned(&self, tokens: &OAuthTokenSet) -> Result<Vec<Track>>;

    /// Suggestions for the user
    async fn fetch_suggested(&self, tokens: &OAuthTokenSet) -> Result<Vec<Track>>;

    /// Popular tracks in `genre`
    async fn fetch_popular(&self, tokens: &OAuthTokenSet, genre: Genre) -> Result<Vec<Track>>;

    /// Search results for `query`
    async fn fetch_search(&self, tokens: &OAuthTokenSet, query: &SearchQuery)
        -> Result<Vec<Track>>;

    /// Media bytes behind a track locator, or `ApiClientError::DownloadFailed`
    async fn download(&self, locator: &str) -> Result<Vec<u8>>;
}
