//! Playlist fetch operations.

use crate::catalog::parse_catalog;
use crate::error::{ApiClientError, Result};
use flow_core::{Genre, OAuthTokenSet, SearchQuery, Track};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Upper bound the service accepts for list methods
const LIST_COUNT: &str = "500";

/// Upper bound the service accepts for search
const SEARCH_COUNT: &str = "300";

/// Playlist client for the music service.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    api_version: &'a str,
    tokens: &'a OAuthTokenSet,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(
        http: &'a Client,
        base_url: &'a str,
        api_version: &'a str,
        tokens: &'a OAuthTokenSet,
    ) -> Self {
        Self {
            http,
            base_url,
            api_version,
            tokens,
        }
    }

    /// The authorized user's own tracks.
    pub async fn owned(&self) -> Result<Vec<Track>> {
        self.fetch("audio.get.xml", &[]).await
    }

    /// Tracks the service suggests for the user.
    pub async fn suggested(&self) -> Result<Vec<Track>> {
        self.fetch("audio.getRecommendations.xml", &[("count", LIST_COUNT)])
            .await
    }

    /// Popular tracks in a genre.
    pub async fn popular(&self, genre: Genre) -> Result<Vec<Track>> {
        let genre_id = genre.id().to_string();
        self.fetch(
            "audio.getPopular.xml",
            &[("genre_id", genre_id.as_str()), ("count", LIST_COUNT)],
        )
        .await
    }

    /// Free-text search.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Track>> {
        let performer_only = if query.artist_only { "1" } else { "0" };
        self.fetch(
            "audio.search.xml",
            &[
                ("performer_only", performer_only),
                ("q", query.text.as_str()),
                ("count", SEARCH_COUNT),
            ],
        )
        .await
    }

    /// Full method URL, including credentials.
    pub fn method_url(&self, method: &str, extra: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, method))
            .map_err(|e| ApiClientError::InvalidUrl(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("uid", &self.tokens.user_id)
            .append_pair("access_token", &self.tokens.access_token)
            .append_pair("v", self.api_version)
            .extend_pairs(extra.iter().copied());

        Ok(url)
    }

    async fn fetch(&self, method: &str, extra: &[(&str, &str)]) -> Result<Vec<Track>> {
        self.fetch_inner(method, extra)
            .await
            .map_err(ApiClientError::into_fetch_failed)
    }

    async fn fetch_inner(&self, method: &str, extra: &[(&str, &str)]) -> Result<Vec<Track>> {
        let url = self.method_url(method, extra)?;
        // Only the method is logged; the URL carries the access token
        debug!(method = %method, "Fetching playlist");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(method = %method, status = %status, "Playlist request rejected");
            return Err(ApiClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        let tracks = parse_catalog(&body)?;

        debug!(method = %method, tracks = tracks.len(), "Fetched playlist");

        Ok(tracks)
    }
}
