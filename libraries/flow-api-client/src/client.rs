//! Main catalog client.

use crate::auth::authorize_url;
use crate::download::DownloadClient;
use crate::error::{ApiClientError, Result};
use crate::oauth::{parse_redirect, RedirectOutcome};
use crate::playlists::PlaylistClient;
use crate::source::CatalogSource;
use crate::types::{ApiConfig, DownloadProgress};
use async_trait::async_trait;
use flow_core::{Genre, OAuthTokenSet, SearchQuery, Track};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Client for the music service.
///
/// Holds one HTTP connection pool and the service settings. Credentials are
/// passed per call, so one client serves any number of sessions.
///
/// # Example
///
/// ```ignore
/// use flow_api_client::{ApiClient, ApiConfig, CatalogSource, RedirectOutcome};
///
/// let client = ApiClient::new(ApiConfig::default())?;
/// println!("Open {}", client.authorize_url()?);
///
/// if let RedirectOutcome::Authorized(tokens) = client.handle_redirect(&redirect)? {
///     let tracks = client.fetch_owned(&tokens).await?;
///     println!("Found {} tracks", tracks.len());
/// }
/// ```
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ApiClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("FlowPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: ApiConfig { base_url, ..config },
        })
    }

    /// Active settings (base URL normalized).
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Authorization page for the configured application.
    pub fn authorize_url(&self) -> Result<Url> {
        authorize_url(&self.config)
    }

    /// Feed one navigated URL of the login page through the redirect parser.
    pub fn handle_redirect(&self, url: &str) -> Result<RedirectOutcome> {
        let outcome = parse_redirect(url, self.config.parse_mode)?;
        match &outcome {
            RedirectOutcome::Authorized(tokens) => {
                info!(user_id = %tokens.user_id, "Authorization succeeded");
            }
            RedirectOutcome::Denied { description } => {
                warn!(reason = %description, "Authorization denied");
            }
            RedirectOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    /// Playlist operations on behalf of `tokens`.
    pub fn playlists<'a>(&'a self, tokens: &'a OAuthTokenSet) -> PlaylistClient<'a> {
        PlaylistClient::new(&self.http, &self.config.base_url, &self.config.version, tokens)
    }

    /// Download operations.
    pub fn downloads(&self) -> DownloadClient<'_> {
        DownloadClient::new(&self.http)
    }

    /// Download a track with progress reporting.
    pub async fn download_with_progress<F>(&self, locator: &str, progress: F) -> Result<Vec<u8>>
    where
        F: FnMut(DownloadProgress),
    {
        self.downloads().download(locator, progress).await
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_owned(&self, tokens: &OAuthTokenSet) -> Result<Vec<Track>> {
        self.playlists(tokens).owned().await
    }

    async fn fetch_suggested(&self, tokens: &OAuthTokenSet) -> Result<Vec<Track>> {
        self.playlists(tokens).suggested().await
    }

    async fn fetch_popular(&self, tokens: &OAuthTokenSet, genre: Genre) -> Result<Vec<Track>> {
        self.playlists(tokens).popular(genre).await
    }

    async fn fetch_search(
        &self,
        tokens: &OAuthTokenSet,
        query: &SearchQuery,
    ) -> Result<Vec<Track>> {
        self.playlists(tokens).search(query).await
    }

    async fn download(&self, locator: &str) -> Result<Vec<u8>> {
        self.downloads().download(locator, |_| {}).await
    }
}
