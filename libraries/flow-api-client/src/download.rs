//! Track downloads into memory; saving is up to the caller.

use crate::error::{ApiClientError, Result};
use crate::types::DownloadProgress;
use futures_util::StreamExt;
use reqwest::Client;
use tracing::{debug, info};

const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

/// Download client for track locators.
pub struct DownloadClient<'a> {
    http: &'a Client,
}

impl<'a> DownloadClient<'a> {
    pub(crate) fn new(http: &'a Client) -> Self {
        Self { http }
    }

    /// Download the media behind a track locator.
    ///
    /// # Arguments
    /// * `locator` - Track source URL from the catalog
    /// * `progress_callback` - Called after every received chunk
    ///
    /// # Returns
    /// The whole body, or `DownloadFailed`.
    pub async fn download<F>(&self, locator: &str, progress_callback: F) -> Result<Vec<u8>>
    where
        F: FnMut(DownloadProgress),
    {
        self.download_inner(locator, progress_callback)
            .await
            .map_err(ApiClientError::into_download_failed)
    }

    async fn download_inner<F>(&self, locator: &str, mut progress_callback: F) -> Result<Vec<u8>>
    where
        F: FnMut(DownloadProgress),
    {
        debug!(url = %locator, "Downloading track");

        let response = self.http.get(locator).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiClientError::ServerError {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        // Preallocate from Content-Length, capped so a bogus header can't balloon it
        let expected = response.content_length();
        let capacity = expected.map_or(0, |len| len.min(MAX_PREALLOCATION)) as usize;
        let mut body = Vec::with_capacity(capacity);

        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            body.extend_from_slice(&chunk?);
            progress_callback(DownloadProgress::after_chunk(body.len() as u64, expected));
        }

        info!(url = %locator, size = body.len(), "Track downloaded");

        Ok(body)
    }
}
