//! Types shared by the catalog, authorization and download clients.

use serde::{Deserialize, Serialize};

/// How token values are pulled out of the authorization redirect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Look values up by parameter name
    #[default]
    Strict,

    /// Take the first three parameter values in order, whatever their names
    Positional,
}

/// Connection settings for the music service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Registered application id (`client_id`)
    pub app_id: String,
    /// Requested permission scope
    pub permissions: String,
    /// Redirect target after authorization
    pub redirect_uri: String,
    /// Authorization page style
    pub display: String,
    /// Service API version
    pub version: String,
    /// Ask the user to confirm permissions again
    pub revoke: bool,
    /// Authorization endpoint
    pub oauth_url: String,
    /// Method endpoint root (e.g., "https://api.vk.com/method")
    pub base_url: String,
    /// Redirect parsing strategy
    pub parse_mode: ParseMode,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            app_id: "4809611".to_string(),
            permissions: "audio,offline".to_string(),
            redirect_uri: "https://oauth.vk.com/blank.html".to_string(),
            display: "page".to_string(),
            version: "5.28".to_string(),
            revoke: true,
            oauth_url: "https://oauth.vk.com/authorize".to_string(),
            base_url: "https://api.vk.com/method".to_string(),
            parse_mode: ParseMode::Strict,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Default settings against another method endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Download progress information.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    pub bytes_received: u64,
    pub bytes_total: Option<u64>,
    /// Progress as 0.0 to 1.0
    pub progress: f32,
}

impl DownloadProgress {
    pub(crate) fn after_chunk(bytes_received: u64, bytes_total: Option<u64>) -> Self {
        // Unknown length reports 0.0 until the body is complete
        let progress = match bytes_total {
            Some(0) => 1.0,
            Some(total) => (bytes_received as f32 / total as f32).min(1.0),
            None => 0.0,
        };
        Self {
            bytes_received,
            bytes_total,
            progress,
        }
    }
}
