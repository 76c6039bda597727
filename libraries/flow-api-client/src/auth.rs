//! Authorization page URL.

use crate::error::{ApiClientError, Result};
use crate::types::ApiConfig;
use url::Url;

/// Build the implicit-grant authorization URL the login page opens.
///
/// ```text
/// {oauth_url}?client_id=..&scope=..&redirect_uri=..&display=..&v=..&revoke=1&response_type=token
/// ```
pub fn authorize_url(config: &ApiConfig) -> Result<Url> {
    let revoke = if config.revoke { "1" } else { "0" };

    Url::parse_with_params(
        &config.oauth_url,
        &[
            ("client_id", config.app_id.as_str()),
            ("scope", config.permissions.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("display", config.display.as_str()),
            ("v", config.version.as_str()),
            ("revoke", revoke),
            ("response_type", "token"),
        ],
    )
    .map_err(|e| ApiClientError::InvalidUrl(format!("{}: {}", config.oauth_url, e)))
}
