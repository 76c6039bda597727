//! OAuth token set returned by the authorization redirect

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keys of an [`OAuthTokenSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OAuthToken {
    /// Bearer token used on every catalog request
    AccessToken,
    /// Token lifetime in seconds, as sent by the provider
    ExpiresIn,
    /// Id of the authorized user
    UserId,
}

impl OAuthToken {
    /// All keys in redirect order
    pub const ALL: [OAuthToken; 3] = [Self::AccessToken, Self::ExpiresIn, Self::UserId];

    /// Parameter name used by the provider
    pub fn key(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::ExpiresIn => "expires_in",
            Self::UserId => "user_id",
        }
    }
}

/// Credentials produced by one successful authorization
///
/// Values are kept as text exactly as the provider sent them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthTokenSet {
    /// Bearer token
    pub access_token: String,
    /// Lifetime in seconds (text, `"0"` for offline tokens)
    pub expires_in: String,
    /// Authorized user id
    pub user_id: String,
}

impl OAuthTokenSet {
    /// Create a token set
    pub fn new(
        access_token: impl Into<String>,
        expires_in: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in: expires_in.into(),
            user_id: user_id.into(),
        }
    }

    /// Map-style lookup
    pub fn get(&self, key: OAuthToken) -> &str {
        match key {
            OAuthToken::AccessToken => &self.access_token,
            OAuthToken::ExpiresIn => &self.expires_in,
            OAuthToken::UserId => &self.user_id,
        }
    }
}

// Keep the bearer token out of logs.
impl fmt::Debug for OAuthTokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthTokenSet")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_key() {
        let tokens = OAuthTokenSet::new("AAA", "3600", "42");
        assert_eq!(tokens.get(OAuthToken::AccessToken), "AAA");
        assert_eq!(tokens.get(OAuthToken::ExpiresIn), "3600");
        assert_eq!(tokens.get(OAuthToken::UserId), "42");
    }

    #[test]
    fn debug_redacts_access_token() {
        let tokens = OAuthTokenSet::new("secret-token", "0", "7");
        let rendered = format!("{:?}", tokens);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("user_id: \"7\""));
    }

    #[test]
    fn keys_match_provider_names() {
        let keys: Vec<&str> = OAuthToken::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(keys, ["access_token", "expires_in", "user_id"]);
    }
}
