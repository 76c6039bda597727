//! Authorization redirect parsing.
//!
//! After the user signs in, the service redirects to the blank page with the
//! outcome encoded in the URL fragment:
//!
//! ```text
//! https://oauth.vk.com/blank.html#access_token=AAA&expires_in=0&user_id=42
//! https://oauth.vk.com/blank.html#error=access_denied&error_description=User%20denied
//! ```
//!
//! Every URL the login page navigates to passes through [`parse_redirect`];
//! intermediate pages come back as [`RedirectOutcome::Ignored`].

use crate::error::{ApiClientError, Result};
use crate::types::ParseMode;
use flow_core::{OAuthToken, OAuthTokenSet};
use url::form_urlencoded;

/// What a navigated URL means for the authorization flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// The user or the service refused authorization
    Denied { description: String },

    /// Authorization succeeded
    Authorized(OAuthTokenSet),

    /// Not a redirect the flow cares about
    Ignored,
}

/// Classify a navigated URL and pull tokens out of it.
///
/// Fails with [`ApiClientError::AuthorizationFailed`] when the URL carries
/// an access token but the token set cannot be completed.
pub fn parse_redirect(url: &str, mode: ParseMode) -> Result<RedirectOutcome> {
    if url.contains("error") {
        return Ok(RedirectOutcome::Denied {
            description: error_description(url),
        });
    }

    if !url.contains("access_token") {
        return Ok(RedirectOutcome::Ignored);
    }

    let pairs = parameters(url);
    let tokens = match mode {
        ParseMode::Strict => strict_tokens(&pairs)?,
        ParseMode::Positional => positional_tokens(&pairs)?,
    };

    Ok(RedirectOutcome::Authorized(tokens))
}

/// Ordered key/value pairs of the fragment, or of the query without one
fn parameters(url: &str) -> Vec<(String, String)> {
    let section = match url.split_once('#') {
        Some((_, fragment)) => fragment,
        None => url.split_once('?').map_or("", |(_, query)| query),
    };

    form_urlencoded::parse(section.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

fn strict_tokens(pairs: &[(String, String)]) -> Result<OAuthTokenSet> {
    let lookup = |token: OAuthToken| {
        pairs
            .iter()
            .find(|(key, _)| key == token.key())
            .map(|(_, value)| value.clone())
            .ok_or_else(|| ApiClientError::AuthorizationFailed {
                reason: format!("redirect is missing {}", token.key()),
            })
    };

    Ok(OAuthTokenSet::new(
        lookup(OAuthToken::AccessToken)?,
        lookup(OAuthToken::ExpiresIn)?,
        lookup(OAuthToken::UserId)?,
    ))
}

fn positional_tokens(pairs: &[(String, String)]) -> Result<OAuthTokenSet> {
    match pairs {
        [(_, access), (_, expires), (_, user), ..] => {
            Ok(OAuthTokenSet::new(access.clone(), expires.clone(), user.clone()))
        }
        _ => Err(ApiClientError::AuthorizationFailed {
            reason: format!("expected 3 redirect parameters, found {}", pairs.len()),
        }),
    }
}

/// Text after `error_description=` up to the next `&`, decoded
fn error_description(url: &str) -> String {
    let Some((_, rest)) = url.split_once("error_description=") else {
        return String::new();
    };
    let raw = rest.split('&').next().unwrap_or_default();

    // Reuse the form decoder for `%XX` and `+`
    form_urlencoded::parse(format!("d={}", raw).as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}
