//! Flow Player API Client
//!
//! Client library for the remote music service.
//!
//! # Features
//!
//! - **Authorization**: Build the login URL, parse the redirect into tokens
//! - **Playlists**: Owned, suggested, popular-by-genre and search results
//! - **Catalog parsing**: XML documents into validated tracks
//! - **Download**: Fetch track media with progress reporting
//!
//! # Example
//!
//! ```ignore
//! use flow_api_client::{ApiClient, ApiConfig, CatalogSource, RedirectOutcome};
//! use flow_core::Genre;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ApiConfig::default())?;
//!
//!     // Send the user here, then hand back the URL they land on
//!     println!("{}", client.authorize_url()?);
//!
//!     let redirect = "https://oauth.vk.com/blank.html#access_token=..&expires_in=0&user_id=..";
//!     if let RedirectOutcome::Authorized(tokens) = client.handle_redirect(redirect)? {
//!         let rock = client.fetch_popular(&tokens, Genre::Rock).await?;
//!         println!("Found {} tracks", rock.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod catalog;
mod client;
mod download;
mod error;
mod oauth;
mod playlists;
mod source;
mod types;

// Re-export main types
pub use auth::authorize_url;
pub use catalog::parse_catalog;
pub use client::ApiClient;
pub use error::{ApiClientError, Result};
pub use oauth::{parse_redirect, RedirectOutcome};
pub use source::CatalogSource;
pub use types::{ApiConfig, DownloadProgress, ParseMode};

// Re-export sub-clients for direct use if needed
pub use download::DownloadClient;
pub use playlists::PlaylistClient;
