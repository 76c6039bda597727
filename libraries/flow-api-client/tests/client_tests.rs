//! Tests for the Flow Player API client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real service connection.

use flow_api_client::{
    parse_redirect, ApiClient, ApiClientError, ApiConfig, CatalogSource, ParseMode,
    RedirectOutcome,
};
use flow_core::{Genre, OAuthTokenSet, SearchQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_tokens() -> OAuthTokenSet {
    OAuthTokenSet::new("secret_token", "0", "42")
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::with_base_url(format!("{}/method", server.uri()))).unwrap()
}

fn catalog_body() -> String {
    r#"<?xml version="1.0" encoding="utf-8"?>
<response list="true">
  <count>4</count>
  <audio>
    <aid>1</aid>
    <artist>Daft Punk</artist>
    <title>Contact</title>
    <duration>381</duration>
    <url>https://cs1.example/contact.mp3</url>
  </audio>
  <audio>
    <artist>Burial</artist>
    <title>Archangel</title>
    <duration>238</duration>
    <url>https://cs1.example/archangel.mp3</url>
  </audio>
  <audio>
    <artist></artist>
    <title>Untitled</title>
    <duration>100</duration>
    <url>https://cs1.example/untitled.mp3</url>
  </audio>
  <audio>
    <artist>Boards of Canada</artist>
    <title>Roygbiv</title>
    <duration>151</duration>
    <url>https://cs1.example/roygbiv.mp3</url>
  </audio>
</response>"#
        .to_string()
}

// =============================================================================
// Authorization Tests
// =============================================================================

mod authorization {
    use super::*;

    #[test]
    fn test_redirect_with_tokens() {
        let outcome = parse_redirect(
            "https://oauth.vk.com/blank.html#access_token=AAA&expires_in=3600&user_id=42",
            ParseMode::Strict,
        )
        .unwrap();

        match outcome {
            RedirectOutcome::Authorized(tokens) => {
                assert_eq!(tokens.access_token, "AAA");
                assert_eq!(tokens.expires_in, "3600");
                assert_eq!(tokens.user_id, "42");
            }
            other => panic!("Expected tokens, got: {:?}", other),
        }
    }

    #[test]
    fn test_redirect_positional_matches_strict_for_canonical_order() {
        let url = "https://oauth.vk.com/blank.html#access_token=AAA&expires_in=3600&user_id=42";
        assert_eq!(
            parse_redirect(url, ParseMode::Strict).unwrap(),
            parse_redirect(url, ParseMode::Positional).unwrap()
        );
    }

    #[test]
    fn test_authorize_url_from_client() {
        let client = ApiClient::new(ApiConfig::default()).unwrap();
        let url = client.authorize_url().unwrap().to_string();
        assert!(url.starts_with("https://oauth.vk.com/authorize?client_id=4809611"));
        assert!(url.ends_with("&response_type=token"));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let rendered = format!("{:?}", test_tokens());
        assert!(!rendered.contains("secret_token"));
    }
}

// =============================================================================
// Playlist Fetch Tests
// =============================================================================

mod playlists {
    use super::*;

    #[tokio::test]
    async fn test_fetch_owned() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/method/audio.get.xml"))
            .and(query_param("uid", "42"))
            .and(query_param("access_token", "secret_token"))
            .and(query_param("v", "5.28"))
            .respond_with(ResponseTemplate::new(200).set_body_string(catalog_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let tracks = client.fetch_owned(&test_tokens()).await.unwrap();

        // The record with an empty artist is dropped
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0].display_title(), "Daft Punk - Contact");
        assert_eq!(tracks[1].duration_secs(), 238);
        assert_eq!(tracks[2].source_url, "https://cs1.example/roygbiv.mp3");
    }

    #[tokio::test]
    async fn test_fetch_suggested() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/method/audio.getRecommendations.xml"))
            .and(query_param("count", "500"))
            .respond_with(ResponseTemplate::new(200).set_body_string(catalog_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let tracks = client.fetch_suggested(&test_tokens()).await.unwrap();
        assert_eq!(tracks.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_popular_by_genre() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/method/audio.getPopular.xml"))
            .and(query_param("genre_id", "10"))
            .and(query_param("count", "500"))
            .respond_with(ResponseTemplate::new(200).set_body_string(catalog_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let tracks = client
            .fetch_popular(&test_tokens(), Genre::DrumAndBass)
            .await
            .unwrap();
        assert_eq!(tracks.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_search_encodes_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/method/audio.search.xml"))
            .and(query_param("q", "Simon & Garfunkel"))
            .and(query_param("performer_only", "1"))
            .and(query_param("count", "300"))
            .respond_with(ResponseTemplate::new(200).set_body_string(catalog_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let query = SearchQuery::new("Simon & Garfunkel").artist_only(true);
        let tracks = client.fetch_search(&test_tokens(), &query).await.unwrap();
        assert_eq!(tracks.len(), 3);
    }

    #[tokio::test]
    async fn test_service_error_document_is_empty_playlist() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/method/audio.get.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<error><error_code>5</error_code><error_msg>User authorization failed</error_msg></error>",
            ))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let tracks = client.fetch_owned(&test_tokens()).await.unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_document_is_fetch_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/method/audio.get.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<response><audio>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        match client.fetch_owned(&test_tokens()).await.unwrap_err() {
            ApiClientError::FetchFailed { cause } => {
                assert!(cause.contains("parse"));
            }
            e => panic!("Expected FetchFailed, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_http_error_is_fetch_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/method/audio.get.xml"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        match client.fetch_owned(&test_tokens()).await.unwrap_err() {
            ApiClientError::FetchFailed { cause } => {
                assert!(cause.contains("500"));
            }
            e => panic!("Expected FetchFailed, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_fetch_failure() {
        let client = ApiClient::new(ApiConfig::with_base_url("http://127.0.0.1:9")).unwrap();
        assert!(matches!(
            client.fetch_owned(&test_tokens()).await,
            Err(ApiClientError::FetchFailed { .. })
        ));
    }
}

// =============================================================================
// Download Tests
// =============================================================================

mod downloads {
    use super::*;

    #[tokio::test]
    async fn test_download_reports_progress() {
        let mock_server = MockServer::start().await;
        let payload = vec![7u8; 4096];

        Mock::given(method("GET"))
            .and(path("/audio/track.mp3"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let locator = format!("{}/audio/track.mp3", mock_server.uri());

        let mut last_progress = None;
        let body = client
            .download_with_progress(&locator, |p| last_progress = Some(p))
            .await
            .unwrap();

        assert_eq!(body, payload);
        let progress = last_progress.expect("progress reported");
        assert_eq!(progress.bytes_received, 4096);
        assert_eq!(progress.bytes_total, Some(4096));
        assert!((progress.progress - 1.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_download_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/audio/missing.mp3"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let locator = format!("{}/audio/missing.mp3", mock_server.uri());

        match client.download(&locator).await.unwrap_err() {
            ApiClientError::DownloadFailed { cause } => {
                assert!(cause.contains("404"));
            }
            e => panic!("Expected DownloadFailed, got: {:?}", e),
        }
    }
}
