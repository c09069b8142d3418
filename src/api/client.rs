//! HTTP client for the post service
//!
//! Expects `GET {base_url}/{username}/tweets?limit={count}` to answer with
//! `{"tweets": [{"text": ..., "link": ..., "date": ...}]}`.

use crate::api::feed::{FeedFetcher, FetchFailure, FetchOutcome};
use crate::config::FeedConfig;
use crate::error::{Error, Result};
use crate::models::Post;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Client for a post service speaking the feed JSON format
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpFeedClient {
    /// Create a client from the feed configuration
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            Error::Config(format!("invalid feed.base_url {:?}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "feed.base_url {} cannot carry a path",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("sentiment_cards/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Startup(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout(),
        })
    }

    /// URL of a user's post listing
    pub fn feed_url(&self, username: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(username).push("tweets");
        }
        url
    }

    async fn request(&self, username: &str, count: usize) -> std::result::Result<Vec<Post>, FetchFailure> {
        let url = self.feed_url(username);
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(&[("limit", count.to_string())])
            .send()
            .await
            .map_err(|e| self.transport_failure(e))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(FetchFailure::UnknownUser(username.to_string())),
            status if !status.is_success() => {
                return Err(FetchFailure::Network(format!("HTTP {}", status)))
            }
            _ => {}
        }

        let body = response.text().await.map_err(|e| self.transport_failure(e))?;
        let payload: FeedResponse =
            serde_json::from_str(&body).map_err(|e| FetchFailure::Malformed(e.to_string()))?;

        Ok(payload.tweets.into_iter().take(count).collect())
    }

    fn transport_failure(&self, e: reqwest::Error) -> FetchFailure {
        if e.is_timeout() {
            FetchFailure::Timeout(self.timeout)
        } else {
            FetchFailure::Network(e.to_string())
        }
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedClient {
    async fn fetch_recent(&self, username: &str, count: usize) -> FetchOutcome {
        self.request(username, count).await.into()
    }

    fn source(&self) -> &str {
        self.base_url.as_str()
    }
}

// ============= API Response Types =============

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    tweets: Vec<Post>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer every connection with the same status line and body
    async fn serve(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    fn client_for(base_url: &str) -> HttpFeedClient {
        HttpFeedClient::new(&FeedConfig {
            base_url: base_url.to_string(),
            ..FeedConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_feed_url() {
        let client = client_for("http://localhost:8080");
        assert_eq!(
            client.feed_url("alice").as_str(),
            "http://localhost:8080/alice/tweets"
        );

        let client = client_for("https://posts.example.com/api/");
        assert_eq!(
            client.feed_url("bob").as_str(),
            "https://posts.example.com/api/bob/tweets"
        );
    }

    #[test]
    fn test_feed_url_escapes_username() {
        let client = client_for("http://localhost:8080");
        assert_eq!(
            client.feed_url("a/b c").as_str(),
            "http://localhost:8080/a%2Fb%20c/tweets"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpFeedClient::new(&FeedConfig {
            base_url: "not a url".to_string(),
            ..FeedConfig::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"tweets": [{"text": "hello", "link": "https://x/1"}, {"link": "https://x/2"}]}"#;
        let payload: FeedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(payload.tweets.len(), 2);
        assert_eq!(payload.tweets[0].body(), Some("hello"));
        assert_eq!(payload.tweets[1].body(), None);

        let payload: FeedResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.tweets.is_empty());
    }

    #[tokio::test]
    async fn test_posts_returned() {
        let base = serve("200 OK", r#"{"tweets": [{"text": "hello"}, {"text": "again"}]}"#).await;
        match client_for(&base).fetch_recent("alice", 1).await {
            FetchOutcome::Posts(posts) => assert_eq!(posts, vec![Post::with_text("hello")]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_is_unknown_user() {
        let base = serve("404 Not Found", "").await;
        assert_eq!(
            client_for(&base).fetch_recent("ghost", 5).await,
            FetchOutcome::Failed(FetchFailure::UnknownUser("ghost".into()))
        );
    }

    #[tokio::test]
    async fn test_server_error_is_network_failure() {
        let base = serve("500 Internal Server Error", "oops").await;
        match client_for(&base).fetch_recent("alice", 5).await {
            FetchOutcome::Failed(FetchFailure::Network(message)) => assert!(message.contains("500")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_malformed() {
        let base = serve("200 OK", "<html>not json</html>").await;
        assert!(matches!(
            client_for(&base).fetch_recent("alice", 5).await,
            FetchOutcome::Failed(FetchFailure::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_listing_is_empty_feed() {
        let base = serve("200 OK", r#"{"tweets": []}"#).await;
        assert_eq!(
            client_for(&base).fetch_recent("alice", 5).await,
            FetchOutcome::Failed(FetchFailure::EmptyFeed)
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_failure() {
        // Nothing listens on port 9 (discard) locally
        let client = client_for("http://127.0.0.1:9");
        match client.fetch_recent("alice", 5).await {
            FetchOutcome::Failed(FetchFailure::Network(_)) | FetchOutcome::Failed(FetchFailure::Timeout(_)) => {}
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
