//! Post feeds
//!
//! A feed returns the most recent posts of a user as an explicit
//! [`FetchOutcome`] instead of an error the caller has to guess at.

use crate::models::Post;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch produced no posts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("feed returned no posts")]
    EmptyFeed,

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed feed payload: {0}")]
    Malformed(String),
}

/// Result of a fetch: posts, or the reason there are none
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Posts(Vec<Post>),
    Failed(FetchFailure),
}

impl FetchOutcome {
    /// Wrap fetched posts; an empty list counts as a failure
    pub fn from_posts(posts: Vec<Post>) -> Self {
        if posts.is_empty() {
            FetchOutcome::Failed(FetchFailure::EmptyFeed)
        } else {
            FetchOutcome::Posts(posts)
        }
    }

    pub fn into_result(self) -> Result<Vec<Post>, FetchFailure> {
        match self {
            FetchOutcome::Posts(posts) => Ok(posts),
            FetchOutcome::Failed(reason) => Err(reason),
        }
    }
}

impl From<Result<Vec<Post>, FetchFailure>> for FetchOutcome {
    fn from(result: Result<Vec<Post>, FetchFailure>) -> Self {
        match result {
            Ok(posts) => FetchOutcome::from_posts(posts),
            Err(reason) => FetchOutcome::Failed(reason),
        }
    }
}

/// Source of recent posts for a username
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch up to `count` recent posts of `username`
    async fn fetch_recent(&self, username: &str, count: usize) -> FetchOutcome;

    /// Name used in logs
    fn source(&self) -> &str;
}

/// In-memory feed for tests and offline demos
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    users: HashMap<String, Vec<Post>>,
    delay: Option<Duration>,
}

impl StaticFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with their posts, newest first
    pub fn with_user(mut self, username: &str, posts: Vec<Post>) -> Self {
        self.users.insert(username.to_lowercase(), posts);
        self
    }

    /// Delay every fetch, e.g. to exercise timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl FeedFetcher for StaticFeed {
    async fn fetch_recent(&self, username: &str, count: usize) -> FetchOutcome {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.users.get(&username.to_lowercase()) {
            Some(posts) => FetchOutcome::from_posts(posts.iter().take(count).cloned().collect()),
            None => FetchOutcome::Failed(FetchFailure::UnknownUser(username.to_string())),
        }
    }

    fn source(&self) -> &str {
        "static"
    }
}
