//! Fetch a user's recent posts and label each of them

use crate::api::{FetchFailure, FetchOutcome};
use crate::app::AppState;
use crate::error::{Error, Result};
use crate::models::FeedReport;
use crate::presenter::ResultPresenter;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Trim a username and drop a leading `@`
pub fn normalize_username(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    let name = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("enter a username".to_string()));
    }
    Ok(name)
}

/// Fetch and classify the most recent posts of `username`.
///
/// Fetch problems never surface as errors. Network failures, unknown users,
/// empty feeds and timeouts are logged and reported as
/// [`FeedReport::NoResults`]. Only a blank username is an error.
pub async fn analyze_feed(state: &AppState, username: &str) -> Result<FeedReport> {
    let username = normalize_username(username)?;
    let feed = &state.config().feed;
    let fetcher = state.fetcher();

    info!(
        "Fetching up to {} posts of {} from {}",
        feed.post_count,
        username,
        fetcher.source()
    );

    let outcome = match timeout(feed.timeout(), fetcher.fetch_recent(username, feed.post_count)).await {
        Ok(outcome) => outcome,
        Err(_) => FetchOutcome::Failed(FetchFailure::Timeout(feed.timeout())),
    };

    let posts = match outcome.into_result() {
        Ok(posts) => posts,
        Err(reason) => {
            warn!("No posts for {}: {}", username, reason);
            return Ok(FeedReport::NoResults);
        }
    };

    let classifier = state.classifier();
    let records: Vec<_> = posts
        .iter()
        .take(feed.post_count)
        .filter_map(|post| post.body())
        .map(|text| {
            let label = classifier.predict(&classifier.normalizer().normalize(text));
            ResultPresenter::present(text, label)
        })
        .collect();

    debug!(
        "{} of {} posts had text to classify",
        records.len(),
        posts.len()
    );
    Ok(FeedReport::Cards(records))
}
