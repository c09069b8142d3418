//! Post feeds
//!
//! Provides:
//! - The [`FeedFetcher`] seam and its tagged [`FetchOutcome`]
//! - An HTTP client for a JSON post service
//! - An in-memory feed

mod client;
mod feed;

pub use client::HttpFeedClient;
pub use feed::{FeedFetcher, FetchFailure, FetchOutcome, StaticFeed};
