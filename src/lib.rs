//! # Sentiment cards
//!
//! Labels short social-media texts as positive or negative with a trained
//! TF-IDF + logistic regression model and renders each result as a colored
//! card.
//!
//! ## Modules
//!
//! - `nlp` - Normalization, stopwords and TF-IDF
//! - `sentiment` - Classifier, artifacts and training
//! - `api` - Post feeds
//! - `presenter` - Cards, banners and notices
//! - `app` - Startup state, feed analysis and the interactive menu
//! - `config` - Configuration
//! - `models` - Shared data types

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod nlp;
pub mod presenter;
pub mod sentiment;

pub use api::{FeedFetcher, FetchFailure, FetchOutcome, HttpFeedClient, StaticFeed};
pub use app::{analyze_feed, run_interactive, AppState};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use models::{DisplayRecord, FeedReport, Post, SentimentLabel};
pub use nlp::{normalize, StopwordSet, TextNormalizer};
pub use presenter::{OutputFormat, ResultPresenter, NO_RESULTS_MESSAGE};
pub use sentiment::SentimentClassifier;
