//! Process-wide state, built once at startup

use crate::api::{FeedFetcher, HttpFeedClient};
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::DisplayRecord;
use crate::nlp::{StopwordSet, TextNormalizer};
use crate::presenter::ResultPresenter;
use crate::sentiment::{load_artifacts, SentimentClassifier};
use tracing::info;

/// Everything a user action needs, immutable after construction
pub struct AppState {
    config: AppConfig,
    classifier: SentimentClassifier,
    fetcher: Box<dyn FeedFetcher>,
}

impl AppState {
    /// Build the state in a fixed order: stopwords, artifacts, feed client.
    ///
    /// Missing or inconsistent artifacts fail with `Error::Startup`; nothing
    /// is served in that case.
    pub fn initialize(config: AppConfig) -> Result<Self> {
        let stopwords = StopwordSet::load(&config.stopwords.source);
        info!("Stopwords ready ({} words)", stopwords.len());

        let artifacts = load_artifacts(&config.artifacts)?;
        let classifier =
            SentimentClassifier::from_artifacts(TextNormalizer::new(stopwords), artifacts)?;
        info!("Classifier ready ({} features)", classifier.dimension());

        let fetcher = HttpFeedClient::new(&config.feed)?;
        info!("Feed client ready ({})", fetcher.source());

        Ok(Self::with_parts(config, classifier, Box::new(fetcher)))
    }

    /// Assemble from ready-made parts, e.g. a fake feed in tests
    pub fn with_parts(
        config: AppConfig,
        classifier: SentimentClassifier,
        fetcher: Box<dyn FeedFetcher>,
    ) -> Self {
        Self {
            config,
            classifier,
            fetcher,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    pub fn fetcher(&self) -> &dyn FeedFetcher {
        self.fetcher.as_ref()
    }

    /// Classify one manually entered text
    pub fn analyze_text(&self, raw: &str) -> Result<DisplayRecord> {
        let label = self.classifier.analyze(raw)?;
        Ok(ResultPresenter::present(raw, label))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("classifier", &self.classifier)
            .field("feed", &self.fetcher.source())
            .finish()
    }
}
