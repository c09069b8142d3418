//! Application configuration.
//!
//! Everything has a default, so the binary runs without a config file as
//! long as `model.json` and `vectorizer.json` sit in the working directory.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable overriding `feed.base_url`
pub const FEED_URL_ENV: &str = "SENTIMENT_FEED_URL";

/// Number of posts fetched per username
pub const DEFAULT_POST_COUNT: usize = 5;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub artifacts: ArtifactConfig,
    pub stopwords: StopwordConfig,
    pub feed: FeedConfig,
}

/// Locations of the trained artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Serialized classifier
    pub model_path: PathBuf,
    /// Serialized vectorizer
    pub vectorizer_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.json"),
            vectorizer_path: PathBuf::from("vectorizer.json"),
        }
    }
}

/// Stopword configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwordConfig {
    pub source: StopwordSource,
}

/// Where the stopword list comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StopwordSource {
    /// Embedded English list
    #[default]
    Builtin,
    /// One word per line
    File { path: PathBuf },
    /// No stopwords
    None,
}

impl FromStr for StopwordSource {
    type Err = std::convert::Infallible;

    /// `builtin`, `none`, or a path to a word list
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "builtin" => StopwordSource::Builtin,
            "none" => StopwordSource::None,
            path => StopwordSource::File {
                path: PathBuf::from(path),
            },
        })
    }
}

/// Remote feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the post service
    pub base_url: String,
    /// Posts requested per username
    pub post_count: usize,
    /// Upper bound on a whole fetch, in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            post_count: DEFAULT_POST_COUNT,
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file, then apply environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let mut config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(FEED_URL_ENV) {
            if !url.trim().is_empty() {
                self.feed.base_url = url.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.feed.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "feed.base_url must be an http(s) URL, got {:?}",
                self.feed.base_url
            )));
        }
        if self.feed.post_count == 0 {
            return Err(Error::Config("feed.post_count must be positive".into()));
        }
        if self.feed.timeout_secs == 0 {
            return Err(Error::Config("feed.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
