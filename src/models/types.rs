//! Types for labels, result cards and fetched posts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense feature vector produced by a vectorizer
pub type FeatureVector = Vec<f64>;

/// Sentiment of a single text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Positive sentiment
    Positive,
    /// Negative sentiment
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
        }
    }

    /// Card color for this label
    pub fn color(&self) -> ColorToken {
        match self {
            SentimentLabel::Positive => ColorToken::Affirmative,
            SentimentLabel::Negative => ColorToken::Alert,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary class convention of a trained classifier.
///
/// The convention is fixed when the model is trained and cannot be
/// recovered from the weights, so it travels with the model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMapping {
    /// Class emitted for negative texts
    pub negative: u8,
    /// Class emitted for positive texts
    pub positive: u8,
}

impl LabelMapping {
    /// A mapping is usable only when both classes are binary and distinct
    pub fn is_valid(&self) -> bool {
        self.negative != self.positive && self.negative <= 1 && self.positive <= 1
    }

    /// Map a classifier output onto a label.
    ///
    /// Anything other than the positive class reads as negative, so the
    /// result is always one of the two labels.
    pub fn label_for(&self, class: u8) -> SentimentLabel {
        if class == self.positive {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        }
    }

    /// Class the classifier is trained to emit for a label
    pub fn class_for(&self, label: SentimentLabel) -> u8 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
        }
    }
}

impl Default for LabelMapping {
    fn default() -> Self {
        Self {
            negative: 0,
            positive: 1,
        }
    }
}

/// Card background color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    /// Green, used for positive results
    Affirmative,
    /// Red, used for negative results
    Alert,
}

impl ColorToken {
    pub fn hex(&self) -> &'static str {
        match self {
            ColorToken::Affirmative => "#2ECC71",
            ColorToken::Alert => "#E74C3C",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ColorToken::Affirmative => (0x2E, 0xCC, 0x71),
            ColorToken::Alert => (0xE7, 0x4C, 0x3C),
        }
    }
}

/// One rendered result: the text, its label and the card color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub label: SentimentLabel,
    pub text: String,
    pub color: ColorToken,
}

impl DisplayRecord {
    /// Card heading, e.g. "Positive Sentiment"
    pub fn heading(&self) -> String {
        format!("{} Sentiment", self.label)
    }
}

/// What a username fetch renders to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedReport {
    /// The fetch failed or the feed was empty
    NoResults,
    /// One card per post with text, in feed order
    Cards(Vec<DisplayRecord>),
}

impl FeedReport {
    pub fn records(&self) -> &[DisplayRecord] {
        match self {
            FeedReport::NoResults => &[],
            FeedReport::Cards(records) => records,
        }
    }

    pub fn is_no_results(&self) -> bool {
        matches!(self, FeedReport::NoResults)
    }
}

/// A post returned by a feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post body; missing or empty for media-only posts
    #[serde(default)]
    pub text: Option<String>,
    /// Permalink
    #[serde(default)]
    pub link: Option<String>,
    /// Publication date as reported by the feed
    #[serde(default)]
    pub date: Option<String>,
}

impl Post {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Body text, or `None` when it is missing or empty
    pub fn body(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}
