//! Sentiment classifier
//!
//! Normalizes text, vectorizes it and maps the classifier output to a label

use crate::error::{Error, Result};
use crate::models::{LabelMapping, SentimentLabel};
use crate::nlp::{TextNormalizer, Vectorizer};
use crate::sentiment::artifacts::LoadedArtifacts;
use crate::sentiment::Classifier;
use tracing::debug;

/// Vectorizer + classifier pair behind a text-in, label-out interface
pub struct SentimentClassifier {
    normalizer: TextNormalizer,
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
    labels: LabelMapping,
}

impl SentimentClassifier {
    /// Assemble a classifier; the two models must agree on the feature size
    pub fn new(
        normalizer: TextNormalizer,
        vectorizer: Box<dyn Vectorizer>,
        classifier: Box<dyn Classifier>,
        labels: LabelMapping,
    ) -> Result<Self> {
        if vectorizer.dimension() != classifier.dimension() {
            return Err(Error::Startup(format!(
                "vectorizer produces {} features but the classifier expects {}",
                vectorizer.dimension(),
                classifier.dimension()
            )));
        }
        if !labels.is_valid() {
            return Err(Error::Startup(format!(
                "label mapping {:?} is not a binary convention",
                labels
            )));
        }

        Ok(Self {
            normalizer,
            vectorizer,
            classifier,
            labels,
        })
    }

    /// Build from loaded artifacts
    pub fn from_artifacts(normalizer: TextNormalizer, artifacts: LoadedArtifacts) -> Result<Self> {
        let LoadedArtifacts { vectorizer, model } = artifacts;
        Self::new(
            normalizer,
            Box::new(vectorizer),
            Box::new(model.classifier),
            model.labels,
        )
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn dimension(&self) -> usize {
        self.vectorizer.dimension()
    }

    /// Label an already normalized token string.
    ///
    /// An empty string is a valid input: it becomes an all-zero vector and
    /// the classifier decides on its intercept alone.
    pub fn predict(&self, normalized: &str) -> SentimentLabel {
        let features = self.vectorizer.transform(normalized);
        let class = self.classifier.predict(&features);
        self.labels.label_for(class)
    }

    /// Validate, normalize and label raw text
    pub fn analyze(&self, raw: &str) -> Result<SentimentLabel> {
        let raw = Self::validate_input(raw)?;
        let normalized = self.normalizer.normalize(raw);
        let label = self.predict(&normalized);

        debug!("{:?} -> {:?} -> {}", raw, normalized, label);
        Ok(label)
    }

    /// Reject input that cannot be meaningfully classified
    pub fn validate_input(raw: &str) -> Result<&str> {
        if raw.trim().is_empty() {
            return Err(Error::InvalidInput(
                "enter some text to analyze".to_string(),
            ));
        }
        if raw.contains('\0') {
            return Err(Error::InvalidInput(
                "text contains a NUL character".to_string(),
            ));
        }
        Ok(raw)
    }
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("normalizer", &self.normalizer)
            .field("dimension", &self.dimension())
            .field("labels", &self.labels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureVector;
    use crate::nlp::StopwordSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// One column per known word, counts only
    struct WordCounter {
        words: Vec<&'static str>,
    }

    impl Vectorizer for WordCounter {
        fn transform(&self, text: &str) -> FeatureVector {
            self.words
                .iter()
                .map(|w| text.split(' ').filter(|t| t == w).count() as f64)
                .collect()
        }

        fn dimension(&self) -> usize {
            self.words.len()
        }
    }

    /// Class 1 when the first column outweighs the second
    struct FirstBeatsSecond {
        calls: Arc<AtomicUsize>,
    }

    impl Classifier for FirstBeatsSecond {
        fn predict(&self, features: &[f64]) -> u8 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            u8::from(features[0] > features[1])
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    fn classifier_with(stopwords: StopwordSet) -> (SentimentClassifier, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let classifier = SentimentClassifier::new(
            TextNormalizer::new(stopwords),
            Box::new(WordCounter {
                words: vec!["love", "hate"],
            }),
            Box::new(FirstBeatsSecond {
                calls: Arc::clone(&calls),
            }),
            LabelMapping::default(),
        )
        .unwrap();
        (classifier, calls)
    }

    #[test]
    fn test_analyze_positive() {
        let (classifier, _) = classifier_with(StopwordSet::from_words(["this"]));
        assert_eq!(classifier.analyze("I love this!!!").unwrap(), SentimentLabel::Positive);
        assert_eq!(classifier.analyze("I HATE this").unwrap(), SentimentLabel::Negative);
    }

    #[test]
    fn test_letter_free_text_is_classified() {
        let (classifier, calls) = classifier_with(StopwordSet::english());
        assert_eq!(classifier.analyze("12345").unwrap(), SentimentLabel::Negative);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_blank_input_never_reaches_model() {
        let (classifier, calls) = classifier_with(StopwordSet::english());

        for input in ["", "   ", "\n\t"] {
            let err = classifier.analyze(input).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
        }
        assert!(classifier.analyze("a\0b").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let (classifier, _) = classifier_with(StopwordSet::empty());
        let first = classifier.predict("love love hate");
        for _ in 0..20 {
            assert_eq!(classifier.predict("love love hate"), first);
        }
    }

    #[test]
    fn test_swapped_label_convention() {
        let classifier = SentimentClassifier::new(
            TextNormalizer::default(),
            Box::new(WordCounter {
                words: vec!["love", "hate"],
            }),
            Box::new(FirstBeatsSecond {
                calls: Arc::new(AtomicUsize::new(0)),
            }),
            LabelMapping {
                negative: 1,
                positive: 0,
            },
        )
        .unwrap();

        assert_eq!(classifier.predict("love"), SentimentLabel::Negative);
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = SentimentClassifier::new(
            TextNormalizer::default(),
            Box::new(WordCounter {
                words: vec!["love"],
            }),
            Box::new(FirstBeatsSecond {
                calls: Arc::new(AtomicUsize::new(0)),
            }),
            LabelMapping::default(),
        );
        assert!(matches!(result, Err(Error::Startup(_))));
    }
}
