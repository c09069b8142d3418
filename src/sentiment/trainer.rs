//! Training of the vectorizer + classifier pair
//!
//! Reads a `label<TAB>text` corpus (label `0` negative, `1` positive),
//! normalizes it exactly like the serving path, fits TF-IDF and logistic
//! regression and reports holdout accuracy.

use crate::error::{Error, Result};
use crate::models::{LabelMapping, SentimentLabel};
use crate::nlp::{TextNormalizer, TfIdfVectorizer, Vectorizer};
use crate::sentiment::artifacts::ModelArtifact;
use crate::sentiment::{LogisticRegression, TrainingParams};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

/// One labeled training text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledText {
    pub label: SentimentLabel,
    pub text: String,
}

/// Parse a TSV corpus. Blank lines and `#` comments are skipped.
pub fn parse_corpus(content: &str) -> Result<Vec<LabeledText>> {
    let mapping = LabelMapping::default();
    let mut corpus = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let (label, text) = line.split_once('\t').ok_or_else(|| {
            Error::InvalidInput(format!("line {}: expected <label>\\t<text>", line_no))
        })?;

        let class: u8 = label.trim().parse().map_err(|_| {
            Error::InvalidInput(format!("line {}: label {:?} is not 0 or 1", line_no, label))
        })?;
        let label = match class {
            c if c == mapping.negative => SentimentLabel::Negative,
            c if c == mapping.positive => SentimentLabel::Positive,
            _ => {
                return Err(Error::InvalidInput(format!(
                    "line {}: label {} is not 0 or 1",
                    line_no, class
                )))
            }
        };

        corpus.push(LabeledText {
            label,
            text: text.to_string(),
        });
    }

    Ok(corpus)
}

/// Read a TSV corpus from disk
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledText>> {
    let content = fs::read_to_string(path)?;
    parse_corpus(&content)
}

/// Outcome of a training run
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub train_size: usize,
    pub holdout_size: usize,
    pub vocabulary_size: usize,
    pub iterations: usize,
    pub final_cost: f64,
    pub train_accuracy: f64,
    pub holdout_accuracy: Option<f64>,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trained on {} texts ({} held out), vocabulary {} terms",
            self.train_size, self.holdout_size, self.vocabulary_size
        )?;
        writeln!(
            f,
            "Gradient descent: {} iterations, final cost {:.4}",
            self.iterations, self.final_cost
        )?;
        write!(f, "Train accuracy: {:.1}%", self.train_accuracy * 100.0)?;
        if let Some(acc) = self.holdout_accuracy {
            write!(f, "\nHoldout accuracy: {:.1}%", acc * 100.0)?;
        }
        Ok(())
    }
}

/// Fits artifacts from a labeled corpus
#[derive(Debug, Clone)]
pub struct Trainer {
    normalizer: TextNormalizer,
    params: TrainingParams,
    /// Fraction of the corpus kept for evaluation
    holdout: f64,
    seed: u64,
    min_df: usize,
}

impl Trainer {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self {
            normalizer,
            params: TrainingParams::default(),
            holdout: 0.2,
            seed: 42,
            min_df: 1,
        }
    }

    pub fn with_params(mut self, params: TrainingParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_holdout(mut self, holdout: f64) -> Self {
        self.holdout = holdout.clamp(0.0, 0.9);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// Shuffle and split into (train, holdout)
    fn split<'a>(&self, corpus: &'a [LabeledText]) -> (Vec<&'a LabeledText>, Vec<&'a LabeledText>) {
        let mut items: Vec<&LabeledText> = corpus.iter().collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        items.shuffle(&mut rng);

        let holdout_len = (corpus.len() as f64 * self.holdout).floor() as usize;
        let holdout = items.split_off(items.len() - holdout_len);
        (items, holdout)
    }

    /// Fit vectorizer and classifier
    pub fn train(
        &self,
        corpus: &[LabeledText],
    ) -> Result<(TfIdfVectorizer, ModelArtifact, TrainingReport)> {
        let labels = LabelMapping::default();
        let (train, holdout) = self.split(corpus);

        let prepare = |items: &[&LabeledText]| -> (Vec<String>, Vec<u8>) {
            items
                .iter()
                .map(|item| (self.normalizer.normalize(&item.text), labels.class_for(item.label)))
                .unzip()
        };

        let (train_docs, train_targets) = prepare(&train);
        let (holdout_docs, holdout_targets) = prepare(&holdout);

        let mut vectorizer = TfIdfVectorizer::new().with_min_df(self.min_df);
        let train_x = vectorizer.fit_transform(&train_docs);
        let (classifier, history) =
            LogisticRegression::fit(&train_x, &train_targets, &self.params)?;

        let holdout_accuracy = if holdout_docs.is_empty() {
            None
        } else {
            let holdout_x: Vec<_> = holdout_docs
                .iter()
                .map(|doc| vectorizer.transform(doc))
                .collect();
            Some(classifier.score(&holdout_x, &holdout_targets))
        };

        let report = TrainingReport {
            train_size: train_docs.len(),
            holdout_size: holdout_docs.len(),
            vocabulary_size: vectorizer.terms().len(),
            iterations: history.len(),
            final_cost: history.last().copied().unwrap_or(0.0),
            train_accuracy: classifier.score(&train_x, &train_targets),
            holdout_accuracy,
        };
        info!(
            "Training finished: {} terms, train accuracy {:.3}",
            report.vocabulary_size, report.train_accuracy
        );

        Ok((vectorizer, ModelArtifact { labels, classifier }, report))
    }
}
