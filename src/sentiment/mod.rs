//! Sentiment classification
//!
//! Includes:
//! - Logistic regression over TF-IDF features
//! - Artifact persistence
//! - The text-to-label classifier used by the app
//! - Training from a labeled corpus

pub mod artifacts;
mod classifier;
mod pipeline;
pub mod trainer;

pub use artifacts::{load_artifacts, save_artifacts, LoadedArtifacts, ModelArtifact};
pub use classifier::{Classifier, LogisticRegression, TrainingError, TrainingParams};
pub use pipeline::SentimentClassifier;
pub use trainer::{parse_corpus, read_corpus, LabeledText, Trainer, TrainingReport};
