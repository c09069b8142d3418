//! Trained model artifacts
//!
//! Two JSON files: the fitted vectorizer and the classifier together with
//! its label convention. Loading problems are fatal at startup.

use crate::config::ArtifactConfig;
use crate::error::{Error, Result};
use crate::models::LabelMapping;
use crate::nlp::{TfIdfVectorizer, Vectorizer};
use crate::sentiment::{Classifier, LogisticRegression};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// Classifier artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Class convention used at training time
    #[serde(default)]
    pub labels: LabelMapping,
    pub classifier: LogisticRegression,
}

/// Both artifacts, checked against each other
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub vectorizer: TfIdfVectorizer,
    pub model: ModelArtifact,
}

impl LoadedArtifacts {
    /// Check that the pair can serve predictions
    pub fn validate(&self) -> Result<()> {
        if !self.model.labels.is_valid() {
            return Err(Error::Startup(format!(
                "model label mapping {:?} is not a binary convention",
                self.model.labels
            )));
        }
        if !self.model.classifier.is_finite() {
            return Err(Error::Startup("model weights are not finite".into()));
        }

        let expected = self.vectorizer.dimension();
        let got = self.model.classifier.dimension();
        if expected != got {
            return Err(Error::Startup(format!(
                "vectorizer produces {} features but the model expects {}",
                expected, got
            )));
        }
        Ok(())
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            Error::Startup(format!("{} artifact not found at {}", kind, path.display()))
        }
        _ => Error::Startup(format!(
            "cannot read {} artifact at {}: {}",
            kind,
            path.display(),
            e
        )),
    })?;

    serde_json::from_str(&content).map_err(|e| {
        Error::Startup(format!(
            "{} artifact at {} is corrupt: {}",
            kind,
            path.display(),
            e
        ))
    })
}

/// Load and validate both artifacts
pub fn load_artifacts(config: &ArtifactConfig) -> Result<LoadedArtifacts> {
    let vectorizer: TfIdfVectorizer = read_artifact(&config.vectorizer_path, "vectorizer")?;
    let model: ModelArtifact = read_artifact(&config.model_path, "model")?;

    let artifacts = LoadedArtifacts { vectorizer, model };
    artifacts.validate()?;

    info!(
        "Loaded artifacts: {} features, labels {:?}",
        artifacts.vectorizer.dimension(),
        artifacts.model.labels
    );
    Ok(artifacts)
}

/// Write both artifacts as pretty JSON
pub fn save_artifacts(
    config: &ArtifactConfig,
    vectorizer: &TfIdfVectorizer,
    model: &ModelArtifact,
) -> Result<()> {
    for path in [&config.vectorizer_path, &config.model_path] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&config.vectorizer_path, serde_json::to_string_pretty(vectorizer)?)?;
    fs::write(&config.model_path, serde_json::to_string_pretty(model)?)?;

    info!(
        "Saved artifacts to {} and {}",
        config.vectorizer_path.display(),
        config.model_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fitted_pair() -> (TfIdfVectorizer, ModelArtifact) {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&["good movie".to_string(), "bad movie".to_string()]);
        let model = ModelArtifact {
            labels: LabelMapping::default(),
            classifier: LogisticRegression::new(vec![-1.0, 1.0, 0.0], 0.0),
        };
        (vectorizer, model)
    }

    fn config_in(dir: &Path) -> ArtifactConfig {
        ArtifactConfig {
            model_path: dir.join("model.json"),
            vectorizer_path: dir.join("vectorizer.json"),
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let (vectorizer, model) = fitted_pair();

        save_artifacts(&config, &vectorizer, &model).unwrap();
        let loaded = load_artifacts(&config).unwrap();

        assert_eq!(loaded.model, model);
        assert_eq!(loaded.vectorizer.terms(), vectorizer.terms());
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let config = config_in(&dir.path().join("nested/artifacts"));
        let (vectorizer, model) = fitted_pair();

        save_artifacts(&config, &vectorizer, &model).unwrap();
        assert!(config.model_path.exists());
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let dir = tempdir().unwrap();
        let err = load_artifacts(&config_in(dir.path())).unwrap_err();

        assert!(err.is_fatal());
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_corrupt_artifact_is_fatal() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let (vectorizer, model) = fitted_pair();
        save_artifacts(&config, &vectorizer, &model).unwrap();
        fs::write(&config.model_path, "{ not json").unwrap();

        let err = load_artifacts(&config).unwrap_err();
        assert!(matches!(err, Error::Startup(_)));
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let (vectorizer, mut model) = fitted_pair();
        model.classifier = LogisticRegression::new(vec![1.0], 0.0);
        save_artifacts(&config, &vectorizer, &model).unwrap();

        let err = load_artifacts(&config).unwrap_err();
        assert!(err.to_string().contains("expects 1"));
    }

    #[test]
    fn test_invalid_label_mapping_is_fatal() {
        let (vectorizer, mut model) = fitted_pair();
        model.labels = LabelMapping {
            negative: 1,
            positive: 1,
        };

        let artifacts = LoadedArtifacts { vectorizer, model };
        assert!(matches!(artifacts.validate(), Err(Error::Startup(_))));
    }

    #[test]
    fn test_labels_default_when_absent() {
        let json = r#"{"classifier": {"weights": [0.5], "intercept": 0.0}}"#;
        let model: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(model.labels, LabelMapping::default());
    }
}
