//! Binary linear classifier
//!
//! Logistic regression over TF-IDF vectors, trained with batch gradient
//! descent and persisted as part of the model artifact.

use crate::models::FeatureVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised while fitting a classifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrainingError {
    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Got {samples} samples but {targets} targets")]
    LengthMismatch { samples: usize, targets: usize },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Target class {0} is not binary")]
    InvalidTarget(u8),

    #[error("Training set contains a single class")]
    SingleClass,
}

/// Maps one feature vector to a binary class
pub trait Classifier: Send + Sync {
    /// Predicted class, 0 or 1
    fn predict(&self, features: &[f64]) -> u8;

    /// Expected feature vector length
    fn dimension(&self) -> usize;
}

/// Gradient descent settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingParams {
    pub learning_rate: f64,
    pub max_iter: usize,
    /// Stop once the cost changes by less than this
    pub tolerance: f64,
    /// L2 penalty on the weights
    pub l2: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            learning_rate: 1.0,
            max_iter: 1000,
            tolerance: 1e-7,
            l2: 0.0,
        }
    }
}

/// Logistic regression classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// One weight per feature
    pub weights: Vec<f64>,
    /// Bias term
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    /// Sigmoid activation function
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }

    /// Binary cross-entropy
    fn log_loss(targets: &[f64], predictions: &[f64]) -> f64 {
        let eps = 1e-15;
        let n = targets.len() as f64;

        -targets
            .iter()
            .zip(predictions.iter())
            .map(|(&y, &p)| {
                let p = p.clamp(eps, 1.0 - eps);
                y * p.ln() + (1.0 - y) * (1.0 - p).ln()
            })
            .sum::<f64>()
            / n
    }

    /// Fit on feature vectors with 0/1 targets.
    ///
    /// Returns the model and the cost history.
    pub fn fit(
        samples: &[FeatureVector],
        targets: &[u8],
        params: &TrainingParams,
    ) -> Result<(Self, Vec<f64>), TrainingError> {
        if samples.is_empty() {
            return Err(TrainingError::EmptyTrainingSet);
        }
        if samples.len() != targets.len() {
            return Err(TrainingError::LengthMismatch {
                samples: samples.len(),
                targets: targets.len(),
            });
        }
        if let Some(&bad) = targets.iter().find(|&&t| t > 1) {
            return Err(TrainingError::InvalidTarget(bad));
        }
        if targets.iter().all(|&t| t == targets[0]) {
            return Err(TrainingError::SingleClass);
        }

        let n_features = samples[0].len();
        if let Some(bad) = samples.iter().find(|s| s.len() != n_features) {
            return Err(TrainingError::DimensionMismatch {
                expected: n_features,
                got: bad.len(),
            });
        }

        let y: Vec<f64> = targets.iter().map(|&t| f64::from(t)).collect();
        let n_samples = samples.len() as f64;
        let mut model = Self::new(vec![0.0; n_features], 0.0);
        let mut cost_history = Vec::with_capacity(params.max_iter);

        for iter in 0..params.max_iter {
            let predictions: Vec<f64> = samples.iter().map(|x| model.predict_proba(x)).collect();

            let mut dw = vec![0.0; n_features];
            let mut db = 0.0;
            for ((x, p), t) in samples.iter().zip(predictions.iter()).zip(y.iter()) {
                let err = p - t;
                for (g, xi) in dw.iter_mut().zip(x.iter()) {
                    *g += err * xi;
                }
                db += err;
            }

            for (w, g) in model.weights.iter_mut().zip(dw.iter()) {
                let grad = g / n_samples + params.l2 * *w;
                *w -= params.learning_rate * grad;
            }
            model.intercept -= params.learning_rate * db / n_samples;

            let cost = Self::log_loss(&y, &predictions);
            cost_history.push(cost);

            if iter > 0 && (cost_history[iter - 1] - cost).abs() < params.tolerance {
                debug!("Converged at iteration {}", iter);
                break;
            }
        }

        Ok((model, cost_history))
    }

    /// Log-odds of the positive class
    pub fn decision_function(&self, features: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    /// Probability of class 1
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        Self::sigmoid(self.decision_function(features))
    }

    /// Accuracy on labeled samples
    pub fn score(&self, samples: &[FeatureVector], targets: &[u8]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }

        let correct = samples
            .iter()
            .zip(targets.iter())
            .filter(|(x, &t)| self.predict(x) == t)
            .count();

        correct as f64 / samples.len() as f64
    }

    /// Weights must be finite to give a meaningful decision
    pub fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.weights.iter().all(|w| w.is_finite())
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, features: &[f64]) -> u8 {
        if self.predict_proba(features) >= 0.5 {
            1
        } else {
            0
        }
    }

    fn dimension(&self) -> usize {
        self.weights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn separable() -> (Vec<FeatureVector>, Vec<u8>) {
        let samples = vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.8, 0.0],
            vec![0.0, 1.0],
            vec![0.1, 0.9],
            vec![0.0, 0.8],
        ];
        (samples, vec![1, 1, 1, 0, 0, 0])
    }

    #[test]
    fn test_sigmoid() {
        assert_abs_diff_eq!(LogisticRegression::sigmoid(0.0), 0.5, epsilon = 1e-12);
        assert!(LogisticRegression::sigmoid(100.0) > 0.99);
        assert!(LogisticRegression::sigmoid(-100.0) < 0.01);
    }

    #[test]
    fn test_fit_separable() {
        let (samples, targets) = separable();
        let (model, history) =
            LogisticRegression::fit(&samples, &targets, &TrainingParams::default()).unwrap();

        assert_eq!(model.score(&samples, &targets), 1.0);
        assert!(history.first().unwrap() > history.last().unwrap());
        assert!(model.weights[0] > 0.0);
        assert!(model.weights[1] < 0.0);
        assert_eq!(model.dimension(), 2);
    }

    #[test]
    fn test_l2_shrinks_weights() {
        let (samples, targets) = separable();
        let (plain, _) =
            LogisticRegression::fit(&samples, &targets, &TrainingParams::default()).unwrap();
        let params = TrainingParams {
            l2: 0.1,
            ..TrainingParams::default()
        };
        let (ridge, _) = LogisticRegression::fit(&samples, &targets, &params).unwrap();

        let norm = |m: &LogisticRegression| m.weights.iter().map(|w| w * w).sum::<f64>();
        assert!(norm(&ridge) < norm(&plain));
    }

    #[test]
    fn test_zero_vector_uses_intercept() {
        let model = LogisticRegression::new(vec![2.0, -2.0], -0.5);
        assert_eq!(model.predict(&[0.0, 0.0]), 0);

        let model = LogisticRegression::new(vec![2.0, -2.0], 0.5);
        assert_eq!(model.predict(&[0.0, 0.0]), 1);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let params = TrainingParams::default();
        assert_eq!(
            LogisticRegression::fit(&[], &[], &params).unwrap_err(),
            TrainingError::EmptyTrainingSet
        );
        assert_eq!(
            LogisticRegression::fit(&[vec![1.0]], &[1, 0], &params).unwrap_err(),
            TrainingError::LengthMismatch {
                samples: 1,
                targets: 2
            }
        );
        assert_eq!(
            LogisticRegression::fit(&[vec![1.0], vec![0.0]], &[2, 0], &params).unwrap_err(),
            TrainingError::InvalidTarget(2)
        );
        assert_eq!(
            LogisticRegression::fit(&[vec![1.0], vec![0.0]], &[1, 1], &params).unwrap_err(),
            TrainingError::SingleClass
        );
        assert_eq!(
            LogisticRegression::fit(&[vec![1.0], vec![0.0, 1.0]], &[1, 0], &params).unwrap_err(),
            TrainingError::DimensionMismatch {
                expected: 1,
                got: 2
            }
        );
    }

    #[test]
    fn test_finite_check() {
        assert!(LogisticRegression::new(vec![1.0], 0.0).is_finite());
        assert!(!LogisticRegression::new(vec![f64::NAN], 0.0).is_finite());
    }
}
