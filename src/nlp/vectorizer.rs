//! Text vectorization
//!
//! TF-IDF (Term Frequency - Inverse Document Frequency) over normalized
//! token strings. The fitted vectorizer is persisted as a JSON artifact.

use crate::models::FeatureVector;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Turns one normalized text into a fixed-size feature vector
pub trait Vectorizer: Send + Sync {
    /// Vectorize a normalized, space-separated token string
    fn transform(&self, text: &str) -> FeatureVector;

    /// Length of every vector this vectorizer produces
    fn dimension(&self) -> usize;
}

/// TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TfIdfState", into = "TfIdfState")]
pub struct TfIdfVectorizer {
    /// term -> column
    vocabulary: HashMap<String, usize>,
    /// column -> term
    terms: Vec<String>,
    /// IDF per column
    idf: Vec<f64>,
    /// Minimum document frequency
    min_df: usize,
    /// Shorter tokens are ignored
    min_token_len: usize,
    /// L2 normalization of output vectors
    normalize: bool,
    /// Add one to document counts when computing IDF
    smooth_idf: bool,
}

impl TfIdfVectorizer {
    pub fn new() -> Self {
        Self {
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
            min_df: 1,
            min_token_len: 2,
            normalize: true,
            smooth_idf: true,
        }
    }

    /// Set the minimum document frequency
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    /// Set the minimum token length
    pub fn with_min_token_len(mut self, len: usize) -> Self {
        self.min_token_len = len;
        self
    }

    /// L2-normalize vectors
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Smooth IDF
    pub fn with_smooth_idf(mut self, smooth: bool) -> Self {
        self.smooth_idf = smooth;
        self
    }

    fn tokens<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let min_len = self.min_token_len;
        text.split_whitespace().filter(move |t| t.len() >= min_len)
    }

    /// Learn vocabulary and IDF weights from normalized documents
    pub fn fit(&mut self, documents: &[String]) {
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();

        for doc in documents {
            let unique: HashSet<&str> = self.tokens(doc).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut kept: Vec<(&str, usize)> = doc_freq
            .into_iter()
            .filter(|(_, df)| *df >= self.min_df)
            .collect();

        // Sorted for a deterministic column order
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let n_docs = documents.len() as f64;
        self.terms = kept.iter().map(|(term, _)| term.to_string()).collect();
        self.idf = kept
            .iter()
            .map(|(_, df)| Self::idf_weight(n_docs, *df as f64, self.smooth_idf))
            .collect();
        self.rebuild_vocabulary();
    }

    /// Fit, then vectorize the same documents
    pub fn fit_transform(&mut self, documents: &[String]) -> Vec<FeatureVector> {
        self.fit(documents);
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    fn idf_weight(n_docs: f64, df: f64, smooth: bool) -> f64 {
        if smooth {
            ((n_docs + 1.0) / (df + 1.0)).ln() + 1.0
        } else {
            (n_docs / df.max(1.0)).ln() + 1.0
        }
    }

    fn rebuild_vocabulary(&mut self) {
        self.vocabulary = self
            .terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
    }

    /// L2 normalization
    fn l2_normalize(vector: &mut [f64]) {
        let norm: f64 = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in vector.iter_mut() {
                *x /= norm;
            }
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Column of a term, if it is in the vocabulary
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Top-N terms by IDF
    pub fn top_terms(&self, n: usize) -> Vec<(String, f64)> {
        let mut term_idf: Vec<_> = self
            .terms
            .iter()
            .zip(self.idf.iter())
            .map(|(term, idf)| (term.clone(), *idf))
            .collect();

        term_idf.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        term_idf.truncate(n);
        term_idf
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn transform(&self, text: &str) -> FeatureVector {
        let mut vector = vec![0.0; self.terms.len()];

        for token in self.tokens(text) {
            if let Some(&idx) = self.vocabulary.get(token) {
                vector[idx] += 1.0;
            }
        }

        for (tf, idf) in vector.iter_mut().zip(self.idf.iter()) {
            *tf *= idf;
        }

        if self.normalize {
            Self::l2_normalize(&mut vector);
        }

        vector
    }

    fn dimension(&self) -> usize {
        self.terms.len()
    }
}

/// On-disk form of a fitted vectorizer
#[derive(Debug, Serialize, Deserialize)]
struct TfIdfState {
    terms: Vec<String>,
    idf: Vec<f64>,
    #[serde(default = "default_min_df")]
    min_df: usize,
    #[serde(default = "default_min_token_len")]
    min_token_len: usize,
    #[serde(default = "default_true")]
    normalize: bool,
    #[serde(default = "default_true")]
    smooth_idf: bool,
}

fn default_min_df() -> usize {
    1
}

fn default_min_token_len() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl TryFrom<TfIdfState> for TfIdfVectorizer {
    type Error = String;

    fn try_from(state: TfIdfState) -> Result<Self, Self::Error> {
        if state.terms.len() != state.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but {} idf weights",
                state.terms.len(),
                state.idf.len()
            ));
        }
        if state.idf.iter().any(|w| !w.is_finite()) {
            return Err("idf weights must be finite".to_string());
        }

        let mut vectorizer = TfIdfVectorizer {
            vocabulary: HashMap::new(),
            terms: state.terms,
            idf: state.idf,
            min_df: state.min_df,
            min_token_len: state.min_token_len,
            normalize: state.normalize,
            smooth_idf: state.smooth_idf,
        };
        vectorizer.rebuild_vocabulary();

        if vectorizer.vocabulary.len() != vectorizer.terms.len() {
            return Err("vocabulary contains duplicate terms".to_string());
        }
        Ok(vectorizer)
    }
}

impl From<TfIdfVectorizer> for TfIdfState {
    fn from(v: TfIdfVectorizer) -> Self {
        Self {
            terms: v.terms,
            idf: v.idf,
            min_df: v.min_df,
            min_token_len: v.min_token_len,
            normalize: v.normalize,
            smooth_idf: v.smooth_idf,
        }
    }
}
