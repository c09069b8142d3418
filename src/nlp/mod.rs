//! Text processing ahead of classification
//!
//! - Stopword lists
//! - Normalization (letters only, lowercase, stopwords removed)
//! - TF-IDF vectorization

mod normalizer;
mod stopwords;
mod vectorizer;

pub use normalizer::{normalize, TextNormalizer};
pub use stopwords::{StopwordSet, ENGLISH_STOPWORDS};
pub use vectorizer::{TfIdfVectorizer, Vectorizer};
