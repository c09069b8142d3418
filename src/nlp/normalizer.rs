//! Text normalizer
//!
//! Reduces raw text to the token string the vectorizer was trained on:
//! ASCII letters only, lowercase, stopwords removed, single spaces.

use crate::nlp::StopwordSet;
use regex::Regex;
use std::sync::LazyLock;

/// Anything that is not an ASCII letter
static NON_LETTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z]").unwrap());

/// Normalize `raw` against a stopword set.
///
/// Each non-letter character becomes a space, the rest is lowercased and
/// split on whitespace, stopwords are dropped and the survivors are joined
/// with single spaces. Text without letters yields an empty string.
pub fn normalize(raw: &str, stopwords: &StopwordSet) -> String {
    let letters = NON_LETTER_REGEX.replace_all(raw, " ").to_lowercase();

    letters
        .split_whitespace()
        .filter(|token| !stopwords.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizer bound to the stopword list loaded at startup
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    stopwords: StopwordSet,
}

impl TextNormalizer {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Normalize text into a space-separated token string
    pub fn normalize(&self, raw: &str) -> String {
        normalize(raw, &self.stopwords)
    }

    /// Normalize and return the tokens
    pub fn tokens(&self, raw: &str) -> Vec<String> {
        self.normalize(raw)
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const ALPHABET: &[char] = &[
        'a', 'B', 'c', 'Z', 'i', 's', 'T', 'h', ' ', ' ', '\t', '\n', '1', '9', '!', '?',
        '.', ',', '\'', '-', '_', '@', '#', 'é', 'ß', '😀', '中',
    ];

    fn random_strings(seed: u64, count: usize) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                let len = rng.gen_range(0..40);
                (0..len)
                    .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_basic_normalization() {
        let stopwords = StopwordSet::from_words(["this"]);
        assert_eq!(normalize("I love this!!!", &stopwords), "i love");
    }

    #[test]
    fn test_digits_and_punctuation_only() {
        let stopwords = StopwordSet::english();
        for input in ["12345", "!!!", "3.14, 2.71; 42?", "", "   ", "@#$%^&*()"] {
            assert_eq!(normalize(input, &stopwords), "", "input: {:?}", input);
        }
    }

    #[test]
    fn test_all_stopwords() {
        let normalizer = TextNormalizer::new(StopwordSet::english());
        assert_eq!(normalizer.normalize("It is what it is."), "");
    }

    #[test]
    fn test_non_ascii_letters_split_words() {
        let stopwords = StopwordSet::empty();
        assert_eq!(normalize("café crème", &stopwords), "caf cr me");
        assert_eq!(normalize("don't", &stopwords), "don t");
    }

    #[test]
    fn test_stopwords_match_after_lowercasing() {
        let stopwords = StopwordSet::from_words(["the"]);
        assert_eq!(normalize("THE Movie", &stopwords), "movie");
    }

    #[test]
    fn test_tokens() {
        let normalizer = TextNormalizer::new(StopwordSet::empty());
        assert_eq!(normalizer.tokens("Great, GREAT day"), vec!["great", "great", "day"]);
        assert!(normalizer.tokens("123").is_empty());
    }

    #[test]
    fn test_output_alphabet() {
        let stopwords = StopwordSet::from_words(["a", "is"]);
        for input in random_strings(7, 500) {
            let out = normalize(&input, &stopwords);
            assert!(
                out.chars().all(|c| c.is_ascii_lowercase() || c == ' '),
                "unexpected char in {:?}",
                out
            );
            assert!(!out.contains("  "), "double space in {:?}", out);
            assert!(!out.starts_with(' ') && !out.ends_with(' '), "padding in {:?}", out);
        }
    }

    #[test]
    fn test_idempotent() {
        let stopwords = StopwordSet::english();
        for input in random_strings(11, 500) {
            let once = normalize(&input, &stopwords);
            assert_eq!(normalize(&once, &stopwords), once, "input: {:?}", input);
        }
    }
}
