//! TF-IDF Vectorizer for Lexical Retrieval
//!
//! Turns clause text into sparse, L2-normalised term-weight vectors so that
//! cosine similarity reduces to a dot product.
//!
//! # Model
//!
//! - **Tokens**: lower-cased runs of two or more word characters
//! - **Terms**: unigrams plus bigrams of adjacent tokens
//! - **Vocabulary**: the `max_features` most frequent terms across the corpus,
//!   columns assigned in lexical order
//! - **Weights**: raw term count times smoothed idf,
//!   `ln((1 + n) / (1 + df)) + 1`, then L2-normalised per row
//!
//! # Examples
//!
//! ```rust
//! use clauseclear_store::tfidf::TfidfVectorizer;
//!
//! let (model, matrix) = TfidfVectorizer::fit(&["rent deposit terms", "termination rights"], 20_000);
//! assert_eq!(matrix.rows().len(), 2);
//!
//! let query = model.transform("deposit");
//! assert!(query.dot(&matrix.rows()[0]) > 0.0);
//! assert_eq!(query.dot(&matrix.rows()[1]), 0.0);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 20_000;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

/// A sparse vector stored as `(column, weight)` pairs sorted by column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<u32, f64>) -> Self {
        let mut entries: Vec<(u32, f64)> = counts.into_iter().collect();
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }
        Self { entries }
    }

    /// Non-zero entries in column order
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    /// Whether every weight is zero
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product with another sparse vector
    ///
    /// Rows and transformed queries are unit length (or empty), so this is
    /// their cosine similarity.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ci, wi) = self.entries[i];
            let (cj, wj) = other.entries[j];
            match ci.cmp(&cj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wi * wj;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Row-major sparse term-weight matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    rows: Vec<SparseVector>,
    cols: usize,
}

impl SparseMatrix {
    /// Rows in input order
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Number of columns (vocabulary size)
    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// A fitted TF-IDF model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, u32>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit a model over a corpus and return it with the corpus matrix
    ///
    /// `max_features` is coerced to at least 1.
    pub fn fit<S: AsRef<str>>(texts: &[S], max_features: usize) -> (Self, SparseMatrix) {
        let docs: Vec<HashMap<String, u32>> =
            texts.iter().map(|t| term_counts(t.as_ref())).collect();

        let mut corpus_tf: HashMap<&str, u64> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &docs {
            for (term, &count) in doc {
                *corpus_tf.entry(term.as_str()).or_default() += u64::from(count);
                *doc_freq.entry(term.as_str()).or_default() += 1;
            }
        }

        let mut ranked: Vec<(&str, u64)> = corpus_tf.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features.max(1));

        let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();

        let n = docs.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (col, term) in kept.iter().enumerate() {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert((*term).to_string(), col as u32);
        }

        let model = Self { vocabulary, idf };
        let rows = docs.iter().map(|doc| model.weigh(doc)).collect();
        let matrix = SparseMatrix {
            rows,
            cols: model.vocabulary.len(),
        };
        (model, matrix)
    }

    /// Vectorise text under the fitted vocabulary
    ///
    /// Terms outside the vocabulary contribute nothing.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&term_counts(text))
    }

    /// Vocabulary size
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column of a term, if it is in the vocabulary
    pub fn column(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    fn weigh(&self, counts: &HashMap<String, u32>) -> SparseVector {
        let weighted: BTreeMap<u32, f64> = counts
            .iter()
            .filter_map(|(term, &count)| {
                let col = *self.vocabulary.get(term)?;
                let idf = self.idf.get(col as usize)?;
                Some((col, f64::from(count) * idf))
            })
            .collect();
        SparseVector::from_counts(weighted)
    }
}

/// Lower-cased word tokens of two or more characters
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn term_counts(text: &str) -> HashMap<String, u32> {
    let tokens = tokenize(text);
    let mut counts = HashMap::new();
    for token in &tokens {
        *counts.entry(token.clone()).or_default() += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_single_characters() {
        assert_eq!(tokenize("A Rent of 5 is DUE"), vec!["rent", "of", "is", "due"]);
    }

    #[test]
    fn test_vocabulary_has_unigrams_and_bigrams() {
        let (model, matrix) = TfidfVectorizer::fit(&["rent deposit terms"], 100);
        assert!(model.column("rent").is_some());
        assert!(model.column("rent deposit").is_some());
        assert!(model.column("deposit terms").is_some());
        assert_eq!(model.vocabulary_len(), 5);
        assert_eq!(matrix.cols(), 5);
    }

    #[test]
    fn test_columns_are_lexically_ordered() {
        let (model, _) = TfidfVectorizer::fit(&["zeta alpha"], 100);
        assert!(model.column("alpha").unwrap() < model.column("zeta").unwrap());
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let (model, matrix) =
            TfidfVectorizer::fit(&["rent rent rent deposit", "rent notice"], 1);
        assert_eq!(model.vocabulary_len(), 1);
        assert!(model.column("rent").is_some());
        assert_eq!(matrix.cols(), 1);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let (_, matrix) = TfidfVectorizer::fit(&["rent deposit terms", "termination rights"], 100);
        for row in matrix.rows() {
            let norm: f64 = row.entries().iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_out_of_vocabulary_query_is_empty() {
        let (model, _) = TfidfVectorizer::fit(&["rent deposit terms"], 100);
        let q = model.transform("pets allowed");
        assert!(q.is_empty());
    }

    #[test]
    fn test_rarer_terms_weigh_more() {
        let (model, matrix) = TfidfVectorizer::fit(&["rent deposit", "rent notice"], 100);
        let row = &matrix.rows()[0];
        let weight = |term: &str| {
            let col = model.column(term).unwrap();
            row.entries().iter().find(|(c, _)| *c == col).unwrap().1
        };
        assert!(weight("deposit") > weight("rent"));
    }
}
