//! Sparse TF-IDF model over short keyword documents.
//!
//! Weighting follows the usual vectorizer defaults:
//!
//! ```text
//! tfidf(t, d) = count(t, d) * idf(t)
//! idf(t)      = ln((1 + n) / (1 + df(t))) + 1
//! ```
//!
//! and every document vector is L2-normalised, so the cosine of two
//! vectors is their dot product.

use std::collections::HashMap;

use super::stopwords::is_stop_word;

/// Document vector as `(term index, weight)` pairs sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product over the shared terms of two sorted vectors
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_weight) = self.entries[i];
            let (b_term, b_weight) = other.entries[j];
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }
}

/// Splits text into lowercase word tokens of at least two characters,
/// dropping English stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|token| !is_stop_word(token))
        .collect()
}

fn smoothed_idf(n_docs: f64, doc_freq: f64) -> f64 {
    ((1.0 + n_docs) / (1.0 + doc_freq)).ln() + 1.0
}

/// TF-IDF vectors for a fixed corpus, one per input document
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    vectors: Vec<SparseVector>,
}

impl TfidfModel {
    /// Learns the vocabulary and idf weights from `documents` and
    /// vectorizes each of them.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        let mut counts: Vec<HashMap<usize, usize>> = Vec::with_capacity(tokenized.len());

        for tokens in &tokenized {
            let mut doc_counts: HashMap<usize, usize> = HashMap::new();
            for token in tokens {
                let next_index = vocabulary.len();
                let index = *vocabulary.entry(token.clone()).or_insert(next_index);
                if index == doc_freq.len() {
                    doc_freq.push(0);
                }
                *doc_counts.entry(index).or_insert(0) += 1;
            }
            for &index in doc_counts.keys() {
                doc_freq[index] += 1;
            }
            counts.push(doc_counts);
        }

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| smoothed_idf(n_docs, df as f64))
            .collect();

        let vectors = counts
            .into_iter()
            .map(|doc_counts| {
                let mut entries: Vec<(usize, f64)> = doc_counts
                    .into_iter()
                    .map(|(index, count)| (index, count as f64 * idf[index]))
                    .collect();
                entries.sort_by_key(|(index, _)| *index);

                let mut vector = SparseVector { entries };
                let norm = vector.norm();
                if norm > 0.0 {
                    for (_, weight) in &mut vector.entries {
                        *weight /= norm;
                    }
                }
                vector
            })
            .collect();

        Self {
            vocabulary,
            vectors,
        }
    }

    pub fn vector(&self, doc_index: usize) -> Option<&SparseVector> {
        self.vectors.get(doc_index)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Cosine similarity between two documents of the corpus.
    ///
    /// Zero when either document has no terms or is out of range.
    pub fn cosine(&self, a: usize, b: usize) -> f64 {
        match (self.vector(a), self.vector(b)) {
            (Some(a), Some(b)) => a.dot(b),
            _ => 0.0,
        }
    }
}
