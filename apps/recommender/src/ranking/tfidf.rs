//! TF-IDF vectorizer and cosine similarity over a single batch of documents.
//!
//! The vocabulary and IDF weights are fit on the batch being scored; nothing is
//! pre-trained or persisted.
//!
//! Weighting:
//! - tf(t, d)  = raw count of `t` in `d`
//! - idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! - each document vector is L2-normalised, so cosine similarity is a dot product.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::ranking::tokenizer::tokenize;
use crate::ranking::RankingError;

/// Sparse L2-normalised vector: (term index, weight), sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector(Vec<(usize, f64)>);

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.0.len() && j < other.0.len() {
            let (a_idx, a_val) = self.0[i];
            let (b_idx, b_val) = other.0[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine similarity in [0, 1]. Zero vectors score 0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    a.dot(b).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
}

/// Output of `fit_transform`: the fitted vocabulary and one vector per input document.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub vectors: Vec<SparseVector>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    pub fn fit_transform(&self, documents: &[String]) -> Result<TfidfMatrix, RankingError> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        // BTreeMap keeps terms alphabetical, which is also the tie-break order below.
        let mut total_counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                *total_counts.entry(token.as_str()).or_default() += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_default() += 1;
                }
            }
        }

        if total_counts.is_empty() {
            return Err(RankingError::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, usize)> = total_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1)); // stable: ties stay alphabetical
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vectors = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
                for token in tokens {
                    if let Some(&i) = index.get(token.as_str()) {
                        *counts.entry(i).or_default() += 1.0;
                    }
                }
                let weighted: Vec<(usize, f64)> =
                    counts.into_iter().map(|(i, tf)| (i, tf * idf[i])).collect();
                let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    SparseVector(weighted.into_iter().map(|(i, w)| (i, w / norm)).collect())
                } else {
                    SparseVector::default()
                }
            })
            .collect();

        Ok(TfidfMatrix {
            vocabulary,
            vectors,
        })
    }
}
