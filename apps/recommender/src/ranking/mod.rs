//! Text ranking — scores one query against a batch of documents.
//!
//! Default: `TfidfScorer` (batch-fit TF-IDF + cosine similarity, deterministic).
//! The recommender holds an `Arc<dyn JobScorer>`, so backends can be swapped
//! without touching the handler.

pub mod stop_words;
pub mod tfidf;
pub mod tokenizer;

use thiserror::Error;
use tracing::debug;

use crate::ranking::tfidf::{cosine_similarity, TfidfVectorizer};

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("empty vocabulary; perhaps the documents only contain stop words")]
    EmptyVocabulary,

    #[error("scorer returned {got} scores for {expected} documents")]
    ScoreCountMismatch { expected: usize, got: usize },
}

/// Implement this to swap scoring backends.
pub trait JobScorer: Send + Sync {
    /// Short backend label for logs.
    fn backend(&self) -> &'static str;

    /// One similarity in [0, 1] per document, in document order.
    fn score(&self, query: &str, documents: &[String]) -> Result<Vec<f64>, RankingError>;
}

/// TF-IDF cosine scorer. The vector space is fit jointly on the query and
/// every document of the call.
#[derive(Debug, Clone)]
pub struct TfidfScorer {
    vectorizer: TfidfVectorizer,
}

impl TfidfScorer {
    pub fn new(max_features: usize) -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(max_features),
        }
    }
}

impl JobScorer for TfidfScorer {
    fn backend(&self) -> &'static str {
        "tfidf"
    }

    fn score(&self, query: &str, documents: &[String]) -> Result<Vec<f64>, RankingError> {
        let mut corpus = Vec::with_capacity(documents.len() + 1);
        corpus.push(query.to_string());
        corpus.extend(documents.iter().cloned());

        let matrix = self.vectorizer.fit_transform(&corpus)?;
        debug!("TF-IDF vocabulary size: {}", matrix.vocabulary.len());

        let (query_vector, doc_vectors) = matrix
            .vectors
            .split_first()
            .ok_or(RankingError::EmptyVocabulary)?;

        Ok(doc_vectors
            .iter()
            .map(|v| cosine_similarity(query_vector, v))
            .collect())
    }
}
