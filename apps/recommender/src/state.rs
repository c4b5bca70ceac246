use std::sync::Arc;

use crate::config::Config;
use crate::jobs::recommender::{JobRecommender, RecommenderConfig};
use crate::ranking::{JobScorer, TfidfScorer};

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request mutable data; every request reloads its table.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub recommender: Arc<JobRecommender>,
}

impl AppState {
    /// Default wiring: TF-IDF scorer capped at `config.max_features` terms.
    pub fn new(config: Config) -> Self {
        let scorer: Arc<dyn JobScorer> = Arc::new(TfidfScorer::new(config.max_features));
        Self::with_scorer(config, scorer)
    }

    pub fn with_scorer(config: Config, scorer: Arc<dyn JobScorer>) -> Self {
        let recommender = JobRecommender::new(
            RecommenderConfig {
                default_csv_path: config.jobs_csv_path.clone(),
                default_top_n: config.default_top_n,
            },
            scorer,
        );
        Self {
            config,
            recommender: Arc::new(recommender),
        }
    }
}
