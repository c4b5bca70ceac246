//! Recommender — loads the job table, scores every posting against a résumé
//! and returns the top-N postings.
//!
//! Pipeline: load table → resolve schema → combined text per row → score
//! → stable sort descending → take N → project to the output schema.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::jobs::schema::{resolve_schema, SchemaError};
use crate::jobs::table::{load_job_table, JobTable, TableError};
use crate::ranking::{JobScorer, RankingError};

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Ranking(#[from] RankingError),
}

/// A single recommended job, renamed to the caller-facing schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub skills_desc: String,
    pub similarity_score: f64,
}

#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    pub default_csv_path: PathBuf,
    pub default_top_n: usize,
}

/// Explicitly constructed service object shared by the request handlers.
#[derive(Clone)]
pub struct JobRecommender {
    config: RecommenderConfig,
    scorer: Arc<dyn JobScorer>,
}

impl JobRecommender {
    pub fn new(config: RecommenderConfig, scorer: Arc<dyn JobScorer>) -> Self {
        Self { config, scorer }
    }

    pub fn default_csv_path(&self) -> &Path {
        &self.config.default_csv_path
    }

    pub fn default_top_n(&self) -> usize {
        self.config.default_top_n
    }

    /// Blocking: reads the file and runs the full scoring pass.
    pub fn recommend(
        &self,
        cv_text: &str,
        csv_path: &Path,
        top_n: usize,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let table = load_job_table(csv_path)?;
        rank_jobs(cv_text, &table, top_n, self.scorer.as_ref())
    }
}

/// Scores every row of `table` against `cv_text` and returns at most `top_n`
/// rows, best first. Equal scores keep their original row order.
pub fn rank_jobs(
    cv_text: &str,
    table: &JobTable,
    top_n: usize,
    scorer: &dyn JobScorer,
) -> Result<Vec<Recommendation>, RecommendError> {
    info!("Processing CV text length: {} characters", cv_text.chars().count());

    let schema = resolve_schema(table)?;
    let combined: Vec<String> = (0..table.len())
        .map(|row| schema.combined_text(table, row))
        .collect();

    info!(
        "Processing {} job descriptions ({} scorer)",
        combined.len(),
        scorer.backend()
    );

    let scores = scorer.score(cv_text, &combined)?;
    if scores.len() != combined.len() {
        return Err(RankingError::ScoreCountMismatch {
            expected: combined.len(),
            got: scores.len(),
        }
        .into());
    }

    let mut ranked: Vec<(usize, f64)> = scores
        .into_iter()
        .map(|s| s.clamp(0.0, 1.0))
        .enumerate()
        .collect();
    // sort_by is stable; ties keep row order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let recommendations: Vec<Recommendation> = ranked
        .into_iter()
        .take(top_n)
        .map(|(row, score)| Recommendation {
            title: table.cell(row, schema.title).to_string(),
            description: table.cell(row, schema.description).to_string(),
            skills_desc: table.cell(row, schema.responsibilities).to_string(),
            similarity_score: score,
        })
        .collect();

    info!("Found {} recommendations", recommendations.len());
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::TfidfScorer;

    /// Returns fixed scores regardless of input.
    struct FixedScorer(Vec<f64>);

    impl JobScorer for FixedScorer {
        fn backend(&self) -> &'static str {
            "fixed"
        }

        fn score(&self, _query: &str, _documents: &[String]) -> Result<Vec<f64>, RankingError> {
            Ok(self.0.clone())
        }
    }

    fn jobs_table(rows: &[(&str, &str, &str)]) -> JobTable {
        JobTable::new(
            vec![
                "Job Id".into(),
                "Job Title".into(),
                "Job Description".into(),
                "Responsibilities".into(),
            ],
            rows.iter()
                .enumerate()
                .map(|(i, (t, d, r))| {
                    vec![i.to_string(), t.to_string(), d.to_string(), r.to_string()]
                })
                .collect(),
        )
    }

    fn scenario_table() -> JobTable {
        jobs_table(&[
            ("Data Analyst", "Analyse business data", "SQL and dashboards"),
            ("Chef", "Prepare meals", "Kitchen hygiene"),
            ("Data Scientist", "Build models on data", "Python and statistics"),
        ])
    }

    #[test]
    fn test_data_rows_rank_above_chef() {
        let scorer = TfidfScorer::new(5000);
        let recs = rank_jobs("data analysis python", &scenario_table(), 2, &scorer).unwrap();
        assert_eq!(recs.len(), 2);
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert!(titles.contains(&"Data Analyst"));
        assert!(titles.contains(&"Data Scientist"));
    }

    #[test]
    fn test_result_count_is_min_of_top_n_and_rows() {
        let scorer = TfidfScorer::new(5000);
        let table = scenario_table();
        assert_eq!(rank_jobs("data", &table, 10, &scorer).unwrap().len(), 3);
        assert_eq!(rank_jobs("data", &table, 1, &scorer).unwrap().len(), 1);
        assert!(rank_jobs("data", &table, 0, &scorer).unwrap().is_empty());
    }

    #[test]
    fn test_scores_sorted_descending() {
        let scorer = TfidfScorer::new(5000);
        let recs = rank_jobs("python data models", &scenario_table(), 3, &scorer).unwrap();
        for pair in recs.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
    }

    #[test]
    fn test_ties_keep_original_row_order() {
        let table = jobs_table(&[("A", "", ""), ("B", "", ""), ("C", "", ""), ("D", "", "")]);
        let scorer = FixedScorer(vec![0.5, 0.9, 0.5, 0.5]);
        let recs = rank_jobs("anything", &table, 4, &scorer).unwrap();
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let table = jobs_table(&[("A", "", ""), ("B", "", "")]);
        let scorer = FixedScorer(vec![1.0000001, -0.2]);
        let recs = rank_jobs("anything", &table, 2, &scorer).unwrap();
        assert_eq!(recs[0].similarity_score, 1.0);
        assert_eq!(recs[1].similarity_score, 0.0);
    }

    #[test]
    fn test_projection_uses_output_field_names() {
        let scorer = TfidfScorer::new(5000);
        let recs = rank_jobs("chef kitchen", &scenario_table(), 1, &scorer).unwrap();
        let json = serde_json::to_value(&recs[0]).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["description", "similarity_score", "skills_desc", "title"]);
        assert_eq!(obj["title"], "Chef");
        assert_eq!(obj["skills_desc"], "Kitchen hygiene");
    }

    #[test]
    fn test_score_count_mismatch_is_error() {
        let scorer = FixedScorer(vec![0.1]);
        let err = rank_jobs("x", &scenario_table(), 3, &scorer).unwrap_err();
        assert!(matches!(
            err,
            RecommendError::Ranking(RankingError::ScoreCountMismatch { expected: 3, got: 1 })
        ));
    }

    #[test]
    fn test_missing_schema_column_is_error() {
        let table = JobTable::new(vec!["title".into()], vec![vec!["Chef".into()]]);
        let err = rank_jobs("chef", &table, 1, &TfidfScorer::new(5000)).unwrap_err();
        assert!(matches!(err, RecommendError::Schema(_)));
    }

    #[test]
    fn test_recommend_reports_missing_file() {
        let recommender = JobRecommender::new(
            RecommenderConfig {
                default_csv_path: PathBuf::from("data/job-matching_data.csv"),
                default_top_n: 5,
            },
            Arc::new(TfidfScorer::new(5000)),
        );
        let err = recommender
            .recommend("data", Path::new("/no/such/jobs.csv"), 5)
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
