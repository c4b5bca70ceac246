//! Axum route handlers for the recommendation API.

use std::path::PathBuf;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::jobs::recommender::Recommendation;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Résumé text, either as one blob or as fragments joined with spaces.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CvText {
    Text(String),
    Fragments(Vec<String>),
}

impl CvText {
    pub fn is_empty(&self) -> bool {
        match self {
            CvText::Text(text) => text.is_empty(),
            CvText::Fragments(parts) => parts.is_empty(),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            CvText::Text(text) => text,
            CvText::Fragments(parts) => parts.join(" "),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub cv_text: Option<CvText>,
    #[serde(default)]
    pub csv_file_path: Option<String>,
    #[serde(default)]
    pub top_n: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub recommendations: Vec<Recommendation>,
    pub count: usize,
    pub source: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /recommend-jobs-batch
///
/// Scores `cv_text` against every posting in the CSV and returns the top N.
/// The table is re-read and the vector space re-fit on every call.
pub async fn handle_recommend_jobs(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::bad_request("Invalid JSON body", e.body_text()))?;

    let cv_text = match request.cv_text {
        Some(cv) if !cv.is_empty() => cv.into_text(),
        _ => return Err(AppError::MissingField("cv_text")),
    };

    let top_n = match request.top_n {
        Some(n) => usize::try_from(n).map_err(|_| {
            AppError::bad_request("Invalid top_n", "top_n must be a non-negative integer")
        })?,
        None => state.recommender.default_top_n(),
    };

    let csv_path = request
        .csv_file_path
        .map(PathBuf::from)
        .unwrap_or_else(|| state.recommender.default_csv_path().to_path_buf());

    info!(
        "Received CV text length: {} characters",
        cv_text.chars().count()
    );

    let recommender = state.recommender.clone();
    let path = csv_path.clone();
    let recommendations =
        tokio::task::spawn_blocking(move || recommender.recommend(&cv_text, &path, top_n))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(RecommendResponse {
        success: true,
        count: recommendations.len(),
        recommendations,
        source: format!("Local CSV: {}", csv_path.display()),
    }))
}
