pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers::handle_extract_pdf_text;
use crate::jobs::handlers::handle_recommend_jobs;
use crate::state::AppState;

/// Room for multipart framing around the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/recommend-jobs-batch", post(handle_recommend_jobs))
        .route(
            "/api/extract-pdf-text",
            post(handle_extract_pdf_text).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
