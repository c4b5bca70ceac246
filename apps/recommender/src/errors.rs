use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::jobs::recommender::RecommendError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Client faults map to 400, everything else to 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{error}: {message}")]
    BadRequest { error: String, message: String },

    #[error(transparent)]
    Recommendation(#[from] RecommendError),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::BadRequest {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingField(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string() }),
            ),
            AppError::BadRequest { error, message } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": error, "message": message }),
            ),
            AppError::Recommendation(e) => {
                tracing::error!("Recommendation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to get job recommendations",
                        "message": e.to_string()
                    }),
                )
            }
            AppError::PdfExtraction(msg) => {
                tracing::error!("PDF extraction error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to extract text from PDF",
                        "message": msg
                    }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Server error", "message": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::table::TableError;
    use std::path::PathBuf;

    #[test]
    fn test_missing_field_is_client_error() {
        let response = AppError::MissingField("cv_text").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_field_message() {
        assert_eq!(
            AppError::MissingField("cv_text").to_string(),
            "cv_text is required"
        );
    }

    #[test]
    fn test_recommendation_error_is_server_error() {
        let err: AppError = RecommendError::from(TableError::NotFound {
            path: PathBuf::from("nope.csv"),
        })
        .into();
        assert_eq!(err.to_string(), "CSV file not found: nope.csv");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_status() {
        let response = AppError::bad_request("Invalid file type", "Only PDF files are allowed")
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
