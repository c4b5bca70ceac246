use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, ExtractedPdf, UploadedPdf};
use crate::state::AppState;

/// Multipart field carrying the résumé.
const PDF_FIELD: &str = "pdf";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfMetadata {
    pub filename: String,
    pub mimetype: String,
    pub size: usize,
    pub pages: usize,
    pub text_length: usize,
}

/// The uploaded file echoed back so the client can store it.
#[derive(Debug, Serialize)]
pub struct PdfFileData {
    /// Base64 of the raw upload.
    pub content: String,
    pub originalname: String,
    pub mimetype: String,
    pub size: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractPdfResponse {
    pub success: bool,
    pub text: String,
    pub file_data: PdfFileData,
    pub metadata: PdfMetadata,
}

/// POST /api/extract-pdf-text
///
/// Accepts a multipart upload with a `pdf` file field and returns its text.
pub async fn handle_extract_pdf_text(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractPdfResponse>, AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::bad_request("Invalid upload", e.body_text()))?;
    let max_bytes = state.config.max_upload_bytes;

    let pdf = read_pdf_field(&mut multipart, max_bytes)
        .await?
        .ok_or_else(|| AppError::bad_request("No PDF file uploaded", "Please upload a PDF file"))?;

    if !pdf.is_pdf() {
        return Err(AppError::bad_request(
            "Invalid file type",
            "Only PDF files are allowed",
        ));
    }
    if pdf.size() > max_bytes {
        return Err(too_large(max_bytes));
    }

    info!("Extracting text from '{}' ({} bytes)", pdf.filename, pdf.size());

    let (pdf, extracted) = tokio::task::spawn_blocking(move || {
        let text = extract_text(&pdf);
        (pdf, text)
    })
    .await
    .map_err(|e| AppError::PdfExtraction(format!("PDF parser aborted: {e}")))?;
    let ExtractedPdf { text, pages } = extracted.map_err(AppError::PdfExtraction)?;

    Ok(Json(ExtractPdfResponse {
        success: true,
        file_data: PdfFileData {
            content: STANDARD.encode(&pdf.data),
            originalname: pdf.filename.clone(),
            mimetype: pdf.mimetype.clone(),
            size: pdf.size(),
        },
        metadata: PdfMetadata {
            filename: pdf.filename,
            mimetype: pdf.mimetype,
            size: pdf.data.len(),
            pages,
            text_length: text.chars().count(),
        },
        text,
    }))
}

/// Returns the first `pdf` field, skipping any others.
async fn read_pdf_field(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<Option<UploadedPdf>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let mimetype = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_bytes))?;

        return Ok(Some(UploadedPdf {
            filename,
            mimetype,
            data,
        }));
    }
    Ok(None)
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(max_bytes)
    } else {
        AppError::bad_request("Invalid upload", err.body_text())
    }
}

fn too_large(max_bytes: usize) -> AppError {
    AppError::bad_request(
        "File too large",
        format!("PDF file must be smaller than {}", format_limit(max_bytes)),
    )
}

/// Human-readable upload limit, rounded up so it never reads as zero.
fn format_limit(max_bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    if max_bytes >= MB {
        format!("{}MB", max_bytes.div_ceil(MB))
    } else if max_bytes >= KB {
        format!("{}KB", max_bytes.div_ceil(KB))
    } else {
        format!("{max_bytes} bytes")
    }
}
