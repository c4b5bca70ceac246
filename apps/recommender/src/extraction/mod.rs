//! PDF résumé text extraction — turns an uploaded résumé into the plain text
//! that callers send as `cv_text`.

pub mod handlers;

use bytes::Bytes;

/// An uploaded PDF held in memory.
#[derive(Debug, Clone)]
pub struct UploadedPdf {
    pub filename: String,
    pub mimetype: String,
    pub data: Bytes,
}

pub const PDF_MIME: &str = "application/pdf";

impl UploadedPdf {
    pub fn is_pdf(&self) -> bool {
        self.mimetype == PDF_MIME
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Text of a parsed PDF plus its page count.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPdf {
    pub text: String,
    pub pages: usize,
}

/// Blocking: parses the whole document. `pdf-extract` can panic on malformed
/// input, so callers run this on the blocking pool and treat a join error as
/// an extraction failure.
pub fn extract_text(pdf: &UploadedPdf) -> Result<ExtractedPdf, String> {
    let pages = pdf_extract::Document::load_mem(&pdf.data)
        .map_err(|e| e.to_string())?
        .get_pages()
        .len();
    let text = pdf_extract::extract_text_from_mem(&pdf.data).map_err(|e| e.to_string())?;
    Ok(ExtractedPdf { text, pages })
}
