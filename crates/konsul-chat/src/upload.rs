//! Uploaded-document ingestion: plain text and PDF.

use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unsupported file type: {0} (expected .pdf or .txt)")]
    UnsupportedType(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pdf extraction failed: {0}")]
    Pdf(#[from] pdf_extract::OutputError),
}

/// An uploaded document reduced to plain text.
///
/// Ingestion failures stay in the front-end: a turn simply runs without an
/// upload context when reading the file did not work.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDoc {
    pub name: String,
    pub text: String,
}

impl UploadedDoc {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// First `n` characters, for the post-upload preview.
    pub fn preview(&self, n: usize) -> String {
        self.text.chars().take(n).collect()
    }
}

/// Read a `.txt` (UTF-8) or `.pdf` file into an [`UploadedDoc`].
///
/// The extension decides the decoder; anything else is rejected up front
/// rather than sniffed.
pub fn read_upload(path: &Path) -> Result<UploadedDoc, UploadError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let text = match ext.as_str() {
        "txt" => std::fs::read_to_string(path)?,
        "pdf" => pdf_extract::extract_text(path)?,
        _ => return Err(UploadError::UnsupportedType(name)),
    };

    info!(file = %name, chars = text.chars().count(), "uploaded document read");
    Ok(UploadedDoc { name, text })
}
