//! Text Extractor — converts an uploaded document's bytes into plain text.
//!
//! Dispatch is purely by file-extension suffix (case-insensitive). The three
//! outcomes callers care about are distinct kinds, not one generic failure:
//! unsupported extension, parser failure, and (decided upstream) empty text.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Parse(String),

    #[error("upload spool failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts plain text from a document, dispatching on the filename's
/// extension. Supported: `.pdf`, `.docx`, `.doc`, `.txt`.
pub fn extract(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    match extension_of(filename).as_deref() {
        Some("pdf") => extract_pdf(bytes),
        Some("docx") | Some("doc") => extract_docx(bytes),
        Some("txt") => extract_txt(bytes),
        Some(other) => Err(ExtractError::UnsupportedFormat(format!(".{other}"))),
        None => Err(ExtractError::UnsupportedFormat(filename.to_string())),
    }
}

/// Spools an uploaded file to request-scoped temporary storage, then
/// extracts from it. The temp file is owned by this call and removed on
/// every exit path when the `NamedTempFile` guard drops.
pub fn extract_upload(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    let spooled = spool_to_temp(bytes, filename)?;
    let content = std::fs::read(spooled.path())?;
    debug!(
        path = %spooled.path().display(),
        size = content.len(),
        "upload spooled for extraction"
    );
    extract(&content, filename)
}

fn spool_to_temp(bytes: &[u8], filename: &str) -> Result<NamedTempFile, ExtractError> {
    let suffix = extension_of(filename)
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    let mut file = tempfile::Builder::new()
        .prefix("resume-upload-")
        .suffix(&suffix)
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// Page texts arrive in page order; pages with no text contribute nothing.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::Parse(format!("failed to read PDF: {e}")))
}

/// Concatenates paragraph texts in document order, joined by newlines.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| ExtractError::Parse(format!("failed to read Word document: {e}")))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut text = String::new();
            for para_child in &paragraph.children {
                if let ParagraphChild::Run(run) = para_child {
                    for run_child in &run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(text);
        }
    }
    Ok(paragraphs.join("\n"))
}

fn extract_txt(bytes: &[u8]) -> Result<String, ExtractError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| ExtractError::Parse(format!("text file is not valid UTF-8: {e}")))
}
