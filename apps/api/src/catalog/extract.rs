//! Text extraction for uploaded book files.
//!
//! Uploads arrive as PDF, EPUB, or plain text; the reader only ever sees
//! extracted plain text, stored in object storage at publish time. EPUB
//! chapters are walked in spine order and rendered through html2text so
//! paragraph structure survives as blank lines for the paginator.

use std::io::Cursor;

use crate::errors::AppError;

/// Rendering width handed to html2text. Line breaks it inserts are soft
/// structure; the paginator treats them as low-priority break points.
const EPUB_RENDER_WIDTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookFileKind {
    PlainText,
    Pdf,
    Epub,
}

impl BookFileKind {
    /// Classifies an upload by declared content type, falling back to the
    /// file extension when the type is generic.
    pub fn detect(content_type: &str, filename: &str) -> Option<Self> {
        match content_type {
            "application/pdf" => return Some(BookFileKind::Pdf),
            "application/epub+zip" => return Some(BookFileKind::Epub),
            "text/plain" => return Some(BookFileKind::PlainText),
            _ => {}
        }
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(BookFileKind::Pdf)
        } else if lower.ends_with(".epub") {
            Some(BookFileKind::Epub)
        } else if lower.ends_with(".txt") {
            Some(BookFileKind::PlainText)
        } else {
            None
        }
    }
}

/// Extracts plain text from an uploaded book file.
pub fn extract_text(kind: BookFileKind, bytes: &[u8]) -> Result<String, AppError> {
    match kind {
        BookFileKind::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
        BookFileKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::UnprocessableEntity(format!("Failed to extract PDF text: {e}"))),
        BookFileKind::Epub => extract_epub_text(bytes),
    }
}

fn extract_epub_text(bytes: &[u8]) -> Result<String, AppError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut doc = epub::doc::EpubDoc::from_reader(cursor)
        .map_err(|e| AppError::UnprocessableEntity(format!("Invalid EPUB archive: {e}")))?;

    let spine: Vec<String> = doc.spine.clone();
    let mut out = String::new();
    for resource_id in &spine {
        let content = doc.get_resource(resource_id).map_err(|e| {
            AppError::UnprocessableEntity(format!(
                "Failed to read EPUB resource '{resource_id}': {e}"
            ))
        })?;
        let rendered = html2text::from_read(content.as_slice(), EPUB_RENDER_WIDTH);
        let rendered = rendered.trim();
        if !rendered.is_empty() {
            out.push_str(rendered);
            out.push_str("\n\n");
        }
    }
    Ok(out.trim_end().to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
