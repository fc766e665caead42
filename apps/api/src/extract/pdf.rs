//! PDF text extraction with a layout-aware primary pass and a sequential
//! fallback.
//!
//! The primary pass (`pdf-extract`) orders text using font and positioning
//! metadata. When that metadata is unreadable the fallback pulls text out of
//! the content streams in stream order via `lopdf`, and the caller gets a
//! `LayoutUnavailable` warning instead of a hard failure.

use lopdf::Document;
use tracing::warn;

use super::{ExtractError, ExtractedText, ExtractionWarning};

pub fn extract(bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    let primary = pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string());
    resolve(primary, || plain_text(bytes))
}

/// Combines the two passes: a usable primary result wins with no warning; a
/// usable fallback result carries the layout warning; neither is a corrupt
/// file. Pure so the three outcomes are directly testable.
fn resolve(
    primary: Result<String, String>,
    fallback: impl FnOnce() -> Result<String, String>,
) -> Result<ExtractedText, ExtractError> {
    let reason = match primary {
        Ok(text) if !text.trim().is_empty() => {
            return Ok(ExtractedText {
                text,
                warning: None,
            })
        }
        Ok(_) => "layout pass recovered no text".to_string(),
        Err(e) => e,
    };

    match fallback() {
        Ok(text) if !text.trim().is_empty() => {
            warn!("PDF layout pass failed ({reason}); using sequential fallback");
            Ok(ExtractedText {
                text,
                warning: Some(ExtractionWarning::LayoutUnavailable),
            })
        }
        _ => Err(ExtractError::Corrupt {
            format: "PDF",
            reason,
        }),
    }
}

/// Sequential plain-text pass: content-stream order, no layout reconstruction.
fn plain_text(bytes: &[u8]) -> Result<String, String> {
    let doc = Document::load_mem(bytes).map_err(|e| e.to_string())?;
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Err("document has no pages".to_string());
    }
    doc.extract_text(&pages).map_err(|e| e.to_string())
}
