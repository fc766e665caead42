//! Text Extractor — turns an uploaded PDF or DOCX into plain text.

pub mod docx;
pub mod normalize;
pub mod pdf;

use thiserror::Error;

use crate::models::upload::{FileFormat, UploadedFile};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{format} file could not be read: {reason}")]
    Corrupt {
        format: &'static str,
        reason: String,
    },

    #[error("document contains no extractable text")]
    Empty,
}

/// Non-fatal extraction degradations. Surfaced to the user, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionWarning {
    LayoutUnavailable,
}

impl ExtractionWarning {
    pub fn message(&self) -> &'static str {
        match self {
            ExtractionWarning::LayoutUnavailable => {
                "PDF layout metadata was unreadable; fell back to sequential text \
                 extraction. Column and line ordering may be imperfect."
            }
        }
    }
}

#[derive(Debug)]
pub struct ExtractedText {
    pub text: String,
    pub warning: Option<ExtractionWarning>,
}

/// Routes the upload to the format-specific extractor and normalizes the
/// result before it reaches the LLM.
pub fn extract_text(file: &UploadedFile) -> Result<ExtractedText, ExtractError> {
    let mut extracted = match file.format {
        FileFormat::Pdf => pdf::extract(&file.bytes)?,
        FileFormat::Docx => docx::extract(&file.bytes).map(|text| ExtractedText {
            text,
            warning: None,
        })?,
    };

    extracted.text = normalize::clean_encoding(&extracted.text);
    if extracted.text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_corrupt_pdf_reports_file_error_not_panic() {
        let file = UploadedFile {
            name: "junk.pdf".to_string(),
            format: FileFormat::Pdf,
            bytes: Bytes::from_static(b"%PDF- but nothing real follows"),
        };
        assert!(extract_text(&file).is_err());
    }

    #[test]
    fn test_corrupt_docx_reports_file_error_not_panic() {
        let file = UploadedFile {
            name: "junk.docx".to_string(),
            format: FileFormat::Docx,
            bytes: Bytes::from_static(b"PK\x03\x04 truncated archive"),
        };
        assert!(extract_text(&file).is_err());
    }
}
