//! Orchestration — wires the pipeline stages in sequence for one upload:
//! raw file → text → structured sections → HTML → PDF.
//!
//! Strictly linear, request-scoped, nothing persisted. Each stage failure
//! maps to its own `AppError` variant; non-fatal warnings accumulate and
//! travel with the result.

use std::path::Path;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract;
use crate::models::sections::ResumeSections;
use crate::models::upload::UploadedFile;
use crate::section_parser::parse_sections;
use crate::state::AppState;

pub struct ProcessedResume {
    pub pdf: Vec<u8>,
    pub filename: String,
    pub sections: ResumeSections,
    pub warnings: Vec<String>,
}

pub async fn process_resume(
    file: &UploadedFile,
    api_key: &str,
    state: &AppState,
) -> Result<ProcessedResume, AppError> {
    info!(file = %file.name, format = file.format.label(), "processing resume upload");
    let mut warnings = Vec::new();

    let extracted = extract::extract_text(file)?;
    if let Some(warning) = extracted.warning {
        warn!(file = %file.name, "{}", warning.message());
        warnings.push(warning.message().to_string());
    }
    info!(chars = extracted.text.len(), "text extracted");

    let parsed = parse_sections(&extracted.text, api_key, &state.llm).await?;
    warnings.extend(parsed.warnings);
    if parsed.sections.is_empty() {
        return Err(AppError::Service(
            "the model recognized no resume sections in the document".to_string(),
        ));
    }
    info!(sections = parsed.sections.len(), "sections extracted");

    let html = state
        .html
        .render(&parsed.sections, &file.name)
        .map_err(|e| AppError::Render(e.to_string()))?;
    let pdf = state.pdf.render(&html).await?;
    info!(bytes = pdf.len(), "resume formatted");

    Ok(ProcessedResume {
        pdf,
        filename: download_filename(&file.name),
        sections: parsed.sections,
        warnings,
    })
}

/// `Formatted_<sanitized stem>.pdf` — alphanumerics and underscores only,
/// spaces become underscores, fallback when nothing survives.
pub fn download_filename(source_name: &str) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    let safe: String = stem
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect();
    let safe = safe.trim();
    if safe.is_empty() {
        "Formatted_Resume.pdf".to_string()
    } else {
        format!("Formatted_{}.pdf", safe.replace(' ', "_"))
    }
}
