//! Axum route handlers for the resume formatting API.

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract;
use crate::models::sections::ResumeSections;
use crate::models::upload::{FileFormat, UploadedFile};
use crate::pipeline::{self, download_filename};
use crate::section_parser::parse_sections;
use crate::state::AppState;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub sections: ResumeSections,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub sections: ResumeSections,
    /// Source filename, used only to derive the download name.
    pub filename: Option<String>,
}

/// One upload plus the optional user-entered API key.
struct UploadRequest {
    file: UploadedFile,
    api_key: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/parse
///
/// Extraction + AI sectioning only. Returns the section mapping for review
/// before the user commits to a rendered PDF.
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let request = read_upload(multipart).await?;
    let api_key = resolve_api_key(request.api_key, &state)?;

    let extracted = extract::extract_text(&request.file)?;
    let mut warnings = Vec::new();
    if let Some(warning) = extracted.warning {
        warnings.push(warning.message().to_string());
    }

    let parsed = parse_sections(&extracted.text, &api_key, &state.llm).await?;
    warnings.extend(parsed.warnings);

    Ok(Json(ParseResponse {
        sections: parsed.sections,
        warnings,
    }))
}

/// POST /api/v1/resumes/render
///
/// Renders a (possibly user-edited) section mapping straight to PDF. No
/// extraction and no LLM call, so no API key is needed.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    if request.sections.is_empty() {
        return Err(AppError::Validation(
            "sections must contain at least one entry".to_string(),
        ));
    }

    let source_name = request.filename.as_deref().unwrap_or("resume");
    let html = state
        .html
        .render(&request.sections, source_name)
        .map_err(|e| AppError::Render(e.to_string()))?;
    let pdf = state.pdf.render(&html).await?;

    Ok(pdf_response(pdf, &download_filename(source_name), &[]))
}

/// POST /api/v1/resumes/format
///
/// The single "process" action: full pipeline from upload to downloadable
/// PDF. Extraction warnings are echoed in the `X-Extraction-Warnings` header.
pub async fn handle_format(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let request = read_upload(multipart).await?;
    let api_key = resolve_api_key(request.api_key, &state)?;

    let processed = pipeline::process_resume(&request.file, &api_key, &state).await?;

    Ok(pdf_response(
        processed.pdf,
        &processed.filename,
        &processed.warnings,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload(mut multipart: Multipart) -> Result<UploadRequest, AppError> {
    let mut file = None;
    let mut api_key = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let name = field.file_name().unwrap_or("resume").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
                file = Some(build_upload(name, bytes)?);
            }
            Some("api_key") => {
                let key = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read api_key: {e}")))?;
                api_key = Some(key);
            }
            _ => {} // ignore unknown fields
        }
    }

    let file =
        file.ok_or_else(|| AppError::Validation("multipart field `file` is required".to_string()))?;
    Ok(UploadRequest { file, api_key })
}

fn build_upload(name: String, bytes: Bytes) -> Result<UploadedFile, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }
    let format = FileFormat::from_filename(&name).ok_or_else(|| {
        AppError::FileFormat(format!(
            "unsupported file type `{name}`; upload a PDF or DOCX"
        ))
    })?;
    if !format.matches_magic(&bytes) {
        return Err(AppError::FileFormat(format!(
            "`{name}` does not look like a {} file",
            format.label()
        )));
    }
    Ok(UploadedFile {
        name,
        format,
        bytes,
    })
}

/// The user-entered key wins over the configured one; neither present is an
/// authentication error.
fn resolve_api_key(supplied: Option<String>, state: &AppState) -> Result<String, AppError> {
    supplied
        .filter(|k| !k.trim().is_empty())
        .or_else(|| state.config.gemini_api_key.clone())
        .ok_or(AppError::Authentication)
}

fn pdf_response(pdf: Vec<u8>, filename: &str, warnings: &[String]) -> Response {
    let mut response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    )
        .into_response();

    if !warnings.is_empty() {
        // Non-ASCII warning text cannot travel in a header; skip it there —
        // the /parse endpoint carries the full list in the JSON body.
        if let Ok(value) = HeaderValue::from_str(&warnings.join("; ")) {
            response
                .headers_mut()
                .insert("x-extraction-warnings", value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_upload_rejects_unknown_extension() {
        let err = build_upload("resume.txt".to_string(), Bytes::from_static(b"hello")).unwrap_err();
        assert!(matches!(err, AppError::FileFormat(_)));
    }

    #[test]
    fn test_build_upload_rejects_mismatched_magic() {
        // .pdf extension but ZIP content
        let err =
            build_upload("resume.pdf".to_string(), Bytes::from_static(b"PK\x03\x04...")).unwrap_err();
        assert!(matches!(err, AppError::FileFormat(_)));
    }

    #[test]
    fn test_build_upload_rejects_empty_file() {
        let err = build_upload("resume.pdf".to_string(), Bytes::new()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_build_upload_accepts_matching_pdf() {
        let upload =
            build_upload("resume.pdf".to_string(), Bytes::from_static(b"%PDF-1.7 ...")).unwrap();
        assert_eq!(upload.format, FileFormat::Pdf);
    }

    #[test]
    fn test_pdf_response_headers() {
        let response = pdf_response(vec![1, 2, 3], "Formatted_x.pdf", &["layout".to_string()]);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert_eq!(
            response.headers().get("x-extraction-warnings").unwrap(),
            "layout"
        );
    }

    #[test]
    fn test_pdf_response_omits_empty_warning_header() {
        let response = pdf_response(vec![1], "a.pdf", &[]);
        assert!(response.headers().get("x-extraction-warnings").is_none());
    }
}
