//! PDF Renderer — converts rendered HTML into PDF bytes.
//!
//! The engine sits behind a trait so the conversion backend can be swapped
//! without touching the pipeline. The production implementation shells out to
//! WeasyPrint, which does the actual CSS-aware HTML→PDF work.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF engine `{bin}` could not be started: {reason}")]
    EngineUnavailable { bin: String, reason: String },

    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    #[error("I/O error during rendering: {0}")]
    Io(#[from] std::io::Error),
}

/// HTML in, PDF bytes out. No partial output on failure.
#[async_trait]
pub trait HtmlToPdf: Send + Sync {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

pub struct WeasyPrintEngine {
    bin: PathBuf,
    /// Base URL for resolving relative asset references (the logo).
    assets_dir: PathBuf,
}

impl WeasyPrintEngine {
    pub fn new(bin: PathBuf, assets_dir: PathBuf) -> Self {
        Self { bin, assets_dir }
    }
}

#[async_trait]
impl HtmlToPdf for WeasyPrintEngine {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let workdir = tempfile::tempdir()?;
        let html_path = workdir.path().join("resume.html");
        let pdf_path = workdir.path().join("resume.pdf");
        tokio::fs::write(&html_path, html).await?;

        // Trailing separator so WeasyPrint treats the base URL as a directory.
        let mut base_url = self.assets_dir.as_os_str().to_os_string();
        base_url.push(std::path::MAIN_SEPARATOR_STR);

        let output = Command::new(&self.bin)
            .arg("--base-url")
            .arg(&base_url)
            .arg(&html_path)
            .arg(&pdf_path)
            .output()
            .await
            .map_err(|e| RenderError::EngineUnavailable {
                bin: self.bin.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::Conversion(if stderr.is_empty() {
                format!("engine exited with {}", output.status)
            } else {
                stderr
            }));
        }

        let pdf = tokio::fs::read(&pdf_path).await?;
        if pdf.is_empty() {
            return Err(RenderError::Conversion(
                "engine produced no output".to_string(),
            ));
        }
        debug!(bytes = pdf.len(), "HTML converted to PDF");
        Ok(pdf)
    }
}
