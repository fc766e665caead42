use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::pdf::HtmlToPdf;
use crate::render::template::HtmlRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only per request: the compiled template, the HTTP
/// client, and the configured API key. No request leaves state behind.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub html: HtmlRenderer,
    /// Pluggable HTML→PDF engine. Default: WeasyPrintEngine. Swap via this
    /// trait object without touching the rest of the pipeline.
    pub pdf: Arc<dyn HtmlToPdf>,
    pub config: Config,
}
