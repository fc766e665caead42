mod config;
mod errors;
mod extract;
mod llm_client;
mod models;
mod pipeline;
mod render;
mod routes;
mod section_parser;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::pdf::WeasyPrintEngine;
use crate::render::template::HtmlRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (reads .env if present)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Refolio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new();
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not configured; clients must supply a key per request");
    }

    // Compile the fixed resume template once at startup
    let html = HtmlRenderer::new(&config.templates_dir)?;
    info!(
        "Resume template compiled from {}",
        config.templates_dir.display()
    );

    // HTML→PDF engine (WeasyPrint subprocess)
    let pdf = Arc::new(WeasyPrintEngine::new(
        config.weasyprint_bin.clone(),
        config.assets_dir.clone(),
    ));
    info!("PDF engine: {}", config.weasyprint_bin.display());

    // Build app state
    let state = AppState {
        llm,
        html,
        pdf,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
