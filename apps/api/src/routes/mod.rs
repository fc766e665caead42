pub mod health;
pub mod resumes;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Two-phase flow: parse for review, then render the (possibly edited)
        // sections. `format` runs the whole pipeline in one request.
        .route("/api/v1/resumes/parse", post(resumes::handle_parse))
        .route("/api/v1/resumes/render", post(resumes::handle_render))
        .route("/api/v1/resumes/format", post(resumes::handle_format))
        .layer(DefaultBodyLimit::max(resumes::MAX_UPLOAD_BYTES))
        .with_state(state)
}
