pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis;
use crate::cover_letter;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_mb * 1024 * 1024;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/resume/analyze", post(analysis::handlers::handle_analyze))
        .route(
            "/resume/analyze-file",
            post(analysis::handlers::handle_analyze_file),
        )
        .route(
            "/cover-letter/generate",
            post(cover_letter::handlers::handle_generate),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
