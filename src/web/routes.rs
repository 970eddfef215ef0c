use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::static_files::static_handler;
use super::state::AppState;

// UI Routes - the embedded chat client
pub fn ui_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::ui::index_handler))
        .route("/static/{*path}", get(static_handler))
}

// API Routes - the analysis boundary
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(handlers::api::analyze_query))
        .route("/api/status", get(handlers::api::system_status))
}
