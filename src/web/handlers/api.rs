use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::analysis::{self, AnalysisResult};
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: i64,
    pub passenger_count: usize,
}

/// The single analysis operation: free text in, answer plus optional
/// chart spec out. Unmatched queries get the fallback answer, still a
/// 200 - they are not errors.
pub async fn analyze_query(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Json<AnalysisResult> {
    debug!("Analyzing query: {}", payload.text);

    Json(analysis::answer(&state.dataset, &payload.text))
}

// System status
pub async fn system_status(State(state): State<Arc<AppState>>) -> Json<SystemStatus> {
    let uptime = chrono::Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds();

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        passenger_count: state.dataset.len(),
    })
}
