//! Health check endpoint

use axum::{Json, extract::State};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    llm: &'static str,
    rules: usize,
}

/// GET /health - Report server health and whether the model is in use
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        llm: if state.resolver.model_enabled() {
            "enabled"
        } else {
            "disabled"
        },
        rules: state.resolver.rules().len(),
    })
}
