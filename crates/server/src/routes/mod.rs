pub mod health;
pub mod metadata;
pub mod metrics;
mod recommend;

pub use recommend::SOURCE_HEADER;

use axum::{Router, routing::post};

use crate::AppState;

/// Build triage routes
pub fn triage_routes() -> Router<AppState> {
    Router::new().route("/recommend", post(recommend::recommend))
}
