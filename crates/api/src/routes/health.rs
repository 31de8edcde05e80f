//! Liveness endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness report, naming the backends this process is wired to.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `healthy` when the process answers.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// `postgres` or `memory`.
    pub record_store: &'static str,
    /// OpenDAL provider name.
    pub storage_provider: &'static str,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        record_store: state.store.backend_name(),
        storage_provider: state.storage.provider_name(),
    })
}

/// `GET /health`
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
