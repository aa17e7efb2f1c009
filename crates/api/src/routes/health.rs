use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a project store is configured.
    pub store_configured: bool,
    /// Whether an SMTP mailer is configured.
    pub mailer_configured: bool,
    /// Whether the database is reachable. `false` when none is configured.
    pub db_healthy: bool,
}

/// GET /health -- returns service and collaborator health.
///
/// Reports `degraded` when the reminder endpoints would answer 503 or the
/// configured database does not respond.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match &state.pool {
        Some(pool) => sitecraft_db::health_check(pool).await.is_ok(),
        None => false,
    };
    let store_configured = state.store.is_some();
    let mailer_configured = state.mailer.is_some();

    let db_ok = state.pool.is_none() || db_healthy;
    let status = if store_configured && mailer_configured && db_ok {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_configured,
        mailer_configured,
        db_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
