//! 健康检查

use std::sync::OnceLock;
use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::core::ServerState;

static START_TIME: OnceLock<Instant> = OnceLock::new();

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: &'static str,
}

pub fn router() -> Router<ServerState> {
    START_TIME.get_or_init(Instant::now);
    Router::new().route("/api/health", get(health))
}

/// GET /api/health（公开）
async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let (status, database) = match state.db.health().await {
        Ok(()) => ("ok", "ok"),
        Err(err) => {
            tracing::error!(error = %err, "Database health check failed");
            ("degraded", "unavailable")
        }
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: START_TIME.get_or_init(Instant::now).elapsed().as_secs(),
        database,
    })
}
