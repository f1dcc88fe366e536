//! Health check handlers
//!
//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use gym_service::dto::{HealthChecks, HealthResponse, ReadinessResponse};

use crate::state::AppState;

fn status(healthy: bool) -> String {
    let status = if healthy { "up" } else { "down" };
    status.to_string()
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Ready when PostgreSQL answers and, if configured, Redis does too
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = state.pool().acquire().await.is_ok();

    let redis_healthy = match state.redis() {
        Some(redis) => Some(redis.health_check().await.is_ok()),
        None => None,
    };

    let ready = db_healthy && redis_healthy.unwrap_or(true);
    let response = ReadinessResponse {
        status: if ready { "ready" } else { "not_ready" }.to_string(),
        checks: HealthChecks {
            database: status(db_healthy),
            redis: redis_healthy.map(status),
        },
    };
    let code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
