use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Router};
use richiesta_core::shaping::iso_from;
use serde::Serialize;

use crate::background::DatabaseStatus;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub database: DatabaseStatus,
    /// ISO-8601 time of the last completed probe, `null` before the first.
    pub last_checked: Option<String>,
    /// Deployment environment (`APP_ENV`).
    pub environment: String,
}

/// GET /health -- reports the latest snapshot from the health monitor.
///
/// Returns 503 while the database is unhealthy so load balancers can act on
/// the status code alone.
async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    let snapshot = state.health.current();
    let unhealthy = snapshot.database == DatabaseStatus::Unhealthy;

    let body = HealthResponse {
        status: if unhealthy { "degraded" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        database: snapshot.database,
        last_checked: snapshot.last_checked.as_ref().and_then(|ts| iso_from(ts)),
        environment: state.config.environment.clone(),
    };

    let response = ApiResponse::success(body);
    if unhealthy {
        response
            .with_message("Database unavailable")
            .with_status(StatusCode::SERVICE_UNAVAILABLE)
    } else {
        response
    }
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
