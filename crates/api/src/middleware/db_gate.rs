//! Rejects API requests while the database is known to be down.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;

/// Short-circuit with 503 when the last health snapshot is unhealthy.
///
/// `Unknown` passes through so requests are served before the first probe
/// completes.
pub async fn require_database(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let snapshot = state.health.current();
    if snapshot.is_unhealthy() {
        tracing::warn!(
            path = %request.uri().path(),
            "Rejecting request while database is unavailable"
        );
        return AppError::ServiceUnavailable("Database temporarily unavailable".into())
            .into_response();
    }

    next.run(request).await
}
