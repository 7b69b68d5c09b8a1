//! Route definitions for the `/requests` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::request;
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// GET    /                -> list_requests
/// GET    /{id}            -> get_request
/// GET    /{id}/quotes     -> list_request_quotes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(request::list_requests))
        .route("/{id}", get(request::get_request))
        .route("/{id}/quotes", get(request::list_request_quotes))
}
