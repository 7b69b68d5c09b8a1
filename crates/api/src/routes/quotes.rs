//! Route definitions for the `/quotes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::quote;
use crate::state::AppState;

/// Routes mounted at `/quotes`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(quote::get_quote))
}
