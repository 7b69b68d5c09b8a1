//! Route definitions for the category taxonomy.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /                -> list_categories
/// GET    /{id}            -> get_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list_categories))
        .route("/{id}", get(category::get_category))
}

/// Routes mounted at `/subcategories`.
pub fn subcategory_router() -> Router<AppState> {
    Router::new().route("/", get(category::list_subcategories))
}
