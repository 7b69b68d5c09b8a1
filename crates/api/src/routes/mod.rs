pub mod categories;
pub mod health;
pub mod notifications;
pub mod quotes;
pub mod requests;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /requests                       list (paginated; status, priority, categoryId)
/// /requests/{id}                  single request with relations
/// /requests/{id}/quotes           quotes for a request
///
/// /quotes/{id}                    single quote
///
/// /users/{id}                     single user
///
/// /categories                     list
/// /categories/{id}                single category with subcategories
/// /subcategories                  list (categoryId)
///
/// /notifications                  list (recipientId, unreadOnly, limit, offset)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/requests", requests::router())
        .nest("/quotes", quotes::router())
        .nest("/users", users::router())
        .nest("/categories", categories::router())
        .nest("/subcategories", categories::subcategory_router())
        .nest("/notifications", notifications::router())
}
