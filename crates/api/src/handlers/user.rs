//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use richiesta_core::shaping::{format_user, FormattedUser};

use super::shape_found;
use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FormattedUser>> {
    let record = state.store.find_user(&id).await?;
    let user = shape_found("User", id, record, format_user)?;
    Ok(ApiResponse::success(user))
}
