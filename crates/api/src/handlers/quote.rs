//! Handlers for the `/quotes` resource.

use axum::extract::{Path, State};
use richiesta_core::shaping::{format_quote, FormattedQuote};

use super::shape_found;
use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/quotes/{id}
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FormattedQuote>> {
    let record = state.store.find_quote(&id).await?;
    let quote = shape_found("Quote", id, record, format_quote)?;
    Ok(ApiResponse::success(quote))
}
