//! Handlers for the category taxonomy (`/categories`, `/subcategories`).

use axum::extract::{Path, State};
use richiesta_core::shaping::{
    format_category, format_category_list, format_subcategory_list, FormattedCategory,
    FormattedSubcategory,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use super::shape_found;
use crate::error::AppResult;
use crate::middleware::query::ValidatedQuery;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /subcategories`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryQuery {
    #[validate(length(min = 1))]
    pub category_id: Option<String>,
}

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FormattedCategory>>> {
    let records = state.store.list_categories().await?;
    let categories = format_category_list(&records);
    let count = categories.len();
    Ok(ApiResponse::success(categories).with_meta(json!({ "count": count })))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FormattedCategory>> {
    let record = state.store.find_category(&id).await?;
    let category = shape_found("Category", id, record, format_category)?;
    Ok(ApiResponse::success(category))
}

/// GET /api/v1/subcategories
pub async fn list_subcategories(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<SubcategoryQuery>,
) -> AppResult<ApiResponse<Vec<FormattedSubcategory>>> {
    let records = state
        .store
        .list_subcategories(params.category_id.as_deref())
        .await?;
    let subcategories = format_subcategory_list(&records);
    let count = subcategories.len();
    Ok(ApiResponse::success(subcategories).with_meta(json!({ "count": count })))
}
