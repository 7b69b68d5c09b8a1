//! Handlers for the `/requests` resource.

use axum::extract::{Path, State};
use richiesta_core::request_enums::{to_stored, REQUEST_PRIORITIES, REQUEST_STATUSES};
use richiesta_core::shaping::{
    format_assistance_request, format_assistance_request_list, format_quote_list,
    FormattedAssistanceRequest, FormattedQuote,
};
use richiesta_db::{PageRequest, RequestFilter};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::shape_found;
use crate::error::AppResult;
use crate::middleware::query::ValidatedQuery;
use crate::response::{ApiResponse, Paginated, Pagination};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Default page size for request listing.
const DEFAULT_LIMIT: i64 = 20;

/// Query parameters for `GET /requests`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestListQuery {
    /// 1-based page number. Defaults to 1.
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<i64>,
    /// Page size. Defaults to 20, at most 100.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    /// Status filter in any case, e.g. `pending` or `IN_PROGRESS`.
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,
    #[validate(length(min = 1))]
    pub category_id: Option<String>,
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    match to_stored(value, REQUEST_STATUSES) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("unknown_status")),
    }
}

fn validate_priority(value: &str) -> Result<(), ValidationError> {
    match to_stored(value, REQUEST_PRIORITIES) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("unknown_priority")),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/requests
///
/// Paginated listing, newest first.
pub async fn list_requests(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<RequestListQuery>,
) -> AppResult<Paginated<FormattedAssistanceRequest>> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    let filter = RequestFilter {
        status: params
            .status
            .as_deref()
            .and_then(|s| to_stored(s, REQUEST_STATUSES)),
        priority: params
            .priority
            .as_deref()
            .and_then(|p| to_stored(p, REQUEST_PRIORITIES)),
        category_id: params.category_id,
    };

    let listing = state
        .store
        .list_requests(
            &filter,
            PageRequest {
                limit,
                offset: (page - 1) * limit,
            },
        )
        .await?;

    tracing::debug!(
        page,
        limit,
        total = listing.total,
        returned = listing.records.len(),
        "Listed assistance requests"
    );

    Ok(Paginated::new(
        format_assistance_request_list(&listing.records),
        Pagination::new(page, limit, listing.total),
    ))
}

/// GET /api/v1/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FormattedAssistanceRequest>> {
    let record = state.store.find_request(&id).await?;
    let request = shape_found("AssistanceRequest", id, record, format_assistance_request)?;
    Ok(ApiResponse::success(request))
}

/// GET /api/v1/requests/{id}/quotes
///
/// An unknown request yields an empty list.
pub async fn list_request_quotes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<FormattedQuote>>> {
    let records = state.store.list_quotes_for_request(&id).await?;
    Ok(ApiResponse::success(format_quote_list(&records)))
}
