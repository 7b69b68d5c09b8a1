//! Handlers for the `/notifications` resource.

use axum::extract::State;
use richiesta_core::shaping::{format_notification_list, FormattedNotification};
use richiesta_db::PageRequest;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::query::ValidatedQuery;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    /// Whose notifications to list.
    #[validate(length(min = 1))]
    pub recipient_id: String,
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    /// Maximum number of results. Defaults to 50, at most 100.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<NotificationQuery>,
) -> AppResult<ApiResponse<Vec<FormattedNotification>>> {
    let page = PageRequest {
        limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        offset: params.offset.unwrap_or(0),
    };
    let unread_only = params.unread_only.unwrap_or(false);

    let records = state
        .store
        .list_notifications(&params.recipient_id, unread_only, page)
        .await?;

    Ok(ApiResponse::success(format_notification_list(&records)))
}
