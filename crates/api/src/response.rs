//! Response envelopes shared by every API handler.
//!
//! Success bodies look like
//! `{ "success": true, "message", "data", "meta"?, "timestamp" }`, paginated
//! ones replace `meta` with `pagination`, and failures use [`ErrorEnvelope`]:
//! `{ "success": false, "error": { "message", "code", "details"? }, "timestamp" }`.
//! Use these types instead of ad-hoc `json!` bodies so the contract stays in
//! one place.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use richiesta_core::shaping::format_iso;
use serde::Serialize;
use serde_json::Value;

const DEFAULT_MESSAGE: &str = "Success";

fn now() -> String {
    format_iso(&Utc::now())
}

/// Standard success envelope.
///
/// ```ignore
/// Ok(ApiResponse::success(format_quote_list(&records)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    pub timestamp: String,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: DEFAULT_MESSAGE.to_string(),
            data,
            meta: None,
            timestamp: now(),
            status: StatusCode::OK,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Override the HTTP status while keeping the success body shape.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Page metadata. `pages` is `ceil(total / limit)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

/// Success envelope for paginated listings.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Vec<T>,
    pub pagination: Pagination,
    pub timestamp: String,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        Self {
            success: true,
            message: DEFAULT_MESSAGE.to_string(),
            data,
            pagination,
            timestamp: now(),
        }
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Error detail nested under `error` in the failure envelope.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Failure envelope produced by [`crate::error::AppError`].
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorDetail,
    pub timestamp: String,
}

impl ErrorEnvelope {
    pub fn new(code: &'static str, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                message: message.into(),
                code,
                details,
            },
            timestamp: now(),
        }
    }
}
