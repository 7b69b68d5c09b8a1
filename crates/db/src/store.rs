//! The record-source seam between HTTP handlers and persistence.

use async_trait::async_trait;
use serde_json::Value;

/// Filters accepted by the request listing. Enum values are matched in their
/// stored upper-case form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category_id: Option<String>,
}

/// Limit/offset window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

/// A page of raw records plus the unpaginated total.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub records: Vec<Value>,
    pub total: i64,
}

/// Source of raw records for the API.
///
/// Implementations return JSON objects exactly as the persistence mapping
/// produces them; callers pass them through the shaping layer before
/// responding.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_requests(
        &self,
        filter: &RequestFilter,
        page: PageRequest,
    ) -> Result<Listing, sqlx::Error>;

    async fn find_request(&self, id: &str) -> Result<Option<Value>, sqlx::Error>;

    async fn find_quote(&self, id: &str) -> Result<Option<Value>, sqlx::Error>;

    async fn list_quotes_for_request(&self, request_id: &str) -> Result<Vec<Value>, sqlx::Error>;

    async fn find_user(&self, id: &str) -> Result<Option<Value>, sqlx::Error>;

    async fn list_categories(&self) -> Result<Vec<Value>, sqlx::Error>;

    async fn find_category(&self, id: &str) -> Result<Option<Value>, sqlx::Error>;

    async fn list_subcategories(&self, category_id: Option<&str>)
        -> Result<Vec<Value>, sqlx::Error>;

    async fn list_notifications(
        &self,
        recipient_id: &str,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Value>, sqlx::Error>;
}
