//! PostgreSQL-backed [`RecordStore`].

use async_trait::async_trait;
use serde_json::Value;

use crate::repositories::{CategoryRepo, NotificationRepo, QuoteRepo, RequestRepo, UserRepo};
use crate::store::{Listing, PageRequest, RecordStore, RequestFilter};
use crate::DbPool;

/// [`RecordStore`] that delegates to the table repositories.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list_requests(
        &self,
        filter: &RequestFilter,
        page: PageRequest,
    ) -> Result<Listing, sqlx::Error> {
        let records = RequestRepo::list(&self.pool, filter, page).await?;
        let total = RequestRepo::count(&self.pool, filter).await?;
        Ok(Listing { records, total })
    }

    async fn find_request(&self, id: &str) -> Result<Option<Value>, sqlx::Error> {
        RequestRepo::find_by_id(&self.pool, id).await
    }

    async fn find_quote(&self, id: &str) -> Result<Option<Value>, sqlx::Error> {
        QuoteRepo::find_by_id(&self.pool, id).await
    }

    async fn list_quotes_for_request(&self, request_id: &str) -> Result<Vec<Value>, sqlx::Error> {
        QuoteRepo::list_for_request(&self.pool, request_id).await
    }

    async fn find_user(&self, id: &str) -> Result<Option<Value>, sqlx::Error> {
        UserRepo::find_by_id(&self.pool, id).await
    }

    async fn list_categories(&self) -> Result<Vec<Value>, sqlx::Error> {
        CategoryRepo::list(&self.pool).await
    }

    async fn find_category(&self, id: &str) -> Result<Option<Value>, sqlx::Error> {
        CategoryRepo::find_by_id(&self.pool, id).await
    }

    async fn list_subcategories(
        &self,
        category_id: Option<&str>,
    ) -> Result<Vec<Value>, sqlx::Error> {
        CategoryRepo::list_subcategories(&self.pool, category_id).await
    }

    async fn list_notifications(
        &self,
        recipient_id: &str,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Value>, sqlx::Error> {
        NotificationRepo::list_for_recipient(&self.pool, recipient_id, unread_only, page).await
    }
}
