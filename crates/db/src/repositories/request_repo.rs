//! Repository for the `AssistanceRequest` table.

use serde_json::Value;
use sqlx::PgPool;

use crate::store::{PageRequest, RequestFilter};

/// Relations embedded in every request record. List queries use the
/// lowercase aliases for category/subcategory, matching the ORM include
/// the frontend was written against.
const LIST_RELATIONS: &str = r#"
    jsonb_build_object(
        'client', (SELECT to_jsonb(u) - 'password' FROM "User" u WHERE u.id = r."clientId"),
        'professional', (SELECT to_jsonb(u) - 'password' FROM "User" u WHERE u.id = r."professionalId"),
        'category', (SELECT to_jsonb(c) FROM "Category" c WHERE c.id = r."categoryId"),
        'subcategory', (SELECT to_jsonb(s) FROM "Subcategory" s WHERE s.id = r."subcategoryId")
    )"#;

/// Relations embedded in a single request record.
const DETAIL_RELATIONS: &str = r#"
    jsonb_build_object(
        'client', (SELECT to_jsonb(u) - 'password' FROM "User" u WHERE u.id = r."clientId"),
        'professional', (
            SELECT (to_jsonb(u) - 'password') || jsonb_build_object(
                'Profession', (SELECT to_jsonb(pr) FROM "Profession" pr WHERE pr.id = u."professionId")
            )
            FROM "User" u WHERE u.id = r."professionalId"
        ),
        'Category', (SELECT to_jsonb(c) FROM "Category" c WHERE c.id = r."categoryId"),
        'Subcategory', (SELECT to_jsonb(s) FROM "Subcategory" s WHERE s.id = r."subcategoryId"),
        'quotes', COALESCE((
            SELECT jsonb_agg(
                to_jsonb(q) || jsonb_build_object(
                    'items', COALESCE((
                        SELECT jsonb_agg(to_jsonb(i) ORDER BY i."order")
                        FROM "QuoteItem" i WHERE i."quoteId" = q.id
                    ), '[]'::jsonb),
                    'User', (SELECT to_jsonb(u) - 'password' FROM "User" u WHERE u.id = q."professionalId")
                )
                ORDER BY q."createdAt" DESC
            )
            FROM "Quote" q WHERE q."requestId" = r.id
        ), '[]'::jsonb),
        'RequestAttachment', COALESCE((
            SELECT jsonb_agg(to_jsonb(a) ORDER BY a."createdAt")
            FROM "RequestAttachment" a WHERE a."requestId" = r.id
        ), '[]'::jsonb),
        'RequestUpdate', COALESCE((
            SELECT jsonb_agg(
                to_jsonb(ru) || jsonb_build_object(
                    'User', (SELECT to_jsonb(u) - 'password' FROM "User" u WHERE u.id = ru."userId")
                )
                ORDER BY ru."createdAt" DESC
            )
            FROM "RequestUpdate" ru WHERE ru."requestId" = r.id
        ), '[]'::jsonb),
        'Message', COALESCE((
            SELECT jsonb_agg(
                to_jsonb(m) || jsonb_build_object(
                    'sender', (SELECT to_jsonb(u) - 'password' FROM "User" u WHERE u.id = m."senderId"),
                    'recipient', (SELECT to_jsonb(u) - 'password' FROM "User" u WHERE u.id = m."recipientId")
                )
                ORDER BY m."createdAt"
            )
            FROM "Message" m WHERE m."requestId" = r.id
        ), '[]'::jsonb)
    )"#;

/// Optional filters; a `NULL` parameter disables its clause.
const FILTER: &str = r#"
    WHERE ($1::text IS NULL OR r.status = $1)
      AND ($2::text IS NULL OR r.priority = $2)
      AND ($3::text IS NULL OR r."categoryId" = $3)"#;

/// Read access to assistance requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Find a request with all of its relations.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Value>, sqlx::Error> {
        let query = format!(
            r#"SELECT to_jsonb(r) || {DETAIL_RELATIONS} FROM "AssistanceRequest" r WHERE r.id = $1"#
        );
        sqlx::query_scalar::<_, Value>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &RequestFilter,
        page: PageRequest,
    ) -> Result<Vec<Value>, sqlx::Error> {
        let query = format!(
            r#"SELECT to_jsonb(r) || {LIST_RELATIONS}
               FROM "AssistanceRequest" r
               {FILTER}
               ORDER BY r."createdAt" DESC
               LIMIT $4 OFFSET $5"#
        );
        sqlx::query_scalar::<_, Value>(&query)
            .bind(filter.status.as_deref())
            .bind(filter.priority.as_deref())
            .bind(filter.category_id.as_deref())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Count requests matching the filter, ignoring pagination.
    pub async fn count(pool: &PgPool, filter: &RequestFilter) -> Result<i64, sqlx::Error> {
        let query = format!(r#"SELECT COUNT(*) FROM "AssistanceRequest" r {FILTER}"#);
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.status.as_deref())
            .bind(filter.priority.as_deref())
            .bind(filter.category_id.as_deref())
            .fetch_one(pool)
            .await
    }
}
