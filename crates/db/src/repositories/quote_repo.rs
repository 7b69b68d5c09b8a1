//! Repository for the `Quote` table.

use serde_json::Value;
use sqlx::PgPool;

/// Items and payments embedded under their table names.
const LINE_RELATIONS: &str = r#"
    'QuoteItem', COALESCE((
        SELECT jsonb_agg(to_jsonb(i) ORDER BY i."order")
        FROM "QuoteItem" i WHERE i."quoteId" = q.id
    ), '[]'::jsonb),
    'Payment', COALESCE((
        SELECT jsonb_agg(to_jsonb(p) ORDER BY p."createdAt" DESC)
        FROM "Payment" p WHERE p."quoteId" = q.id
    ), '[]'::jsonb)"#;

/// The quoting professional with their profession.
const PROFESSIONAL: &str = r#"
    'User', (
        SELECT (to_jsonb(u) - 'password') || jsonb_build_object(
            'Profession', (SELECT to_jsonb(pr) FROM "Profession" pr WHERE pr.id = u."professionId")
        )
        FROM "User" u WHERE u.id = q."professionalId"
    )"#;

/// Read access to quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Find a quote with its professional, request, items and payments.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Value>, sqlx::Error> {
        let query = format!(
            r#"SELECT to_jsonb(q) || jsonb_build_object(
                   {PROFESSIONAL},
                   'AssistanceRequest', (
                       SELECT to_jsonb(r) || jsonb_build_object(
                           'client', (SELECT to_jsonb(u) - 'password' FROM "User" u WHERE u.id = r."clientId"),
                           'Category', (SELECT to_jsonb(c) FROM "Category" c WHERE c.id = r."categoryId")
                       )
                       FROM "AssistanceRequest" r WHERE r.id = q."requestId"
                   ),
                   {LINE_RELATIONS}
               )
               FROM "Quote" q WHERE q.id = $1"#
        );
        sqlx::query_scalar::<_, Value>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every quote for a request, newest first.
    pub async fn list_for_request(
        pool: &PgPool,
        request_id: &str,
    ) -> Result<Vec<Value>, sqlx::Error> {
        let query = format!(
            r#"SELECT to_jsonb(q) || jsonb_build_object({PROFESSIONAL}, {LINE_RELATIONS})
               FROM "Quote" q
               WHERE q."requestId" = $1
               ORDER BY q."createdAt" DESC"#
        );
        sqlx::query_scalar::<_, Value>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }
}
