//! Repository for the `Notification` table.

use serde_json::Value;
use sqlx::PgPool;

use crate::store::PageRequest;

/// Read access to notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// List notifications for a recipient, newest first.
    ///
    /// When `unread_only` is set, read notifications are excluded.
    pub async fn list_for_recipient(
        pool: &PgPool,
        recipient_id: &str,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Value>, sqlx::Error> {
        sqlx::query_scalar::<_, Value>(
            r#"SELECT to_jsonb(n) || jsonb_build_object(
                   'sender', (SELECT to_jsonb(u) - 'password' FROM "User" u WHERE u.id = n."senderId")
               )
               FROM "Notification" n
               WHERE n."recipientId" = $1
                 AND (NOT $2 OR NOT n."isRead")
               ORDER BY n."createdAt" DESC
               LIMIT $3 OFFSET $4"#,
        )
        .bind(recipient_id)
        .bind(unread_only)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(pool)
        .await
    }
}
