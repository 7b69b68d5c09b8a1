//! Notification formatting.

use serde::Serialize;
use serde_json::Value;

use super::casing::EntityKind;
use super::record::RawRecord;
use super::user::{format_user, FormattedUser};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedNotification {
    pub id: Value,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Kept upper-case, `NORMAL` when unset.
    pub priority: Option<String>,
    pub recipient_id: Value,
    pub sender_id: Value,
    pub entity_type: Option<String>,
    pub entity_id: Value,
    pub is_read: Option<bool>,
    pub read_at: Option<String>,
    pub metadata: Value,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub recipient: Option<FormattedUser>,
    pub sender: Option<FormattedUser>,
}

pub fn format_notification(raw: Option<&Value>) -> Option<FormattedNotification> {
    let notification = RawRecord::new(EntityKind::Notification, raw)?;

    Some(FormattedNotification {
        id: notification.raw("id"),
        notification_type: notification.string("type"),
        title: notification.string("title"),
        content: notification.string("content"),
        priority: notification.enumeration("priority", Some("NORMAL")),
        recipient_id: notification.raw("recipientId"),
        sender_id: notification.raw("senderId"),
        entity_type: notification.string("entityType"),
        entity_id: notification.raw("entityId"),
        is_read: notification.bool("isRead"),
        read_at: notification.date("readAt"),
        metadata: notification.raw("metadata"),
        created_at: notification.date("createdAt"),
        updated_at: notification.date("updatedAt"),
        recipient: format_user(notification.relation(&["Recipient", "recipient"])),
        sender: format_user(notification.relation(&["Sender", "sender"])),
    })
}
