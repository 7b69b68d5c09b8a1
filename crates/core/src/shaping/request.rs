//! Assistance request formatting, plus the records that hang off a request
//! (attachments, status updates, chat messages).

use serde::Serialize;
use serde_json::Value;

use super::casing::EntityKind;
use super::quote::{format_quote, FormattedQuote};
use super::record::RawRecord;
use super::taxonomy::{format_category, format_subcategory, FormattedCategory, FormattedSubcategory};
use super::user::{format_user, FormattedUser};

/// Frontend shape of a service ticket.
///
/// `status`, `priority` and `assignmentType` are lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedAssistanceRequest {
    pub id: Value,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub client_id: Value,
    pub professional_id: Value,
    pub category_id: Value,
    pub subcategory_id: Value,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub requested_date: Option<String>,
    pub scheduled_date: Option<String>,
    pub completed_date: Option<String>,
    pub assigned_date: Option<String>,
    pub assignment_type: Option<String>,
    pub assigned_by: Value,
    pub assigned_at: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub public_notes: Option<String>,
    pub internal_notes: Option<String>,
    pub tags: Value,
    pub custom_fields: Value,
    pub distance: Option<f64>,
    pub distance_text: Option<String>,
    pub duration: Option<f64>,
    pub duration_text: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub client: Option<FormattedUser>,
    pub professional: Option<FormattedUser>,
    pub category: Option<FormattedCategory>,
    pub subcategory: Option<FormattedSubcategory>,
    pub quotes: Vec<FormattedQuote>,
    pub attachments: Vec<FormattedAttachment>,
    pub updates: Vec<FormattedRequestUpdate>,
    pub messages: Vec<FormattedMessage>,
}

pub fn format_assistance_request(raw: Option<&Value>) -> Option<FormattedAssistanceRequest> {
    let request = RawRecord::new(EntityKind::AssistanceRequest, raw)?;

    Some(FormattedAssistanceRequest {
        id: request.raw("id"),
        title: request.string("title"),
        description: request.string("description"),
        status: request.enumeration("status", Some("pending")),
        priority: request.enumeration("priority", Some("medium")),
        client_id: request.raw("clientId"),
        professional_id: request.raw("professionalId"),
        category_id: request.raw("categoryId"),
        subcategory_id: request.raw("subcategoryId"),
        address: request.string("address"),
        city: request.string("city"),
        province: request.string("province"),
        postal_code: request.string("postalCode"),
        latitude: request.decimal("latitude"),
        longitude: request.decimal("longitude"),
        requested_date: request.date("requestedDate"),
        scheduled_date: request.date("scheduledDate"),
        completed_date: request.date("completedDate"),
        assigned_date: request.date("assignedDate"),
        assignment_type: request.enumeration("assignmentType", None),
        assigned_by: request.raw("assignedBy"),
        assigned_at: request.date("assignedAt"),
        estimated_hours: request.decimal("estimatedHours"),
        actual_hours: request.decimal("actualHours"),
        public_notes: request.string("publicNotes"),
        internal_notes: request.string("internalNotes"),
        tags: request.raw("tags"),
        custom_fields: request.raw("customFields"),
        distance: request.decimal("distance"),
        distance_text: request.string("distanceText"),
        duration: request.decimal("duration"),
        duration_text: request.string("durationText"),
        created_at: request.date("createdAt"),
        updated_at: request.date("updatedAt"),
        client: format_user(request.relation(&["client"])),
        professional: format_user(request.relation(&["professional"])),
        category: format_category(request.relation(&["Category", "category"])),
        subcategory: format_subcategory(request.relation(&["Subcategory", "subcategory"])),
        quotes: request
            .collection(&["Quote", "quotes"])
            .iter()
            .filter_map(|quote| format_quote(Some(quote)))
            .collect(),
        attachments: request
            .collection(&["RequestAttachment", "attachments"])
            .iter()
            .filter_map(|attachment| format_attachment(Some(attachment)))
            .collect(),
        updates: request
            .collection(&["RequestUpdate", "updates"])
            .iter()
            .filter_map(|update| format_request_update(Some(update)))
            .collect(),
        messages: request
            .collection(&["Message", "messages"])
            .iter()
            .filter_map(|message| format_message(Some(message)))
            .collect(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedAttachment {
    pub id: Value,
    pub request_id: Value,
    /// Owning user, read from the stored `userId`.
    pub recipient_id: Value,
    pub file_name: Option<String>,
    pub original_name: Option<String>,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub thumbnail_path: Option<String>,
    pub is_public: Option<bool>,
    pub description: Option<String>,
    pub metadata: Value,
    pub created_at: Option<String>,
    pub user: Option<FormattedUser>,
    pub request: Option<Box<FormattedAssistanceRequest>>,
}

pub fn format_attachment(raw: Option<&Value>) -> Option<FormattedAttachment> {
    let attachment = RawRecord::new(EntityKind::Attachment, raw)?;

    Some(FormattedAttachment {
        id: attachment.raw("id"),
        request_id: attachment.raw("requestId"),
        recipient_id: attachment.raw("userId"),
        file_name: attachment.string("fileName"),
        original_name: attachment.string("originalName"),
        file_path: attachment.string("filePath"),
        file_type: attachment.string("fileType"),
        file_size: attachment.integer("fileSize"),
        thumbnail_path: attachment.string("thumbnailPath"),
        is_public: attachment.bool("isPublic"),
        description: attachment.string("description"),
        metadata: attachment.raw("metadata"),
        created_at: attachment.date("createdAt"),
        user: format_user(attachment.relation(&["User", "user"])),
        request: format_assistance_request(attachment.relation(&[
            "AssistanceRequest",
            "assistanceRequest",
            "request",
        ]))
        .map(Box::new),
    })
}

/// A status-change or note entry in a request's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedRequestUpdate {
    pub id: Value,
    pub request_id: Value,
    /// Owning user, read from the stored `userId`.
    pub recipient_id: Value,
    pub update_type: Option<String>,
    pub description: Option<String>,
    pub metadata: Value,
    pub created_at: Option<String>,
    pub user: Option<FormattedUser>,
}

pub fn format_request_update(raw: Option<&Value>) -> Option<FormattedRequestUpdate> {
    let update = RawRecord::new(EntityKind::RequestUpdate, raw)?;

    Some(FormattedRequestUpdate {
        id: update.raw("id"),
        request_id: update.raw("requestId"),
        recipient_id: update.raw("userId"),
        update_type: update.string("updateType"),
        description: update.string("description"),
        metadata: update.raw("metadata"),
        created_at: update.date("createdAt"),
        user: format_user(update.relation(&["User", "user"])),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedMessage {
    pub id: Value,
    pub request_id: Value,
    pub sender_id: Value,
    pub recipient_id: Value,
    pub content: Option<String>,
    pub attachments: Value,
    pub is_read: Option<bool>,
    pub read_at: Option<String>,
    pub edited_at: Option<String>,
    pub deleted_at: Option<String>,
    pub created_at: Option<String>,
    pub sender: Option<FormattedUser>,
    pub recipient: Option<FormattedUser>,
}

pub fn format_message(raw: Option<&Value>) -> Option<FormattedMessage> {
    let message = RawRecord::new(EntityKind::Message, raw)?;

    Some(FormattedMessage {
        id: message.raw("id"),
        request_id: message.raw("requestId"),
        sender_id: message.raw("senderId"),
        recipient_id: message.raw("recipientId"),
        content: message.string("content"),
        attachments: message.raw("attachments"),
        is_read: message.bool("isRead"),
        read_at: message.date("readAt"),
        edited_at: message.date("editedAt"),
        deleted_at: message.date("deletedAt"),
        created_at: message.date("createdAt"),
        sender: format_user(message.relation(&["Sender", "sender"])),
        recipient: format_user(message.relation(&["Recipient", "recipient"])),
    })
}
