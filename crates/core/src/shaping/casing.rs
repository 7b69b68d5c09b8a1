//! Per-entity enum casing policy.
//!
//! Enum values are stored upper-case. The frontend expects assistance
//! requests, payments and messages in lower-case, while users, quotes and
//! notifications keep the stored upper-case form. The asymmetry is part of
//! the frontend contract and must not be unified here.

/// How an entity's enumerated fields are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCase {
    /// Emit lower-case (`PENDING` -> `pending`).
    Lower,
    /// Emit the stored value unchanged.
    Preserve,
}

impl EnumCase {
    pub fn apply(self, raw: &str) -> String {
        match self {
            EnumCase::Lower => raw.to_lowercase(),
            EnumCase::Preserve => raw.to_owned(),
        }
    }
}

/// Entity types known to the shaping layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    AssistanceRequest,
    User,
    Profession,
    Quote,
    QuoteItem,
    Payment,
    Category,
    Subcategory,
    AiSettings,
    ProfessionalSubcategory,
    Attachment,
    RequestUpdate,
    Message,
    Notification,
}

impl EntityKind {
    /// Casing applied to this entity's status/priority/type fields.
    ///
    /// | Entity                               | Casing     |
    /// |--------------------------------------|------------|
    /// | AssistanceRequest, Payment, Message  | lower-case |
    /// | everything else                      | preserved  |
    pub fn enum_case(self) -> EnumCase {
        match self {
            EntityKind::AssistanceRequest | EntityKind::Payment | EntityKind::Message => {
                EnumCase::Lower
            }
            _ => EnumCase::Preserve,
        }
    }

    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::AssistanceRequest => "AssistanceRequest",
            EntityKind::User => "User",
            EntityKind::Profession => "Profession",
            EntityKind::Quote => "Quote",
            EntityKind::QuoteItem => "QuoteItem",
            EntityKind::Payment => "Payment",
            EntityKind::Category => "Category",
            EntityKind::Subcategory => "Subcategory",
            EntityKind::AiSettings => "SubcategoryAiSettings",
            EntityKind::ProfessionalSubcategory => "ProfessionalUserSubcategory",
            EntityKind::Attachment => "RequestAttachment",
            EntityKind::RequestUpdate => "RequestUpdate",
            EntityKind::Message => "Message",
            EntityKind::Notification => "Notification",
        }
    }
}
