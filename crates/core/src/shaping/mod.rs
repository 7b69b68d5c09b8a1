//! Response shaping: raw records in, frontend-stable shapes out.
//!
//! Every `format_*` function takes `Option<&Value>` and returns `None` for a
//! missing, `null` or non-object record. Otherwise it builds a new value:
//!
//! - identifiers are passed through unchanged;
//! - enum fields follow the per-entity casing policy in [`casing`];
//! - fixed-point decimals become `f64`, cent amounts stay [`MinorUnits`];
//! - dates go through [`safe_to_iso_string`];
//! - relations are looked up under every known spelling via
//!   [`pick_relation`] and formatted recursively (`null` / `[]` when absent).
//!
//! Formatting never fails. Malformed fields degrade to `null` and a
//! `tracing` warning.

pub mod casing;
pub mod dates;
pub mod money;
pub mod notification;
pub mod quote;
pub mod record;
pub mod request;
pub mod taxonomy;
pub mod user;

use serde_json::Value;

pub use casing::{EntityKind, EnumCase};
pub use dates::{format_iso, iso_from, safe_to_iso_string, DateError, ToIsoString};
pub use money::{decimal_to_f64, MinorUnits};
pub use notification::{format_notification, FormattedNotification};
pub use quote::{
    format_payment, format_quote, format_quote_item, FormattedPayment, FormattedQuote,
    FormattedQuoteItem,
};
pub use record::{pick_relation, RawRecord};
pub use request::{
    format_assistance_request, format_attachment, format_message, format_request_update,
    FormattedAssistanceRequest, FormattedAttachment, FormattedMessage, FormattedRequestUpdate,
};
pub use taxonomy::{
    format_ai_settings, format_category, format_profession, format_professional_subcategory,
    format_subcategory, FormattedAiSettings, FormattedCategory, FormattedProfession,
    FormattedProfessionalSubcategory, FormattedSubcategory,
};
pub use user::{format_user, FormattedUser};

/// Format every record in a list, dropping entries that are not objects.
fn format_all<T>(records: &[Value], format: fn(Option<&Value>) -> Option<T>) -> Vec<T> {
    records.iter().filter_map(|record| format(Some(record))).collect()
}

pub fn format_assistance_request_list(records: &[Value]) -> Vec<FormattedAssistanceRequest> {
    format_all(records, format_assistance_request)
}

pub fn format_quote_list(records: &[Value]) -> Vec<FormattedQuote> {
    format_all(records, format_quote)
}

pub fn format_user_list(records: &[Value]) -> Vec<FormattedUser> {
    format_all(records, format_user)
}

pub fn format_category_list(records: &[Value]) -> Vec<FormattedCategory> {
    format_all(records, format_category)
}

pub fn format_subcategory_list(records: &[Value]) -> Vec<FormattedSubcategory> {
    format_all(records, format_subcategory)
}

pub fn format_notification_list(records: &[Value]) -> Vec<FormattedNotification> {
    format_all(records, format_notification)
}

pub fn format_attachment_list(records: &[Value]) -> Vec<FormattedAttachment> {
    format_all(records, format_attachment)
}

pub fn format_professional_subcategory_list(
    records: &[Value],
) -> Vec<FormattedProfessionalSubcategory> {
    format_all(records, format_professional_subcategory)
}
