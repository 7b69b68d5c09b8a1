//! Quote, quote item and payment formatting.
//!
//! Quote amounts are fixed-point decimals in major units. Item prices and
//! payment amounts are already stored in cents and are passed through as
//! [`MinorUnits`]. `totalAmount` mixes the two exactly as the frontend expects:
//! the sum of item totals (cents) when items exist, else the quote amount.

use serde::Serialize;
use serde_json::{Number, Value};

use super::casing::EntityKind;
use super::money::MinorUnits;
use super::record::RawRecord;
use super::request::{format_assistance_request, FormattedAssistanceRequest};
use super::user::{format_user, FormattedUser};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedQuote {
    pub id: Value,
    pub request_id: Value,
    pub professional_id: Value,
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: f64,
    pub total_amount: Number,
    pub currency: Option<String>,
    /// Kept upper-case (`DRAFT`, `PENDING`, `ACCEPTED`, ...).
    pub status: String,
    pub version: Option<i64>,
    pub valid_until: Option<String>,
    pub expires_at: Option<String>,
    pub accepted_at: Option<String>,
    pub rejected_at: Option<String>,
    pub rejection_reason: Option<String>,
    pub terms: Option<String>,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub attachments: Value,
    pub custom_fields: Value,
    pub deposit_required: Option<bool>,
    pub deposit_amount: Option<f64>,
    pub deposit_paid: Option<bool>,
    pub deposit_paid_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub professional: Option<FormattedUser>,
    pub request: Option<Box<FormattedAssistanceRequest>>,
    pub items: Vec<FormattedQuoteItem>,
    pub payments: Vec<FormattedPayment>,
}

/// Format a raw quote record.
///
/// ```
/// use richiesta_core::shaping::format_quote;
/// use serde_json::json;
///
/// let quote = format_quote(Some(&json!({ "id": "q1", "amount": "99.99", "status": "ACCEPTED" })))
///     .unwrap();
/// assert_eq!(quote.amount, 99.99);
/// assert_eq!(quote.total_amount.as_f64(), Some(99.99));
/// assert_eq!(quote.status, "ACCEPTED");
/// ```
pub fn format_quote(raw: Option<&Value>) -> Option<FormattedQuote> {
    let quote = RawRecord::new(EntityKind::Quote, raw)?;

    let items: Vec<FormattedQuoteItem> = quote
        .collection(&["QuoteItem", "items"])
        .iter()
        .filter_map(|item| format_quote_item(Some(item)))
        .collect();
    let amount = quote.decimal("amount").unwrap_or(0.0);
    let total_amount = total_amount(&items, amount);

    Some(FormattedQuote {
        id: quote.raw("id"),
        request_id: quote.raw("requestId"),
        professional_id: quote.raw("professionalId"),
        title: quote.string("title"),
        description: quote.string("description"),
        amount,
        total_amount,
        currency: quote.string("currency"),
        status: quote
            .enumeration("status", Some("DRAFT"))
            .unwrap_or_else(|| "DRAFT".to_owned()),
        version: quote.integer("version"),
        valid_until: quote.date("validUntil"),
        expires_at: quote.date("expiresAt"),
        accepted_at: quote.date("acceptedAt"),
        rejected_at: quote.date("rejectedAt"),
        rejection_reason: quote.string("rejectionReason"),
        terms: quote.string("terms"),
        notes: quote.string("notes"),
        internal_notes: quote.string("internalNotes"),
        attachments: quote.raw("attachments"),
        custom_fields: quote.raw("customFields"),
        deposit_required: quote.bool("depositRequired"),
        deposit_amount: quote.decimal("depositAmount"),
        deposit_paid: quote.bool("depositPaid"),
        deposit_paid_at: quote.date("depositPaidAt"),
        created_at: quote.date("createdAt"),
        updated_at: quote.date("updatedAt"),
        professional: format_user(quote.relation(&["User", "professional"])),
        request: format_assistance_request(quote.relation(&[
            "AssistanceRequest",
            "assistanceRequest",
            "request",
        ]))
        .map(Box::new),
        items,
        payments: quote
            .collection(&["Payment", "payments"])
            .iter()
            .filter_map(|payment| format_payment(Some(payment)))
            .collect(),
    })
}

/// Sum of item totals when items exist, else the quote amount.
fn total_amount(items: &[FormattedQuoteItem], amount: f64) -> Number {
    if items.is_empty() {
        return Number::from_f64(amount).unwrap_or_else(|| Number::from(0));
    }
    let total: MinorUnits = items.iter().filter_map(|item| item.total_price).sum();
    Number::from(total.get())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedQuoteItem {
    pub id: Value,
    pub quote_id: Value,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<MinorUnits>,
    pub total_price: Option<MinorUnits>,
    pub tax_rate: Option<f64>,
    pub tax_amount: Option<f64>,
    pub discount: Option<f64>,
    pub order: Option<i64>,
    pub notes: Option<String>,
    pub metadata: Value,
    pub created_at: Option<String>,
}

pub fn format_quote_item(raw: Option<&Value>) -> Option<FormattedQuoteItem> {
    let item = RawRecord::new(EntityKind::QuoteItem, raw)?;

    Some(FormattedQuoteItem {
        id: item.raw("id"),
        quote_id: item.raw("quoteId"),
        description: item.string("description"),
        quantity: item.decimal("quantity"),
        unit_price: item.minor_units("unitPrice"),
        total_price: item.minor_units("totalPrice"),
        tax_rate: item.decimal("taxRate"),
        tax_amount: item.decimal("taxAmount"),
        discount: item.decimal("discount"),
        order: item.integer("order"),
        notes: item.string("notes"),
        metadata: item.raw("metadata"),
        created_at: item.date("createdAt"),
    })
}

/// Frontend shape of a payment. Amounts are in cents; `status` and `type`
/// are lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedPayment {
    pub id: Value,
    pub quote_id: Value,
    /// Owning user, read from the stored `userId`.
    pub recipient_id: Value,
    pub amount: Option<MinorUnits>,
    pub currency: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub payment_type: Option<String>,
    pub method: Option<String>,
    pub transaction_id: Option<String>,
    pub stripe_payment_id: Option<String>,
    pub receipt_url: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub metadata: Value,
    pub processed_at: Option<String>,
    pub failed_at: Option<String>,
    pub failure_reason: Option<String>,
    pub refunded_at: Option<String>,
    pub refund_amount: Option<MinorUnits>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

pub fn format_payment(raw: Option<&Value>) -> Option<FormattedPayment> {
    let payment = RawRecord::new(EntityKind::Payment, raw)?;

    Some(FormattedPayment {
        id: payment.raw("id"),
        quote_id: payment.raw("quoteId"),
        recipient_id: payment.raw("userId"),
        amount: payment.minor_units("amount"),
        currency: payment.string("currency"),
        status: payment.enumeration("status", Some("pending")),
        payment_type: payment.enumeration("type", Some("full_payment")),
        method: payment.string("method"),
        transaction_id: payment.string("transactionId"),
        stripe_payment_id: payment.string("stripePaymentId"),
        receipt_url: payment.string("receiptUrl"),
        description: payment.string("description"),
        notes: payment.string("notes"),
        metadata: payment.raw("metadata"),
        processed_at: payment.date("processedAt"),
        failed_at: payment.date("failedAt"),
        failure_reason: payment.string("failureReason"),
        refunded_at: payment.date("refundedAt"),
        refund_amount: payment.minor_units("refundAmount"),
        created_at: payment.date("createdAt"),
        updated_at: payment.date("updatedAt"),
    })
}
