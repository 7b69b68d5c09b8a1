//! Defensive ISO-8601 serialization for date fields.
//!
//! Dates reach the shaping layer as ISO strings, loosely formatted strings,
//! native `chrono` values, or garbage. [`safe_to_iso_string`] handles raw JSON
//! fields; [`iso_from`] is the entry point for native values such as the
//! health monitor's probe timestamps. Both produce `YYYY-MM-DDTHH:MM:SS.sssZ`
//! or `None`, never a panic.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;
use serde_json::Value;

/// Strings that already start like an ISO timestamp are returned untouched.
static ISO_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("valid regex"));

/// Minute-precision layouts with an explicit offset (`+01:00`, `+0100`).
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Naive date-time layouts tried after the zoned ones. Read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M:%S",
];

/// Date-only layouts. Read as midnight UTC.
const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

/// Error raised by a [`ToIsoString`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    #[error("date is out of the representable range")]
    OutOfRange,

    #[error("date conversion failed: {0}")]
    Conversion(String),
}

/// A value that knows how to render itself as an ISO-8601 timestamp.
pub trait ToIsoString {
    fn to_iso_string(&self) -> Result<String, DateError>;
}

impl ToIsoString for DateTime<Utc> {
    fn to_iso_string(&self) -> Result<String, DateError> {
        Ok(format_iso(self))
    }
}

impl ToIsoString for DateTime<FixedOffset> {
    fn to_iso_string(&self) -> Result<String, DateError> {
        Ok(format_iso(&self.with_timezone(&Utc)))
    }
}

impl ToIsoString for NaiveDateTime {
    fn to_iso_string(&self) -> Result<String, DateError> {
        Ok(format_iso(&self.and_utc()))
    }
}

impl ToIsoString for NaiveDate {
    fn to_iso_string(&self) -> Result<String, DateError> {
        let midnight = self.and_hms_opt(0, 0, 0).ok_or(DateError::OutOfRange)?;
        midnight.to_iso_string()
    }
}

/// Render a UTC timestamp with millisecond precision and a `Z` suffix.
pub fn format_iso(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Convert a raw JSON date field to an ISO string.
///
/// - missing or `null` -> `None`
/// - string with an ISO `YYYY-MM-DDTHH:MM:SS` prefix -> unchanged
/// - any other string -> parsed, `None` when unparseable
/// - anything else -> `None`, with a warning
///
/// ```
/// use richiesta_core::shaping::safe_to_iso_string;
/// use serde_json::json;
///
/// let iso = json!("2024-03-05T10:00:00.000Z");
/// assert_eq!(safe_to_iso_string(Some(&iso)).as_deref(), Some("2024-03-05T10:00:00.000Z"));
/// assert_eq!(
///     safe_to_iso_string(Some(&json!("2024-03-05"))).as_deref(),
///     Some("2024-03-05T00:00:00.000Z")
/// );
/// assert_eq!(safe_to_iso_string(Some(&json!("not-a-date"))), None);
/// ```
pub fn safe_to_iso_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) if ISO_PREFIX_RE.is_match(text) => Some(text.clone()),
        Value::String(text) => parse_loose(text).map(|parsed| format_iso(&parsed)),
        Value::Bool(false) => None,
        other => {
            tracing::warn!(value = %other, kind = json_kind(other), "Unable to format date");
            None
        }
    }
}

/// Convert any [`ToIsoString`] value, logging and returning `None` on error.
pub fn iso_from<T: ToIsoString + ?Sized>(value: &T) -> Option<String> {
    match value.to_iso_string() {
        Ok(iso) => Some(iso),
        Err(e) => {
            tracing::warn!(error = %e, "Error converting date to ISO string");
            None
        }
    }
}

fn parse_loose(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(text, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }
    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
