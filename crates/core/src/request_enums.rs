//! Stored values of the assistance request enums.
//!
//! These must match the defaults in `crates/db/migrations`. Values are stored
//! upper-case; the shaping layer lower-cases them on the way out.

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_ASSIGNED: &str = "ASSIGNED";
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const STATUS_COMPLETED: &str = "COMPLETED";
pub const STATUS_CANCELLED: &str = "CANCELLED";

pub const REQUEST_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_ASSIGNED,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

pub const PRIORITY_LOW: &str = "LOW";
pub const PRIORITY_MEDIUM: &str = "MEDIUM";
pub const PRIORITY_HIGH: &str = "HIGH";
pub const PRIORITY_URGENT: &str = "URGENT";

pub const REQUEST_PRIORITIES: &[&str] =
    &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH, PRIORITY_URGENT];

/// Upper-case a filter value and return it if it names one of `allowed`.
pub fn to_stored(value: &str, allowed: &[&str]) -> Option<String> {
    let upper = value.trim().to_ascii_uppercase();
    allowed.contains(&upper.as_str()).then_some(upper)
}
