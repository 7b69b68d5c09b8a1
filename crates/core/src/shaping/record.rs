//! Read-only accessor over a raw record returned by the data-access layer.
//!
//! Raw records are JSON objects whose relations may be keyed under more than
//! one spelling (`Category` vs `category`, `QuoteItem` vs `items`). All lookups
//! of that kind go through [`pick_relation`] so the aliasing lives in one place.

use serde_json::Value;

use super::casing::EntityKind;
use super::dates::safe_to_iso_string;
use super::money::{decimal_to_f64, MinorUnits};

/// Return the first relation stored under any of `keys` that is present and
/// not `null`.
///
/// Keys are tried in order, so callers list the canonical capitalized relation
/// name first and the lowercase aliases after it.
///
/// ```
/// use richiesta_core::shaping::pick_relation;
/// use serde_json::json;
///
/// let record = json!({ "Profession": { "name": "Idraulico" } });
/// let found = pick_relation(&record, &["Profession", "professionData"]);
/// assert_eq!(found, Some(&json!({ "name": "Idraulico" })));
/// ```
pub fn pick_relation<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let fields = record.as_object()?;
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

/// A raw record known to be a JSON object, tagged with its entity kind for
/// diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    kind: EntityKind,
    value: &'a Value,
}

impl<'a> RawRecord<'a> {
    /// Wrap a raw value.
    ///
    /// Returns `None` for a missing value, JSON `null`, or anything that is
    /// not an object. Non-object values are logged since they indicate a
    /// data-access bug rather than an absent relation.
    pub fn new(kind: EntityKind, value: Option<&'a Value>) -> Option<Self> {
        match value {
            None | Some(Value::Null) => None,
            Some(value @ Value::Object(_)) => Some(Self { kind, value }),
            Some(other) => {
                tracing::warn!(
                    entity = kind.name(),
                    value = %other,
                    "Expected an object record, formatting as null"
                );
                None
            }
        }
    }

    /// Field value, treating JSON `null` as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.value.get(key).filter(|value| !value.is_null())
    }

    /// Field value passed through unchanged (`null` when absent).
    pub fn raw(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }

    /// String field. Non-string values are dropped.
    pub fn string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_owned)
    }

    /// Boolean field. Non-boolean values are dropped.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Whole-number field, accepting integer strings.
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Numeric field coerced from a fixed-point decimal (number or decimal
    /// string).
    pub fn decimal(&self, key: &str) -> Option<f64> {
        let value = self.get(key)?;
        let coerced = decimal_to_f64(value);
        if coerced.is_none() {
            tracing::warn!(
                entity = self.kind.name(),
                field = key,
                value = %value,
                "Unable to coerce decimal field"
            );
        }
        coerced
    }

    /// Monetary field already stored in integer minor units.
    pub fn minor_units(&self, key: &str) -> Option<MinorUnits> {
        let value = self.get(key)?;
        let units = MinorUnits::from_value(value);
        if units.is_none() {
            tracing::warn!(
                entity = self.kind.name(),
                field = key,
                value = %value,
                "Minor-unit amount is not a whole number"
            );
        }
        units
    }

    /// Date field serialized through [`safe_to_iso_string`].
    pub fn date(&self, key: &str) -> Option<String> {
        safe_to_iso_string(self.get(key))
    }

    /// Enumerated field normalized with this entity's casing policy.
    pub fn enumeration(&self, key: &str, default: Option<&str>) -> Option<String> {
        let case = self.kind.enum_case();
        match self.get(key).and_then(Value::as_str) {
            Some(raw) if !raw.is_empty() => Some(case.apply(raw)),
            _ => default.map(str::to_owned),
        }
    }

    /// Single relation stored under any of `keys`.
    pub fn relation(&self, keys: &[&str]) -> Option<&'a Value> {
        pick_relation(self.value, keys)
    }

    /// Collection relation stored under any of `keys`; empty when absent.
    pub fn collection(&self, keys: &[&str]) -> &'a [Value] {
        match self.relation(keys) {
            None => &[],
            Some(Value::Array(items)) => items,
            Some(other) => {
                tracing::warn!(
                    entity = self.kind.name(),
                    keys = ?keys,
                    value = %other,
                    "Expected an array relation, formatting as empty"
                );
                &[]
            }
        }
    }

    /// Nested count record (`_count`).
    pub fn counts(&self) -> Option<RawCounts<'a>> {
        self.get("_count")
            .filter(|value| value.is_object())
            .map(|value| RawCounts { value })
    }
}

/// Accessor over a `_count` sub-record.
#[derive(Debug, Clone, Copy)]
pub struct RawCounts<'a> {
    value: &'a Value,
}

impl RawCounts<'_> {
    /// First non-zero count stored under any of `keys`, else `0`.
    pub fn first_nonzero(&self, keys: &[&str]) -> i64 {
        keys.iter()
            .filter_map(|key| self.value.get(*key).and_then(Value::as_i64))
            .find(|count| *count != 0)
            .unwrap_or(0)
    }
}
