//! Monetary field coercion.
//!
//! Two representations coexist in storage: fixed-point decimals in major
//! currency units (quote amounts, hourly rates) and integers in minor units
//! (quote item prices, payments). Decimals are coerced to `f64` with the same
//! magnitude; minor units are carried as [`MinorUnits`] and never rescaled.

use std::iter::Sum;
use std::ops::Add;

use serde::Serialize;
use serde_json::Value;

/// An amount in the smallest currency denomination (cents).
///
/// Serializes as a bare integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MinorUnits(pub i64);

impl MinorUnits {
    /// Read a minor-unit amount from a raw JSON value.
    ///
    /// Accepts integers, whole floats (`2000.0`) and integer strings. A
    /// fractional value is not a valid minor-unit amount and yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(whole_f64_to_i64))
                .map(MinorUnits),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole_f64_to_i64))
                    .map(MinorUnits)
            }
            _ => None,
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Add for MinorUnits {
    type Output = MinorUnits;

    fn add(self, rhs: MinorUnits) -> MinorUnits {
        MinorUnits(self.0.saturating_add(rhs.0))
    }
}

impl Sum for MinorUnits {
    fn sum<I: Iterator<Item = MinorUnits>>(iter: I) -> MinorUnits {
        iter.fold(MinorUnits::default(), Add::add)
    }
}

/// Coerce a fixed-point decimal (JSON number or decimal string such as
/// `"99.99"`) to a float of the same magnitude.
///
/// Returns `None` for anything that is not a finite number.
pub fn decimal_to_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn whole_f64_to_i64(value: f64) -> Option<i64> {
    let in_range = value.is_finite() && value.abs() < i64::MAX as f64;
    (in_range && value.fract() == 0.0).then_some(value as i64)
}
