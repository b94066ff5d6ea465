//! Numeric coercion of JSON numbers.

use crate::Error;
use serde_json::{Number, Value};

/// The representations a JSON number can have.
///
/// Integer schema nodes validate `i64` values and number nodes validate `f64` values,
/// every representation is converted to those explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

// 2^63, the first float above the i64 range.
pub(crate) const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

impl JsonNumber {
    /// Convert to a signed integer, failing for fractions and out of range values.
    pub fn to_i64(self) -> Result<i64, Error> {
        match self {
            JsonNumber::Signed(v) => Ok(v),
            JsonNumber::Unsigned(v) => i64::try_from(v).map_err(|_| {
                Error::violation(format!("uint64 value {} exceeds maximum int64", v))
            }),
            JsonNumber::Float(v) => {
                if v.trunc() != v {
                    violation!(
                        "expected integer value, got float with fractional part: {}",
                        v
                    );
                }
                if v >= I64_LIMIT || v < -I64_LIMIT {
                    violation!("float value {} exceeds int64 range", v);
                }
                Ok(v as i64)
            }
        }
    }

    /// Widen to a float, large integers lose precision.
    pub fn to_f64(self) -> f64 {
        match self {
            JsonNumber::Signed(v) => v as f64,
            JsonNumber::Unsigned(v) => v as f64,
            JsonNumber::Float(v) => v,
        }
    }
}

/// A copy of `value` where integral floats inside the i64 range are integers,
/// so that `1` and `1.0` compare and serialize the same.
pub(crate) fn canonical(value: &Value) -> Value {
    match value {
        Value::Number(n) => match JsonNumber::from(n) {
            JsonNumber::Float(v) if v.trunc() == v && v >= -I64_LIMIT && v < I64_LIMIT => {
                Value::from(v as i64)
            }
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), canonical(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// An `i64` bound derived from a float bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum IntegerBound {
    /// Every `i64` satisfies the bound.
    Unbounded,
    At(i64),
    /// No `i64` satisfies the bound.
    Unsatisfiable,
}

impl IntegerBound {
    /// Lower bound from an integral float.
    pub(crate) fn lower(bound: f64) -> Self {
        if bound < -I64_LIMIT {
            IntegerBound::Unbounded
        } else if bound >= I64_LIMIT {
            IntegerBound::Unsatisfiable
        } else {
            IntegerBound::At(bound as i64)
        }
    }

    /// Upper bound from an integral float.
    pub(crate) fn upper(bound: f64) -> Self {
        if bound >= I64_LIMIT {
            IntegerBound::Unbounded
        } else if bound < -I64_LIMIT {
            IntegerBound::Unsatisfiable
        } else {
            IntegerBound::At(bound as i64)
        }
    }

    /// Shift an exact bound, overflowing shifts can not be satisfied.
    pub(crate) fn shift(self, f: impl FnOnce(i64) -> Option<i64>) -> Self {
        match self {
            IntegerBound::At(v) => f(v).map_or(IntegerBound::Unsatisfiable, IntegerBound::At),
            other => other,
        }
    }
}

impl From<&Number> for JsonNumber {
    fn from(n: &Number) -> Self {
        if let Some(v) = n.as_i64() {
            JsonNumber::Signed(v)
        } else if let Some(v) = n.as_u64() {
            JsonNumber::Unsigned(v)
        } else {
            JsonNumber::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}
