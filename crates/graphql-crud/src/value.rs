//! Snapshot values and their classification.
//!
//! Snapshots are plain `serde_json` objects. The engine never inspects raw
//! values directly; every field is first classified into a [`Field`] so a
//! record/scalar disagreement between the two sides surfaces as an error
//! instead of being silently treated as a scalar change.

use serde_json::{Map, Value};

/// A nested record: field name to value, in insertion order.
pub type Snapshot = Map<String, Value>;

/// One side of a field, classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    /// Missing key or explicit `null`.
    Absent,
    /// Anything that is not an object, arrays included.
    Scalar(&'a Value),
    /// A nested relation.
    Record(&'a Snapshot),
}

impl<'a> Field<'a> {
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Field::Absent,
            Some(Value::Object(map)) => Field::Record(map),
            Some(other) => Field::Scalar(other),
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Field::Record(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Field::Scalar(_))
    }

    pub fn as_record(&self) -> Option<&'a Snapshot> {
        match self {
            Field::Record(map) => Some(map),
            _ => None,
        }
    }
}

/// JavaScript truthiness of an optional JSON value.
///
/// `None`, `null`, `false`, zero and the empty string are falsy. Objects and
/// arrays are truthy even when empty.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Loose scalar equality: absent equals `null`, numbers compare numerically.
pub fn loosely_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => true,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                return x == y;
            }
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
