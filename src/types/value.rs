use std::fmt;

use super::RulesetError;

/// Comparison operand carried by a leaf check.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer. Money amounts use minor units.
    Int(i64),
    /// An unsigned integer above `i64::MAX`, kept exact.
    UInt(u64),
    /// A finite 64-bit floating-point number.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A UTF-8 string.
    String(String),
    /// An ordered list of operands, typically used with `in` / `not_in`.
    List(Vec<Value>),
}

impl Value {
    /// Convert to the JSON wire representation.
    ///
    /// Non-finite floats have no JSON representation and become `null`, the
    /// same way `serde_json` itself encodes them. Checks built through the
    /// validating constructors never hold one; see [`Value::ensure_finite`].
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(v) => serde_json::Value::from(*v),
            Value::UInt(v) => serde_json::Value::from(*v),
            Value::Float(v) => serde_json::Number::from_f64(*v)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::String(v) => serde_json::Value::String(v.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }

    /// Read an operand from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError::InvalidField`] for `null`, objects, or lists
    /// containing either.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, RulesetError> {
        let invalid = || RulesetError::InvalidField {
            field: "value",
            expected: "a scalar or an array of scalars",
        };
        match json {
            serde_json::Value::Bool(v) => Ok(Value::Bool(*v)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Value::UInt(u))
                } else {
                    n.as_f64().map(Value::Float).ok_or_else(invalid)
                }
            }
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
                .map_err(|_| invalid()),
            serde_json::Value::Null | serde_json::Value::Object(_) => Err(invalid()),
        }
    }

    /// Reject NaN and infinities, including inside lists.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError::InvalidField`] for `value` when a float has no
    /// JSON representation.
    pub fn ensure_finite(&self) -> Result<(), RulesetError> {
        match self {
            Value::Float(v) if !v.is_finite() => Err(non_finite()),
            Value::List(items) => items.iter().try_for_each(Value::ensure_finite),
            _ => Ok(()),
        }
    }
}

fn non_finite() -> RulesetError {
    RulesetError::InvalidField {
        field: "value",
        expected: "a finite number",
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Value::UInt(v), Value::Int)
    }
}

impl TryFrom<f64> for Value {
    type Error = RulesetError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        if v.is_finite() {
            Ok(Value::Float(v))
        } else {
            Err(non_finite())
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "\"{v}\""),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}
