use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as Json};

use super::operator::{CompareOp, ListOp, Operator};
use super::{wire, RulesetError, Value};

/// A node in a fraud check tree.
///
/// A check is either a single comparison of a runtime signal against an
/// operand, or an `and` / `or` combination of child checks. Children are
/// owned outright; the tree is never shared.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Leaf {
        key: String,
        operator: CompareOp,
        value: Value,
    },
    Composite {
        operator: ListOp,
        checks: Vec<Check>,
    },
}

impl Check {
    /// Build a leaf check from a wire operator literal.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError::NotACompareOperator`] if `operator` is not one
    /// of the comparison operators, and [`RulesetError::InvalidField`] if the
    /// operand holds a NaN or infinite float.
    pub fn check(
        key: impl Into<String>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<Check, RulesetError> {
        let operator = operator.parse()?;
        let value = value.into();
        value.ensure_finite()?;
        Ok(Check::Leaf {
            key: key.into(),
            operator,
            value,
        })
    }

    /// Build a composite check from already constructed checks.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError::NotAListOperator`] if `operator` is not `and`
    /// or `or`, [`RulesetError::MissingChecks`] if `checks` is empty, and any
    /// error [`validate`](Self::validate) reports for a child.
    pub fn list(operator: &str, checks: Vec<Check>) -> Result<Check, RulesetError> {
        let operator: ListOp = operator.parse()?;
        let check = Check::Composite { operator, checks };
        check.validate()?;
        Ok(check)
    }

    /// Check that the tree would survive `to_array` / `from_array`.
    ///
    /// The variants are public, so a tree can be assembled by hand with an
    /// empty composite or a non-finite operand. Every fallible constructor in
    /// this crate runs this walk.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError::MissingChecks`] for an empty composite and
    /// [`RulesetError::InvalidField`] for a NaN or infinite operand.
    pub fn validate(&self) -> Result<(), RulesetError> {
        match self {
            Check::Leaf { value, .. } => value.ensure_finite(),
            Check::Composite { operator, checks } => {
                if checks.is_empty() {
                    return Err(RulesetError::MissingChecks {
                        operator: operator.as_str().to_owned(),
                    });
                }
                checks.iter().try_for_each(Check::validate)
            }
        }
    }

    /// Parse and validate a check tree from its array representation.
    ///
    /// # Errors
    ///
    /// Returns the first [`RulesetError`] found while walking the tree.
    pub fn from_array(json: &Json) -> Result<Check, RulesetError> {
        let obj = wire::object(json, "check")?;
        let operator = match wire::field(obj, "operator") {
            None => return Err(RulesetError::MissingOperator),
            Some(Json::String(s)) => s.parse::<Operator>()?,
            Some(other) => {
                return Err(RulesetError::UnknownOperator {
                    operator: other.to_string(),
                })
            }
        };

        match operator {
            Operator::List(op) => parse_composite(obj, op),
            Operator::Compare(op) => parse_leaf(obj, op),
        }
    }

    /// Non-failing probe sharing the exact validation path of
    /// [`from_array`](Self::from_array).
    #[must_use]
    pub fn validate_array(json: &Json) -> bool {
        match Check::from_array(json) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(error = %err, "rejected check array");
                false
            }
        }
    }

    /// Serialize to the array representation.
    ///
    /// Leaves produce `{key, operator, value}`; composites produce
    /// `{operator, checks}` with children in order.
    #[must_use]
    pub fn to_array(&self) -> Json {
        let mut map = Map::new();
        match self {
            Check::Leaf {
                key,
                operator,
                value,
            } => {
                map.insert("key".to_owned(), Json::String(key.clone()));
                map.insert("operator".to_owned(), Json::from(operator.as_str()));
                map.insert("value".to_owned(), value.to_json());
            }
            Check::Composite { operator, checks } => {
                map.insert("operator".to_owned(), Json::from(operator.as_str()));
                map.insert(
                    "checks".to_owned(),
                    Json::Array(checks.iter().map(Check::to_array).collect()),
                );
            }
        }
        Json::Object(map)
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        match self {
            Check::Leaf { operator, .. } => Operator::Compare(*operator),
            Check::Composite { operator, .. } => Operator::List(*operator),
        }
    }

    /// The signal key, for leaf checks.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Check::Leaf { key, .. } => Some(key),
            Check::Composite { .. } => None,
        }
    }

    /// The comparison operand, for leaf checks.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Check::Leaf { value, .. } => Some(value),
            Check::Composite { .. } => None,
        }
    }

    /// Child checks; empty for leaves.
    #[must_use]
    pub fn checks(&self) -> &[Check] {
        match self {
            Check::Leaf { .. } => &[],
            Check::Composite { checks, .. } => checks,
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Check::Leaf { .. })
    }

    /// Combine with `other` under `and`. An existing `and` node is extended
    /// rather than nested.
    #[must_use]
    pub fn and(self, other: Check) -> Check {
        self.combine(ListOp::And, other)
    }

    /// Combine with `other` under `or`. An existing `or` node is extended
    /// rather than nested.
    #[must_use]
    pub fn or(self, other: Check) -> Check {
        self.combine(ListOp::Or, other)
    }

    fn combine(self, op: ListOp, other: Check) -> Check {
        match self {
            Check::Composite {
                operator,
                mut checks,
            } if operator == op => {
                checks.push(other);
                Check::Composite { operator, checks }
            }
            first => Check::Composite {
                operator: op,
                checks: vec![first, other],
            },
        }
    }
}

fn parse_composite(obj: &Map<String, Json>, op: ListOp) -> Result<Check, RulesetError> {
    for field in ["key", "value"] {
        if wire::field(obj, field).is_some() {
            return Err(RulesetError::MixedShape {
                operator: op.as_str().to_owned(),
                field,
            });
        }
    }

    let children = match wire::field(obj, "checks") {
        Some(Json::Array(items)) if !items.is_empty() => items,
        Some(Json::Array(_)) | None => {
            return Err(RulesetError::MissingChecks {
                operator: op.as_str().to_owned(),
            })
        }
        Some(_) => {
            return Err(RulesetError::InvalidField {
                field: "checks",
                expected: "an array",
            })
        }
    };

    let checks = children
        .iter()
        .map(Check::from_array)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Check::Composite {
        operator: op,
        checks,
    })
}

fn parse_leaf(obj: &Map<String, Json>, op: CompareOp) -> Result<Check, RulesetError> {
    let missing = |field| RulesetError::MissingLeafField {
        operator: op.as_str().to_owned(),
        field,
    };
    let key = wire::string_field(obj, "key")?.ok_or_else(|| missing("key"))?;
    let value = wire::field(obj, "value").ok_or_else(|| missing("value"))?;

    match wire::field(obj, "checks") {
        None => {}
        Some(Json::Array(items)) if items.is_empty() => {}
        Some(_) => {
            return Err(RulesetError::MixedShape {
                operator: op.as_str().to_owned(),
                field: "checks",
            })
        }
    }

    Ok(Check::Leaf {
        key: key.to_owned(),
        operator: op,
        value: Value::from_json(value)?,
    })
}

impl Serialize for Check {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Check {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Check::from_array(&json).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Leaf {
                key,
                operator,
                value,
            } => write!(f, "({key} {operator} {value})"),
            Check::Composite { operator, checks } => {
                f.write_str("(")?;
                for (i, check) in checks.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {operator} ")?;
                    }
                    write!(f, "{check}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Intermediate builder for leaf checks on a signal key.
/// Created by [`key()`]; a comparison method produces the [`Check`].
///
/// Float operands go through [`Value::try_from`] first, so the builder itself
/// never sees a NaN unless one is wrapped in [`Value::Float`] by hand.
#[derive(Debug, Clone)]
pub struct KeyCheck {
    key: String,
}

impl KeyCheck {
    fn compare(self, operator: CompareOp, value: impl Into<Value>) -> Check {
        Check::Leaf {
            key: self.key,
            operator,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn equals(self, value: impl Into<Value>) -> Check {
        self.compare(CompareOp::Equals, value)
    }

    #[must_use]
    pub fn not_equals(self, value: impl Into<Value>) -> Check {
        self.compare(CompareOp::NotEquals, value)
    }

    #[must_use]
    pub fn greater_than(self, value: impl Into<Value>) -> Check {
        self.compare(CompareOp::GreaterThan, value)
    }

    #[must_use]
    pub fn greater_or_equal(self, value: impl Into<Value>) -> Check {
        self.compare(CompareOp::GreaterOrEqual, value)
    }

    #[must_use]
    pub fn less_than(self, value: impl Into<Value>) -> Check {
        self.compare(CompareOp::LessThan, value)
    }

    #[must_use]
    pub fn less_or_equal(self, value: impl Into<Value>) -> Check {
        self.compare(CompareOp::LessOrEqual, value)
    }

    #[must_use]
    pub fn is_in(self, value: impl Into<Value>) -> Check {
        self.compare(CompareOp::In, value)
    }

    #[must_use]
    pub fn not_in(self, value: impl Into<Value>) -> Check {
        self.compare(CompareOp::NotIn, value)
    }
}

#[must_use]
pub fn key(key: &str) -> KeyCheck {
    KeyCheck {
        key: key.to_owned(),
    }
}
