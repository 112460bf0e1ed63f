use serde::{Serialize, Serializer};
use serde_json::Value as Json;

use super::operator::ListOp;
use super::{Check, RulesetError};

/// A validated `and` / `or` combination of already constructed checks.
///
/// A checklist serializes exactly like a composite [`Check`] and converts
/// into one with [`From`]. Only genuine [`Check`] values are accepted; raw
/// array-shaped data has to go through [`Check::from_array`] first:
///
/// ```compile_fail
/// use fraud_rules::Checklist;
///
/// let raw = serde_json::json!({"key": "item_count", "operator": "greater_than", "value": 10});
/// let _ = Checklist::new("and", vec![raw]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Checklist {
    operator: ListOp,
    checks: Vec<Check>,
}

impl Checklist {
    /// # Errors
    ///
    /// Returns [`RulesetError::NotAListOperator`] if `operator` is not exactly
    /// `and` or `or`, [`RulesetError::MissingChecks`] if `checks` is empty,
    /// and whatever [`Check::validate`] reports for a malformed child.
    pub fn new(operator: &str, checks: Vec<Check>) -> Result<Self, RulesetError> {
        let operator: ListOp = operator.parse()?;
        if checks.is_empty() {
            return Err(RulesetError::MissingChecks {
                operator: operator.as_str().to_owned(),
            });
        }
        checks.iter().try_for_each(Check::validate)?;
        Ok(Self { operator, checks })
    }

    #[must_use]
    pub fn operator(&self) -> ListOp {
        self.operator
    }

    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Serialize as `{operator, checks}`.
    #[must_use]
    pub fn to_array(&self) -> Json {
        Check::from(self.clone()).to_array()
    }
}

impl From<Checklist> for Check {
    fn from(list: Checklist) -> Self {
        Check::Composite {
            operator: list.operator,
            checks: list.checks,
        }
    }
}

impl Serialize for Checklist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}
