use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as Json};

use super::{wire, Check, Outcome, RulesetError};

/// A check tree bound to an identifying key and the outcome applied when it
/// fires.
///
/// Keys are unique within a ruleset by convention only.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    key: String,
    outcome: Outcome,
    check: Check,
}

impl Rule {
    /// Create a rule from a wire outcome literal.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError::InvalidOutcome`] unless `outcome` is `allow`,
    /// `review` or `block`, and any error [`Check::validate`] reports for the
    /// check tree.
    pub fn new(
        key: impl Into<String>,
        outcome: &str,
        check: impl Into<Check>,
    ) -> Result<Self, RulesetError> {
        Self::with_outcome(key, outcome.parse()?, check)
    }

    /// # Errors
    ///
    /// Returns any error [`Check::validate`] reports for the check tree.
    pub fn with_outcome(
        key: impl Into<String>,
        outcome: Outcome,
        check: impl Into<Check>,
    ) -> Result<Self, RulesetError> {
        let check = check.into();
        check.validate()?;
        Ok(Self::from_parts(key, outcome, check))
    }

    /// Assemble a rule whose check is already known to be well formed.
    pub(crate) fn from_parts(key: impl Into<String>, outcome: Outcome, check: Check) -> Self {
        debug_assert!(check.validate().is_ok());
        Self {
            key: key.into(),
            outcome,
            check,
        }
    }

    /// Whether `status` is one of the three fraud outcomes.
    #[must_use]
    pub fn is_valid_fraud_outcome_status(status: &str) -> bool {
        status.parse::<Outcome>().is_ok()
    }

    /// Parse and validate a rule from its array representation.
    ///
    /// # Errors
    ///
    /// Fails when `key`, `check` or `outcome` is missing, when `check` is not
    /// a non-empty object, when the outcome is unknown, or when the check tree
    /// is malformed.
    pub fn from_array(json: &Json) -> Result<Self, RulesetError> {
        let obj = wire::object(json, "rule")?;
        for field in ["key", "check", "outcome"] {
            if wire::field(obj, field).is_none() {
                return Err(RulesetError::MissingRuleField { field });
            }
        }

        let key = wire::string_field(obj, "key")?.unwrap_or_default();
        let check = wire::field(obj, "check")
            .filter(|c| c.as_object().is_some_and(|m| !m.is_empty()))
            .ok_or(RulesetError::InvalidField {
                field: "check",
                expected: "a non-empty object",
            })?;
        let outcome = parse_outcome(obj)?;
        let check = Check::from_array(check).map_err(|source| RulesetError::InvalidRuleCheck {
            rule: key.to_owned(),
            source: Box::new(source),
        })?;

        Ok(Self::from_parts(key, outcome, check))
    }

    /// Non-failing probe sharing the exact validation path of
    /// [`from_array`](Self::from_array).
    #[must_use]
    pub fn validate_array(json: &Json) -> bool {
        match Rule::from_array(json) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(error = %err, "rejected rule array");
                false
            }
        }
    }

    /// Serialize as `{key, outcome, check}`.
    #[must_use]
    pub fn to_array(&self) -> Json {
        let mut map = Map::new();
        map.insert("key".to_owned(), Json::String(self.key.clone()));
        map.insert("outcome".to_owned(), Json::from(self.outcome.as_str()));
        map.insert("check".to_owned(), self.check.to_array());
        Json::Object(map)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn check(&self) -> &Check {
        &self.check
    }
}

fn parse_outcome(obj: &Map<String, Json>) -> Result<Outcome, RulesetError> {
    match wire::field(obj, "outcome") {
        Some(Json::String(s)) => s.parse(),
        Some(other) => Err(RulesetError::InvalidOutcome {
            outcome: other.to_string(),
        }),
        None => Err(RulesetError::MissingRuleField { field: "outcome" }),
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Rule::from_array(&json).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} when {}", self.key, self.outcome, self.check)
    }
}
