use thiserror::Error;

/// The single domain error raised when a check, checklist, rule or ruleset
/// does not have a valid shape, or a protection level name is unknown.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulesetError {
    #[error("{what} must be an object")]
    NotAnObject { what: &'static str },

    #[error("check is missing required field 'operator'")]
    MissingOperator,

    #[error("unknown operator '{operator}'")]
    UnknownOperator { operator: String },

    #[error("'{operator}' is not a comparison operator")]
    NotACompareOperator { operator: String },

    #[error("'{operator}' is not a list operator; expected 'and' or 'or'")]
    NotAListOperator { operator: String },

    #[error("list operator '{operator}' requires a non-empty 'checks' array")]
    MissingChecks { operator: String },

    #[error("comparison operator '{operator}' requires field '{field}'")]
    MissingLeafField {
        operator: String,
        field: &'static str,
    },

    #[error("check with operator '{operator}' must not carry '{field}'")]
    MixedShape {
        operator: String,
        field: &'static str,
    },

    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("rule is missing required field '{field}'")]
    MissingRuleField { field: &'static str },

    #[error("invalid fraud outcome '{outcome}'; expected 'allow', 'review' or 'block'")]
    InvalidOutcome { outcome: String },

    #[error("rule '{rule}' has an invalid check: {source}")]
    InvalidRuleCheck {
        rule: String,
        #[source]
        source: Box<RulesetError>,
    },

    #[error("ruleset must be an array of rules")]
    NotAList,

    #[error("invalid rule at index {index}: {source}")]
    InvalidRule {
        index: usize,
        #[source]
        source: Box<RulesetError>,
    },

    #[error("unknown protection level '{level}'; expected 'basic', 'standard', 'high' or 'custom'")]
    UnknownProtectionLevel { level: String },
}
