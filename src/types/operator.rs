use std::fmt;
use std::str::FromStr;

use super::RulesetError;

/// Comparison operators used by leaf checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    In,
    NotIn,
}

/// Operators that combine child checks into a composite check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListOp {
    And,
    Or,
}

/// Either operator family, as read from the `operator` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Compare(CompareOp),
    List(ListOp),
}

impl CompareOp {
    pub const ALL: [CompareOp; 8] = [
        CompareOp::Equals,
        CompareOp::NotEquals,
        CompareOp::GreaterThan,
        CompareOp::GreaterOrEqual,
        CompareOp::LessThan,
        CompareOp::LessOrEqual,
        CompareOp::In,
        CompareOp::NotIn,
    ];

    /// The wire literal for this operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Equals => "equals",
            CompareOp::NotEquals => "not_equals",
            CompareOp::GreaterThan => "greater_than",
            CompareOp::GreaterOrEqual => "greater_or_equal",
            CompareOp::LessThan => "less_than",
            CompareOp::LessOrEqual => "less_or_equal",
            CompareOp::In => "in",
            CompareOp::NotIn => "not_in",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            CompareOp::Equals => "==",
            CompareOp::NotEquals => "!=",
            CompareOp::GreaterThan => ">",
            CompareOp::GreaterOrEqual => ">=",
            CompareOp::LessThan => "<",
            CompareOp::LessOrEqual => "<=",
            CompareOp::In => "IN",
            CompareOp::NotIn => "NOT IN",
        }
    }
}

impl ListOp {
    pub const ALL: [ListOp; 2] = [ListOp::And, ListOp::Or];

    /// The wire literal for this operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ListOp::And => "and",
            ListOp::Or => "or",
        }
    }
}

impl Operator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Compare(op) => op.as_str(),
            Operator::List(op) => op.as_str(),
        }
    }
}

impl FromStr for CompareOp {
    type Err = RulesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompareOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| RulesetError::NotACompareOperator {
                operator: s.to_owned(),
            })
    }
}

impl FromStr for ListOp {
    type Err = RulesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| RulesetError::NotAListOperator {
                operator: s.to_owned(),
            })
    }
}

impl FromStr for Operator {
    type Err = RulesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(op) = s.parse::<ListOp>() {
            return Ok(Operator::List(op));
        }
        if let Ok(op) = s.parse::<CompareOp>() {
            return Ok(Operator::Compare(op));
        }
        Err(RulesetError::UnknownOperator {
            operator: s.to_owned(),
        })
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for ListOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListOp::And => f.write_str("AND"),
            ListOp::Or => f.write_str("OR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_op_round_trips_through_wire_literal() {
        for op in CompareOp::ALL {
            assert_eq!(op.as_str().parse::<CompareOp>(), Ok(op));
        }
    }

    #[test]
    fn list_op_round_trips_through_wire_literal() {
        for op in ListOp::ALL {
            assert_eq!(op.as_str().parse::<ListOp>(), Ok(op));
        }
    }

    #[test]
    fn operator_families_are_disjoint() {
        for op in CompareOp::ALL {
            assert!(op.as_str().parse::<ListOp>().is_err());
        }
        for op in ListOp::ALL {
            assert!(op.as_str().parse::<CompareOp>().is_err());
        }
    }

    #[test]
    fn operator_parses_either_family() {
        assert_eq!("or".parse::<Operator>(), Ok(Operator::List(ListOp::Or)));
        assert_eq!(
            "greater_or_equal".parse::<Operator>(),
            Ok(Operator::Compare(CompareOp::GreaterOrEqual))
        );
    }

    #[test]
    fn unknown_operator_rejected() {
        assert_eq!(
            "xor".parse::<Operator>(),
            Err(RulesetError::UnknownOperator {
                operator: "xor".into()
            })
        );
        // Wire literals are case sensitive.
        assert!("AND".parse::<Operator>().is_err());
    }

    #[test]
    fn wrong_family_errors() {
        assert_eq!(
            "and".parse::<CompareOp>(),
            Err(RulesetError::NotACompareOperator {
                operator: "and".into()
            })
        );
        assert_eq!(
            "equals".parse::<ListOp>(),
            Err(RulesetError::NotAListOperator {
                operator: "equals".into()
            })
        );
    }

    #[test]
    fn display_symbols() {
        assert_eq!(CompareOp::GreaterOrEqual.to_string(), ">=");
        assert_eq!(CompareOp::NotIn.to_string(), "NOT IN");
        assert_eq!(ListOp::Or.to_string(), "OR");
    }
}
